//! Category registry
//!
//! The set of scrapeable categories is fixed once at startup and handed to
//! the coordinator. Tests build their own registries pointing at mock servers.

use crate::config::validation::validate_base_url;
use crate::config::Config;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// A listing category on the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub base_url: Url,
    pub type_tag: String,
}

impl Category {
    pub fn new(label: impl Into<String>, base_url: Url, type_tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            base_url,
            type_tag: type_tag.into(),
        }
    }

    /// File name offered for a fresh scrape of this category
    ///
    /// `"Les Moutons"` becomes `coinafrique_les_moutons.csv`.
    pub fn export_file_name(&self) -> String {
        format!("coinafrique_{}.csv", self.label.to_lowercase().replace(' ', "_"))
    }
}

/// Immutable lookup table of categories, keyed by label
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Builds a registry, rejecting duplicate labels
    pub fn new(categories: Vec<Category>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.label.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.label.clone()));
            }
        }
        Ok(Self { categories })
    }

    /// Builds the registry from the `[[category]]` entries of a configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let categories = config
            .categories
            .iter()
            .map(|entry| {
                let base_url = validate_base_url(&entry.url)?;
                Ok(Category::new(&entry.label, base_url, &entry.type_tag))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Self::new(categories)
    }

    /// The four animal categories scraped by default
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_config(&Config::default())
    }

    pub fn get(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(label: &str) -> Category {
        Category::new(
            label,
            Url::parse("https://example.com/categorie/x").unwrap(),
            "x",
        )
    }

    #[test]
    fn test_builtin_registry() {
        let registry = CategoryRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.labels(),
            vec![
                "Les Moutons",
                "Les Chiens",
                "Les Poules, Lapins et Pigeons",
                "Autres Animaux"
            ]
        );

        let sheep = registry.get("Les Moutons").unwrap();
        assert_eq!(sheep.type_tag, "mouton");
        assert_eq!(
            sheep.base_url.as_str(),
            "https://sn.coinafrique.com/categorie/moutons"
        );
    }

    #[test]
    fn test_unknown_label() {
        let registry = CategoryRegistry::builtin().unwrap();
        assert!(registry.get("Les Chats").is_none());
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let result = CategoryRegistry::new(vec![category("A"), category("A")]);
        assert!(matches!(result, Err(ConfigError::DuplicateCategory(_))));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            category("Les Moutons").export_file_name(),
            "coinafrique_les_moutons.csv"
        );
        assert_eq!(
            category("Les Poules, Lapins et Pigeons").export_file_name(),
            "coinafrique_les_poules,_lapins_et_pigeons.csv"
        );
    }
}
