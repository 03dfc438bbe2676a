use crate::config::types::{CategoryEntry, Config, DatasetEntry, ScraperConfig, UserAgentConfig};
use crate::crawler::SelectorSet;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    SelectorSet::compile(&config.selectors)?;
    validate_categories(&config.categories)?;
    validate_datasets(&config.datasets.raw)?;
    Ok(())
}

/// Validates scrape loop configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates category entries: unique non-empty labels and HTTP(S) base URLs
fn validate_categories(categories: &[CategoryEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in categories {
        if entry.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category label cannot be empty".to_string(),
            ));
        }

        if !seen.insert(entry.label.as_str()) {
            return Err(ConfigError::DuplicateCategory(entry.label.clone()));
        }

        validate_base_url(&entry.url)?;
    }

    Ok(())
}

fn validate_datasets(datasets: &[DatasetEntry]) -> Result<(), ConfigError> {
    for entry in datasets {
        if entry.path.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "dataset '{}' has an empty path",
                entry.label
            )));
        }
    }
    Ok(())
}

/// A category base URL must be absolute and use HTTP or HTTPS
pub(crate) fn validate_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid category URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Category URL '{}' must use HTTP or HTTPS",
            raw
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, url: &str) -> CategoryEntry {
        CategoryEntry {
            label: label.to_string(),
            url: url.to_string(),
            type_tag: "t".to_string(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://sn.coinafrique.com/categorie/chiens").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080/cat").is_ok());

        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("ftp://example.com/cat").is_err());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let categories = vec![
            entry("Les Chiens", "https://example.com/a"),
            entry("Les Chiens", "https://example.com/b"),
        ];
        assert!(matches!(
            validate_categories(&categories),
            Err(ConfigError::DuplicateCategory(label)) if label == "Les Chiens"
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let categories = vec![entry("  ", "https://example.com/a")];
        assert!(matches!(
            validate_categories(&categories),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ScraperConfig {
            politeness_delay_ms: 0,
            request_timeout_secs: 0,
            max_pages: 10,
        };
        assert!(validate_scraper_config(&config).is_err());
    }
}
