//! Listing card extraction
//!
//! This module turns one results page into `ListingRecord`s:
//! - Locating listing cards with the configured card selector
//! - Reading name, price, address and image inside each card
//! - Substituting sentinels for missing sub-elements
//! - Reporting per-card failures without affecting the other cards

use crate::catalog::Category;
use crate::config::SelectorConfig;
use crate::crawler::record::{
    ListingRecord, ADDRESS_SENTINEL, IMAGE_SENTINEL, NAME_SENTINEL, PRICE_SENTINEL,
};
use crate::{ConfigError, ItemExtractionError};
use scraper::{ElementRef, Html, Selector};

/// Selectors compiled once from `SelectorConfig`
#[derive(Debug, Clone)]
pub struct SelectorSet {
    card: Selector,
    name: Selector,
    price: Selector,
    address: Selector,
    image: Selector,
    image_attribute: String,
}

impl SelectorSet {
    /// Compiles every selector, naming the offending field on failure
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        if config.image_attribute.trim().is_empty() {
            return Err(ConfigError::InvalidSelector {
                field: "image-attribute".to_string(),
                message: "attribute name cannot be empty".to_string(),
            });
        }

        Ok(Self {
            card: parse_selector("card", &config.card)?,
            name: parse_selector("name", &config.name)?,
            price: parse_selector("price", &config.price)?,
            address: parse_selector("address", &config.address)?,
            image: parse_selector("image", &config.image)?,
            image_attribute: config.image_attribute.trim().to_string(),
        })
    }
}

fn parse_selector(field: &str, raw: &str) -> Result<Selector, ConfigError> {
    Selector::parse(raw).map_err(|e| ConfigError::InvalidSelector {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Records and per-card failures of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    pub records: Vec<ListingRecord>,
    pub failures: Vec<ItemExtractionError>,
}

impl PageExtraction {
    /// Number of listing cards the selector matched
    pub fn cards(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Extracts listing records from parsed pages
#[derive(Debug, Clone)]
pub struct Extractor {
    selectors: SelectorSet,
}

impl Extractor {
    pub fn new(selectors: SelectorSet) -> Self {
        Self { selectors }
    }

    /// Builds an extractor from the `[selectors]` section
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(SelectorSet::compile(config)?))
    }

    /// Lazily yields one result per listing card, in document order
    ///
    /// Never fails as a whole: a page without matching cards yields nothing,
    /// and a malformed card yields an `Err` for that card only.
    pub fn extract<'a>(
        &'a self,
        doc: &'a Html,
        category: &'a Category,
        page: u32,
    ) -> impl Iterator<Item = Result<ListingRecord, ItemExtractionError>> + 'a {
        doc.select(&self.selectors.card)
            .enumerate()
            .map(move |(index, card)| self.extract_card(card, index, category, page))
    }

    /// Parses `html` and collects `extract` into owned results
    pub fn extract_html(&self, html: &str, category: &Category, page: u32) -> PageExtraction {
        let doc = Html::parse_document(html);
        let mut extraction = PageExtraction::default();

        for item in self.extract(&doc, category, page) {
            match item {
                Ok(record) => extraction.records.push(record),
                Err(e) => extraction.failures.push(e),
            }
        }

        extraction
    }

    fn extract_card(
        &self,
        card: ElementRef<'_>,
        index: usize,
        category: &Category,
        page: u32,
    ) -> Result<ListingRecord, ItemExtractionError> {
        let sel = &self.selectors;

        let image_url = match card.select(&sel.image).next() {
            Some(img) => img
                .value()
                .attr(&sel.image_attribute)
                .map(|src| src.trim().to_string())
                .ok_or_else(|| ItemExtractionError::MissingAttribute {
                    index,
                    field: "image",
                    attribute: sel.image_attribute.clone(),
                })?,
            None => IMAGE_SENTINEL.to_string(),
        };

        Ok(ListingRecord {
            category_label: category.label.clone(),
            name: first_text(card, &sel.name).unwrap_or_else(|| NAME_SENTINEL.to_string()),
            price_text: first_text(card, &sel.price).unwrap_or_else(|| PRICE_SENTINEL.to_string()),
            address_text: first_text(card, &sel.address)
                .unwrap_or_else(|| ADDRESS_SENTINEL.to_string()),
            image_url,
            source_page: page,
        })
    }
}

/// Trimmed text of the first element matching `selector` inside `card`
fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}
