//! The flat record produced for each listing card

use serde::{Deserialize, Serialize};

/// Placeholder for a card without a description
pub const NAME_SENTINEL: &str = "Non spécifié";

/// Placeholder for a card without a price
pub const PRICE_SENTINEL: &str = "0 FCFA";

/// Placeholder for a card without a location
pub const ADDRESS_SENTINEL: &str = "Non spécifiée";

/// Placeholder for a card without an image
pub const IMAGE_SENTINEL: &str = "";

/// One scraped advertisement
///
/// Field order is the CSV column order. The French aliases let older
/// datasets (`Catégorie,Nom,Prix,Adresse,Image,Page`) load into the same
/// type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(alias = "Catégorie")]
    pub category_label: String,

    #[serde(alias = "Nom")]
    pub name: String,

    #[serde(alias = "Prix")]
    pub price_text: String,

    #[serde(alias = "Adresse", default = "default_address")]
    pub address_text: String,

    #[serde(alias = "Image", default)]
    pub image_url: String,

    #[serde(alias = "Page", default)]
    pub source_page: u32,
}

fn is_thousands_separator(c: char) -> bool {
    matches!(c, ' ' | '\u{a0}' | '\u{202f}')
}

fn default_address() -> String {
    ADDRESS_SENTINEL.to_string()
}

impl ListingRecord {
    /// Numeric price: the first group of digits in the price text
    ///
    /// Spaces between digits are read as thousands separators, so
    /// `"150 000 FCFA"` gives `Some(150000.0)`. `"Prix sur demande"` gives `None`.
    pub fn price_value(&self) -> Option<f64> {
        let digits: String = self
            .price_text
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit() || is_thousands_separator(*c))
            .filter(char::is_ascii_digit)
            .collect();

        if digits.is_empty() {
            None
        } else {
            digits.parse().ok()
        }
    }

    /// Returns true if the price is the missing-price placeholder
    pub fn has_price(&self) -> bool {
        self.price_text != PRICE_SENTINEL
    }
}
