//! Coinafrique Harvest: a polite classified-ad scraper
//!
//! This crate fetches listing pages from sn.coinafrique.com one at a time,
//! extracts a flat record per listing card, and exports the result as CSV.
//! It can also read previously stored datasets to preview them and build a
//! small dashboard report.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Coinafrique Harvest operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector for '{field}': {message}")]
    InvalidSelector { field: String, message: String },

    #[error("Duplicate category label: {0}")]
    DuplicateCategory(String),
}

/// Why a single page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchErrorKind {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

/// A page that could not be fetched. Non-fatal to a scrape run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to fetch {page_url}: {cause}")]
pub struct FetchError {
    pub page_url: String,
    pub cause: FetchErrorKind,
}

impl FetchError {
    pub fn new(page_url: impl Into<String>, cause: FetchErrorKind) -> Self {
        Self {
            page_url: page_url.into(),
            cause,
        }
    }
}

/// A single listing card that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemExtractionError {
    #[error("card {index}: {field} element has no '{attribute}' attribute")]
    MissingAttribute {
        index: usize,
        field: &'static str,
        attribute: String,
    },
}

/// Result type alias for Coinafrique Harvest operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{Category, CategoryRegistry};
pub use config::Config;
pub use crawler::{Coordinator, Extractor, HttpFetcher, ListingRecord, PageFetcher, ScrapeRun};
pub use state::{EmptyPageReason, PageOutcome};
