//! Crawler module for listing page fetching and processing
//!
//! This module contains the core scraping pipeline, including:
//! - HTTP fetching with a browser user agent and a request timeout
//! - Listing card extraction with configurable selectors
//! - Progress events for the presentation layer
//! - The sequential pagination loop

mod coordinator;
mod extractor;
mod fetcher;
mod progress;
mod record;

pub use coordinator::{Coordinator, ScrapeRun, ScrapeSettings};
pub use extractor::{Extractor, PageExtraction, SelectorSet};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use progress::{ChannelProgress, LogProgress, NoProgress, ProgressEvent, ProgressSink};
pub use record::{
    ListingRecord, ADDRESS_SENTINEL, IMAGE_SENTINEL, NAME_SENTINEL, PRICE_SENTINEL,
};

use crate::catalog::CategoryRegistry;
use crate::config::Config;
use crate::ScrapeError;

/// Builds a coordinator wired to the network from a configuration
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(Coordinator<HttpFetcher>)` - Ready to run scrapes
/// * `Err(ScrapeError)` - Bad selectors, bad category URLs, or HTTP client failure
pub fn coordinator_from_config(config: &Config) -> Result<Coordinator<HttpFetcher>, ScrapeError> {
    let fetcher = HttpFetcher::from_config(config)?;
    let extractor = Extractor::from_config(&config.selectors)?;
    let registry = CategoryRegistry::from_config(config)?;

    Ok(Coordinator::new(
        fetcher,
        extractor,
        registry,
        ScrapeSettings::from_config(config),
    ))
}
