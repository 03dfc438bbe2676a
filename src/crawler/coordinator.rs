//! Scrape coordinator - main pagination loop
//!
//! This module drives one scrape run:
//! - Validating the category and page count before anything is fetched
//! - Fetching pages 1..=N strictly one after another
//! - Extracting records and isolating per-page and per-card failures
//! - Pausing for the politeness delay between pages
//! - Emitting progress events for the caller

use crate::catalog::{Category, CategoryRegistry};
use crate::config::Config;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::progress::{ProgressEvent, ProgressSink};
use crate::crawler::record::ListingRecord;
use crate::state::{EmptyPageReason, PageOutcome};
use crate::url::page_url;
use crate::ScrapeError;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Loop settings taken from the `[scraper]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSettings {
    /// Fixed pause between two page fetches
    pub politeness_delay: Duration,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            politeness_delay: Duration::from_secs(1),
        }
    }
}

impl ScrapeSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            politeness_delay: Duration::from_millis(config.scraper.politeness_delay_ms),
        }
    }
}

/// The result of one orchestrated multi-page scrape
#[derive(Debug, Clone)]
pub struct ScrapeRun {
    pub category: Category,
    pub requested_pages: u32,

    /// Records in page order, then document order
    pub records: Vec<ListingRecord>,

    /// Pages fetched successfully that produced no records
    pub pages_with_zero_results: BTreeSet<u32>,

    /// Pages that could not be fetched, with the error message
    pub failed_pages: BTreeMap<u32, String>,

    /// Outcome of every page iteration
    pub outcomes: BTreeMap<u32, PageOutcome>,

    /// Listing cards dropped because they could not be read
    pub skipped_items: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScrapeRun {
    fn new(category: Category, requested_pages: u32) -> Self {
        let now = Utc::now();
        Self {
            category,
            requested_pages,
            records: Vec::new(),
            pages_with_zero_results: BTreeSet::new(),
            failed_pages: BTreeMap::new(),
            outcomes: BTreeMap::new(),
            skipped_items: 0,
            started_at: now,
            finished_at: now,
        }
    }

    /// Returns true if no page produced a record
    ///
    /// This is a valid result; the caller decides how to present it.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Main scrape coordinator
///
/// Owns the fetcher, the extractor and the category registry. A coordinator
/// can run any number of scrapes, one at a time.
pub struct Coordinator<F> {
    fetcher: F,
    extractor: Extractor,
    registry: CategoryRegistry,
    settings: ScrapeSettings,
}

impl<F: PageFetcher> Coordinator<F> {
    pub fn new(
        fetcher: F,
        extractor: Extractor,
        registry: CategoryRegistry,
        settings: ScrapeSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            registry,
            settings,
        }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn settings(&self) -> ScrapeSettings {
        self.settings
    }

    /// Scrapes `page_count` pages of the category called `label`
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeRun)` - The run, possibly without any record
    /// * `Err(ScrapeError::UnknownCategory)` - No category has that label
    /// * `Err(ScrapeError::InvalidArgument)` - Page count is zero
    pub async fn run<S>(
        &self,
        label: &str,
        page_count: u32,
        sink: &mut S,
    ) -> Result<ScrapeRun, ScrapeError>
    where
        S: ProgressSink + ?Sized,
    {
        let category = self
            .registry
            .get(label)
            .cloned()
            .ok_or_else(|| ScrapeError::UnknownCategory(label.to_string()))?;

        self.run_category(category, page_count, sink).await
    }

    /// Scrapes `page_count` pages of `category`
    ///
    /// Each page goes through fetch, extract, accumulate, progress, pause.
    /// Fetch failures, empty pages and unreadable cards are reported and
    /// skipped; the loop always runs all `page_count` iterations.
    pub async fn run_category<S>(
        &self,
        category: Category,
        page_count: u32,
        sink: &mut S,
    ) -> Result<ScrapeRun, ScrapeError>
    where
        S: ProgressSink + ?Sized,
    {
        check_page_count(page_count)?;

        tracing::info!(
            "Scraping {} ({} pages) from {}",
            category.label,
            page_count,
            category.base_url
        );

        let mut run = ScrapeRun::new(category, page_count);

        for page in 1..=page_count {
            sink.on_event(&ProgressEvent::PageStarted {
                page,
                total: page_count,
            });

            let outcome = self.scrape_page(&mut run, page, sink).await;
            let records = outcome.records();
            run.outcomes.insert(page, outcome);

            if page < page_count && !self.settings.politeness_delay.is_zero() {
                tokio::time::sleep(self.settings.politeness_delay).await;
            }

            sink.on_event(&ProgressEvent::PageCompleted {
                page,
                total: page_count,
                records,
            });
        }

        run.finished_at = Utc::now();

        sink.on_event(&ProgressEvent::RunFinished {
            records: run.records.len(),
            failed_pages: run.failed_pages.len(),
        });

        if run.is_empty() {
            tracing::warn!(
                "No data could be retrieved for {}, check the CSS selectors",
                run.category.label
            );
        } else {
            tracing::info!(
                "{} records scraped for {} in {}s",
                run.records.len(),
                run.category.label,
                run.duration().num_seconds()
            );
        }

        Ok(run)
    }

    /// Processes one page into `run`
    async fn scrape_page<S>(&self, run: &mut ScrapeRun, page: u32, sink: &mut S) -> PageOutcome
    where
        S: ProgressSink + ?Sized,
    {
        let url = page_url(&run.category.base_url, page);
        tracing::debug!("Fetching page {}: {}", page, url);

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(error) => {
                tracing::debug!("Skipping page {}: {}", page, error);
                let message = error.to_string();
                run.failed_pages.insert(page, message.clone());
                sink.on_event(&ProgressEvent::PageFailed { page, error });
                return PageOutcome::FetchFailed(message);
            }
        };

        // The parsed document is dropped before the next await point
        let extraction = self.extractor.extract_html(&body, &run.category, page);

        for error in extraction.failures {
            tracing::debug!("Page {}: {}", page, error);
            run.skipped_items += 1;
            sink.on_event(&ProgressEvent::ItemSkipped { page, error });
        }

        if extraction.records.is_empty() {
            let reason = EmptyPageReason::classify(run.records.len());
            tracing::debug!("Page {} is empty: {}", page, reason);
            run.pages_with_zero_results.insert(page);
            sink.on_event(&ProgressEvent::PageEmpty { page, reason });
            return PageOutcome::Empty(reason);
        }

        let count = extraction.records.len();
        run.records.extend(extraction.records);
        PageOutcome::Scraped(count)
    }
}

fn check_page_count(page_count: u32) -> Result<(), ScrapeError> {
    if page_count == 0 {
        return Err(ScrapeError::InvalidArgument(
            "page count must be at least 1".to_string(),
        ));
    }

    Ok(())
}
