//! Progress events emitted while a scrape runs
//!
//! The coordinator pushes events into a `ProgressSink`; the CLI logs them,
//! tests collect them. Nothing here depends on how they are displayed.

use crate::state::EmptyPageReason;
use crate::{FetchError, ItemExtractionError};
use tokio::sync::mpsc::UnboundedSender;

/// One step of a scrape run
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// About to fetch `page` of `total`
    PageStarted { page: u32, total: u32 },

    /// The page could not be fetched and was skipped
    PageFailed { page: u32, error: FetchError },

    /// The page was fetched but produced no records
    PageEmpty { page: u32, reason: EmptyPageReason },

    /// One listing card on the page was dropped
    ItemSkipped { page: u32, error: ItemExtractionError },

    /// Page iteration finished, whatever its outcome (1-based `page` of `total`)
    PageCompleted { page: u32, total: u32, records: usize },

    /// The whole run finished
    RunFinished { records: usize, failed_pages: usize },
}

impl ProgressEvent {
    /// Fraction of pages done, for progress bars
    pub fn fraction(&self) -> Option<f64> {
        match self {
            Self::PageCompleted { page, total, .. } if *total > 0 => {
                Some(f64::from(*page) / f64::from(*total))
            }
            _ => None,
        }
    }
}

/// Receiver of progress events
pub trait ProgressSink {
    fn on_event(&mut self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn on_event(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Forwards events to a channel; a dropped receiver is ignored
#[derive(Debug, Clone)]
pub struct ChannelProgress(pub UnboundedSender<ProgressEvent>);

impl ProgressSink for ChannelProgress {
    fn on_event(&mut self, event: &ProgressEvent) {
        let _ = self.0.send(event.clone());
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&mut self, _event: &ProgressEvent) {}
}

/// Reports events through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_event(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::PageStarted { page, total } => {
                tracing::info!("Processing page {}/{}...", page, total);
            }
            ProgressEvent::PageFailed { page, error } => {
                tracing::error!("Page {} failed: {}", page, error);
            }
            ProgressEvent::PageEmpty { page, reason } => {
                tracing::warn!("No listing found on page {}: {}", page, reason);
            }
            ProgressEvent::ItemSkipped { page, error } => {
                tracing::warn!("Skipped a listing on page {}: {}", page, error);
            }
            ProgressEvent::PageCompleted {
                page,
                total,
                records,
            } => {
                tracing::debug!("Page {}/{} done ({} records)", page, total, records);
            }
            ProgressEvent::RunFinished {
                records,
                failed_pages,
            } => {
                tracing::info!(
                    "Scrape finished: {} records, {} failed pages",
                    records,
                    failed_pages
                );
            }
        }
    }
}
