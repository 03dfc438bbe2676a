//! State module for tracking what happened to each page of a scrape
//!
//! # Components
//!
//! - `PageOutcome`: the result of one page iteration (scraped, empty, failed)
//! - `EmptyPageReason`: why a fetched page yielded no listing cards

mod page_outcome;

// Re-export main types
pub use page_outcome::{EmptyPageReason, PageOutcome};
