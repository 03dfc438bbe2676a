/// Page outcome definitions for a scrape run
use std::fmt;

/// Why a page that was fetched successfully produced zero records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmptyPageReason {
    /// An earlier page of the same run produced records, so the category has
    /// most likely run out of pages
    CategoryExhausted,

    /// No page of the run has produced records yet; the card selector probably
    /// no longer matches the site's markup
    MarkupChanged,
}

impl EmptyPageReason {
    /// Classifies an empty page from what the run has seen so far
    pub fn classify(records_before: usize) -> Self {
        if records_before > 0 {
            Self::CategoryExhausted
        } else {
            Self::MarkupChanged
        }
    }

    /// Stable warning code used in logs and reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::CategoryExhausted => "W-EXHAUSTED",
            Self::MarkupChanged => "W-MARKUP",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CategoryExhausted => "past the last page of the category",
            Self::MarkupChanged => "listing selector matched nothing, check the selectors",
        }
    }
}

impl fmt::Display for EmptyPageReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// The result of one page iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page fetched and yielded this many records
    Scraped(usize),

    /// Page fetched but no listing card produced a record
    Empty(EmptyPageReason),

    /// Page could not be fetched
    FetchFailed(String),
}

impl PageOutcome {
    /// Returns true if the page contributed records
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Scraped(_))
    }

    pub fn records(&self) -> usize {
        match self {
            Self::Scraped(n) => *n,
            _ => 0,
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scraped(n) => write!(f, "{} records", n),
            Self::Empty(reason) => write!(f, "no results, {}", reason),
            Self::FetchFailed(error) => write!(f, "fetch failed: {}", error),
        }
    }
}
