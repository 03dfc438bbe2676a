//! Output module for exports, stored datasets and reports
//!
//! This module handles:
//! - Exporting scraped records as CSV
//! - Loading previously stored CSV datasets
//! - Computing dashboard statistics
//! - Rendering markdown reports

pub mod dataset;
mod export;
mod markdown;
pub mod stats;

pub use dataset::{load_records, load_table, raw_dataset_path, raw_file_name, Table};
pub use export::{to_delimited_text, write_export, CSV_HEADERS};
pub use markdown::{
    format_bar_chart, format_dashboard, format_run_report, format_table_preview, write_markdown,
};
pub use stats::{print_statistics, DashboardStats, DEFAULT_TOP_N};
