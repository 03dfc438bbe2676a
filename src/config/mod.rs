//! Configuration module for Coinafrique Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use coinafrique_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("coinafrique.toml")).unwrap();
//! println!("Politeness delay: {}ms", config.scraper.politeness_delay_ms);
//! ```

mod parser;
mod types;
pub(crate) mod validation;

// Re-export types
pub use types::{
    CategoryEntry, Config, DatasetEntry, DatasetsConfig, OutputConfig, ScraperConfig,
    SelectorConfig, UserAgentConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
