//! Coinafrique Harvest main entry point
//!
//! This is the command-line interface for the Coinafrique listing scraper.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coinafrique_harvest::config::{load_config_with_hash, validate, Config};
use coinafrique_harvest::crawler::{coordinator_from_config, LogProgress};
use coinafrique_harvest::output::{
    format_dashboard, format_run_report, format_table_preview, load_records, load_table,
    print_statistics, raw_dataset_path, raw_file_name, write_export, write_markdown,
    DashboardStats, DEFAULT_TOP_N,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Coinafrique Harvest: scrape animal listings from Coinafrique Sénégal
///
/// Scrapes a category page by page, exports the listings as CSV, and
/// summarizes previously stored datasets.
#[derive(Parser, Debug)]
#[command(name = "coinafrique-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Coinafrique classified-ad scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the categories that can be scraped
    Categories,

    /// Scrape listing pages of one category and export them as CSV
    Scrape {
        /// Category label, as shown by `categories`
        #[arg(long)]
        category: String,

        /// Number of pages to scrape, starting at page 1
        #[arg(long)]
        pages: u32,

        /// Directory for the CSV export (defaults to `[output] export-dir`)
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Also write a markdown run report to this file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Preview a stored raw dataset
    Raw {
        /// Dataset label from `[[datasets.raw]]`
        #[arg(long)]
        dataset: String,

        /// Number of rows to show
        #[arg(long, default_value_t = 10)]
        rows: usize,

        /// Re-export the whole dataset into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// Show statistics over the cleaned dataset
    Dashboard {
        /// Cleaned dataset (defaults to `[datasets] clean-path`)
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Length of the most-expensive list
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Also write the dashboard as markdown to this file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load(cli.config.as_deref())?;

    match cli.command {
        Command::Categories => handle_categories(&config),
        Command::Scrape {
            category,
            pages,
            output,
            report,
        } => {
            handle_scrape(
                &config,
                config_hash.as_deref(),
                &category,
                pages,
                output,
                report,
            )
            .await
        }
        Command::Raw {
            dataset,
            rows,
            export,
        } => handle_raw(&config, &dataset, rows, export),
        Command::Dashboard { data, top, report } => handle_dashboard(&config, data, top, report),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("coinafrique_harvest=info,warn"),
            1 => EnvFilter::new("coinafrique_harvest=debug,info"),
            2 => EnvFilter::new("coinafrique_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or validated defaults when none is given
fn load(path: Option<&Path>) -> Result<(Config, Option<String>)> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok((config, Some(hash)))
        }
        None => {
            let config = Config::default();
            validate(&config).context("Built-in configuration is invalid")?;
            Ok((config, None))
        }
    }
}

/// Handles `categories`: lists the registry
fn handle_categories(config: &Config) -> Result<()> {
    let coordinator = coordinator_from_config(config)?;

    println!("=== Categories ({}) ===\n", coordinator.registry().len());
    for category in coordinator.registry().iter() {
        println!("  - {} [{}]", category.label, category.type_tag);
        println!("    {}", category.base_url);
    }

    Ok(())
}

/// Handles `scrape`: runs the pages, writes the export and optional report
async fn handle_scrape(
    config: &Config,
    config_hash: Option<&str>,
    label: &str,
    pages: u32,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
) -> Result<()> {
    check_page_limit(pages, config.scraper.max_pages)?;
    let coordinator = coordinator_from_config(config)?;

    let run = coordinator
        .run(label, pages, &mut LogProgress)
        .await
        .with_context(|| format!("Scrape of {} failed", label))?;

    let dir = output.unwrap_or_else(|| PathBuf::from(&config.output.export_dir));
    let path = write_export(&run.records, &dir, &run.category)
        .with_context(|| format!("Failed to write export into {}", dir.display()))?;

    println!(
        "✓ {} records from {} page(s) exported to: {}",
        run.records.len(),
        pages,
        path.display()
    );
    if run.is_empty() {
        println!("  No data could be retrieved. Check the CSS selectors.");
    }
    if !run.failed_pages.is_empty() {
        println!("  {} page(s) could not be fetched", run.failed_pages.len());
    }

    if let Some(report) = report {
        write_markdown(&format_run_report(&run, config_hash), &report)
            .with_context(|| format!("Failed to write report {}", report.display()))?;
        println!("✓ Report written to: {}", report.display());
    }

    Ok(())
}

/// Rejects `--pages` values outside `1..=max-pages`
fn check_page_limit(pages: u32, max_pages: u32) -> Result<()> {
    anyhow::ensure!(
        (1..=max_pages).contains(&pages),
        "--pages must be between 1 and {} (set `max-pages` in [scraper] to raise it), got {}",
        max_pages,
        pages
    );
    Ok(())
}

/// Handles `raw`: previews a stored dataset and optionally re-exports it
fn handle_raw(config: &Config, label: &str, rows: usize, export: Option<PathBuf>) -> Result<()> {
    let path = raw_dataset_path(&config.datasets, label)?;
    let table =
        load_table(path).with_context(|| format!("Failed to read dataset {}", path.display()))?;

    println!("=== {} ({} rows) ===\n", label, table.len());
    print!("{}", format_table_preview(&table, rows));

    if let Some(dir) = export {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let target = dir.join(raw_file_name(label));
        std::fs::write(&target, table.to_delimited_text()?)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!("\n✓ Dataset exported to: {}", target.display());
    }

    Ok(())
}

/// Handles `dashboard`: statistics over the cleaned dataset
fn handle_dashboard(
    config: &Config,
    data: Option<PathBuf>,
    top: usize,
    report: Option<PathBuf>,
) -> Result<()> {
    let path = data.unwrap_or_else(|| PathBuf::from(&config.datasets.clean_path));

    tracing::info!("Loading listings from {}", path.display());
    let records = load_records(&path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;

    let stats = DashboardStats::from_records(&records, top);
    print_statistics(&stats);

    if let Some(report) = report {
        write_markdown(&format_dashboard(&stats), &report)
            .with_context(|| format!("Failed to write report {}", report.display()))?;
        println!("\n✓ Dashboard written to: {}", report.display());
    }

    Ok(())
}
