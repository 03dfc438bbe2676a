//! Markdown report generation
//!
//! This module renders scrape runs, dashboards and dataset previews as
//! human-readable markdown.

use crate::crawler::ScrapeRun;
use crate::output::dataset::Table;
use crate::output::stats::DashboardStats;
use crate::state::PageOutcome;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Width of the longest bar in the category chart
const BAR_WIDTH: usize = 40;

/// Writes a markdown document to `output_path`
pub fn write_markdown(markdown: &str, output_path: &Path) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;
    Ok(())
}

/// Formats a scrape run as markdown
///
/// # Arguments
///
/// * `run` - The finished run
/// * `config_hash` - Fingerprint of the configuration file, if one was used
pub fn format_run_report(run: &ScrapeRun, config_hash: Option<&str>) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Scrape Report: {}\n\n", run.category.label));

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Category**: {} (`{}`)\n", run.category.label, run.category.type_tag));
    md.push_str(&format!("- **Source**: {}\n", run.category.base_url));
    md.push_str(&format!("- **Pages requested**: {}\n", run.requested_pages));
    md.push_str(&format!("- **Started**: {}\n", run.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", run.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        run.duration().num_seconds()
    ));
    if let Some(hash) = config_hash {
        md.push_str(&format!("- **Config hash**: `{}`\n", hash));
    }
    md.push('\n');

    md.push_str("## Results\n\n");
    md.push_str(&format!("- **Records**: {}\n", run.records.len()));
    md.push_str(&format!(
        "- **Pages with records**: {}\n",
        run.outcomes.values().filter(|o| o.is_success()).count()
    ));
    md.push_str(&format!("- **Failed pages**: {}\n", run.failed_pages.len()));
    md.push_str(&format!(
        "- **Pages without results**: {}\n",
        run.pages_with_zero_results.len()
    ));
    md.push_str(&format!("- **Skipped listings**: {}\n\n", run.skipped_items));

    if run.is_empty() {
        md.push_str("> No data could be retrieved. Check the CSS selectors.\n\n");
    }

    md.push_str("## Pages\n\n");
    md.push_str("| Page | Outcome |\n");
    md.push_str("|------|---------|\n");
    for (page, outcome) in &run.outcomes {
        let cell = match outcome {
            PageOutcome::Scraped(n) => format!("{} records", n),
            PageOutcome::Empty(reason) => format!("empty `{}`", reason.code()),
            PageOutcome::FetchFailed(error) => format!("failed: {}", escape_cell(error)),
        };
        md.push_str(&format!("| {} | {} |\n", page, cell));
    }
    md.push('\n');

    md
}

/// Formats dashboard statistics as markdown, with a text bar chart
pub fn format_dashboard(stats: &DashboardStats) -> String {
    let mut md = String::new();

    md.push_str("# Dashboard\n\n");

    md.push_str("## Key Figures\n\n");
    md.push_str(&format!("- **Total listings**: {}\n", stats.total_listings));
    md.push_str(&format!("- **Categories**: {}\n", stats.category_count));
    match stats.average_price {
        Some(avg) => md.push_str(&format!("- **Average price**: {:.0} FCFA\n\n", avg)),
        None => md.push_str("- **Average price**: n/a\n\n"),
    }

    md.push_str("## Listings by Category\n\n");
    md.push_str("```text\n");
    md.push_str(&format_bar_chart(&stats.by_category));
    md.push_str("```\n\n");

    if !stats.top_priced.is_empty() {
        md.push_str(&format!(
            "## Top {} Most Expensive Listings\n\n",
            stats.top_priced.len()
        ));
        md.push_str("| Name | Price | Category |\n");
        md.push_str("|------|-------|----------|\n");
        for record in &stats.top_priced {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(&record.name),
                escape_cell(&record.price_text),
                escape_cell(&record.category_label)
            ));
        }
        md.push('\n');
    }

    md
}

/// Renders `(label, count)` pairs as horizontal bars scaled to the largest count
pub fn format_bar_chart(counts: &[(String, usize)]) -> String {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let label_width = counts
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut chart = String::new();
    for (label, count) in counts {
        let bar = if max == 0 {
            0
        } else {
            // Any non-zero count gets at least one block
            ((count * BAR_WIDTH + max / 2) / max).max(usize::from(*count > 0))
        };
        let padding = label_width - label.chars().count();
        chart.push_str(&format!(
            "{}{} | {} {}\n",
            label,
            " ".repeat(padding),
            "█".repeat(bar),
            count
        ));
    }
    chart
}

/// Formats the first `rows` rows of a table as a markdown table
pub fn format_table_preview(table: &Table, rows: usize) -> String {
    let mut md = String::new();
    if table.headers.is_empty() {
        return md;
    }

    let header: Vec<String> = table.headers.iter().map(|h| escape_cell(h)).collect();
    md.push_str(&format!("| {} |\n", header.join(" | ")));
    md.push_str(&format!("|{}\n", "---|".repeat(table.headers.len())));

    for row in table.head(rows) {
        let cells: Vec<String> = (0..table.headers.len())
            .map(|i| row.get(i).map(|c| escape_cell(c)).unwrap_or_default())
            .collect();
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    md
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::crawler::ListingRecord;
    use crate::state::EmptyPageReason;
    use chrono::Utc;
    use std::collections::{BTreeMap, BTreeSet};
    use url::Url;

    fn run() -> ScrapeRun {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(1, PageOutcome::Scraped(1));
        outcomes.insert(2, PageOutcome::FetchFailed("HTTP status 503".to_string()));
        outcomes.insert(3, PageOutcome::Empty(EmptyPageReason::CategoryExhausted));

        ScrapeRun {
            category: Category::new(
                "Les Chiens",
                Url::parse("https://sn.coinafrique.com/categorie/chiens").unwrap(),
                "chien",
            ),
            requested_pages: 3,
            records: vec![ListingRecord {
                category_label: "Les Chiens".to_string(),
                name: "Berger".to_string(),
                price_text: "150000 FCFA".to_string(),
                address_text: "Dakar".to_string(),
                image_url: String::new(),
                source_page: 1,
            }],
            pages_with_zero_results: BTreeSet::from([3]),
            failed_pages: BTreeMap::from([(2, "HTTP status 503".to_string())]),
            outcomes,
            skipped_items: 0,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_run_report() {
        let md = format_run_report(&run(), Some("abc123"));
        assert!(md.contains("# Scrape Report: Les Chiens"));
        assert!(md.contains("- **Records**: 1"));
        assert!(md.contains("- **Pages with records**: 1"));
        assert!(md.contains("- **Failed pages**: 1"));
        assert!(md.contains("| 2 | failed: HTTP status 503 |"));
        assert!(md.contains("| 3 | empty `W-EXHAUSTED` |"));
        assert!(md.contains("`abc123`"));
        assert!(!md.contains("No data could be retrieved"));
    }

    #[test]
    fn test_bar_chart_scaling() {
        let chart = format_bar_chart(&[("Moutons".to_string(), 10), ("Chiens".to_string(), 1)]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], format!("Moutons | {} 10", "█".repeat(40)));
        assert_eq!(lines[1], format!("Chiens  | {} 1", "█".repeat(4)));
    }

    #[test]
    fn test_bar_chart_small_count_visible() {
        let chart = format_bar_chart(&[("A".to_string(), 1000), ("B".to_string(), 1)]);
        assert!(chart.lines().nth(1).unwrap().contains("█ 1"));
    }

    #[test]
    fn test_dashboard() {
        let stats = DashboardStats::from_records(&run().records, 10);
        let md = format_dashboard(&stats);
        assert!(md.contains("- **Total listings**: 1"));
        assert!(md.contains("- **Average price**: 150000 FCFA"));
        assert!(md.contains("| Berger | 150000 FCFA | Les Chiens |"));
    }

    #[test]
    fn test_table_preview_pads_short_rows() {
        let table = Table {
            headers: vec!["nom".to_string(), "prix".to_string()],
            rows: vec![
                vec!["Bélier".to_string(), "5|0".to_string()],
                vec!["Agneau".to_string()],
            ],
        };
        let md = format_table_preview(&table, 5);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "| nom | prix |");
        assert_eq!(lines[1], "|---|---|");
        assert_eq!(lines[2], "| Bélier | 5\\|0 |");
        assert_eq!(lines[3], "| Agneau |  |");
    }
}
