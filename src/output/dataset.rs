//! Previously stored CSV datasets
//!
//! Raw files come from an external scraping tool and have whatever columns
//! that tool produced, so they load as a plain `Table`. The cleaned aggregate
//! has listing columns and loads as `ListingRecord`s.

use crate::config::DatasetsConfig;
use crate::crawler::ListingRecord;
use crate::ScrapeError;
use std::path::Path;

/// A CSV file held in memory as strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// The first `n` rows
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Re-serializes the table as UTF-8 CSV
    pub fn to_delimited_text(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

/// Loads any CSV file with a header row
///
/// Rows may have a different number of fields than the header.
pub fn load_table(path: &Path) -> Result<Table, ScrapeError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let rows = reader
        .records()
        .map(|row| row.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    tracing::debug!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(Table { headers, rows })
}

/// Loads listing records from an exported or cleaned CSV file
///
/// Accepts both the export column names and the French column names of the
/// cleaned dataset. Extra columns are ignored.
pub fn load_records(path: &Path) -> Result<Vec<ListingRecord>, ScrapeError> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<ListingRecord>, csv::Error>>()?;

    tracing::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Path of the raw dataset stored for `label`
pub fn raw_dataset_path<'a>(config: &'a DatasetsConfig, label: &str) -> Result<&'a Path, ScrapeError> {
    config
        .raw
        .iter()
        .find(|entry| entry.label == label)
        .map(|entry| Path::new(entry.path.as_str()))
        .ok_or_else(|| ScrapeError::UnknownDataset(label.to_string()))
}

/// File name offered when re-exporting a raw dataset
///
/// `"Les Moutons"` becomes `Les_Moutons_raw.csv`.
pub fn raw_file_name(label: &str) -> String {
    format!("{}_raw.csv", label.replace(' ', "_"))
}
