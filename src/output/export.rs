//! CSV export of scraped records

use crate::catalog::Category;
use crate::crawler::ListingRecord;
use crate::ScrapeError;
use std::path::{Path, PathBuf};

/// Column order of exported files, matching `ListingRecord`'s fields
pub const CSV_HEADERS: [&str; 6] = [
    "category_label",
    "name",
    "price_text",
    "address_text",
    "image_url",
    "source_page",
];

/// Serializes records as UTF-8 CSV
///
/// Always writes the header row, even for an empty slice. Records are
/// written in the given order with no filtering. Writing into memory only
/// fails if a record cannot be serialized, which a flat `ListingRecord`
/// never triggers.
pub fn to_delimited_text(records: &[ListingRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Writes the export of `records` into `dir` under the category's file name
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(ScrapeError)` - Failed to create the directory or write the file
pub fn write_export(
    records: &[ListingRecord],
    dir: &Path,
    category: &Category,
) -> Result<PathBuf, ScrapeError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(category.export_file_name());
    std::fs::write(&path, to_delimited_text(records)?)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(path)
}
