//! CSV loading.

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use std::path::Path;
use tabular_core::{Dataset, Row, Table};
use tracing::debug;

/// Converts a delimiter character into the byte the CSV reader expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

/// Reads a CSV file into a table.
///
/// Rows are read as-is, ragged rows included, so that missing fields are
/// reported by the engine rather than rejected here. When `has_headers` is
/// set, the first record becomes the legend (a leading BOM is stripped).
pub fn load_csv(path: &Path, has_headers: bool, delimiter: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    let mut records = reader.records();
    let mut table = if has_headers {
        let headers: Vec<String> = match records.next() {
            Some(record) => record
                .with_context(|| format!("Failed to read legend: {}", path.display()))?
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    if idx == 0 {
                        value.trim_start_matches('\u{feff}').to_string()
                    } else {
                        value.to_string()
                    }
                })
                .collect(),
            None => Vec::new(),
        };
        Table::with_headers(headers)
    } else {
        Table::empty()
    };

    for record in records {
        let record = record.with_context(|| format!("Failed to read record: {}", path.display()))?;
        table.add_row(Row::from_values(record.iter()));
    }

    debug!(
        "Loaded {} rows from {} (headers: {})",
        table.len(),
        path.display(),
        has_headers
    );
    Ok(table)
}
