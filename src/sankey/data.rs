use super::error::Result;
use super::table::{CategoryValue, Column, Table};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a CSV file into a table named after the file stem
pub fn load_csv(path: &Path) -> Result<Table> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = File::open(path)?;
    parse_csv(&name, file)
}

/// Parse CSV data into a table
///
/// The first record is the header. Every cell becomes a string value, kept
/// verbatim. Rows with a missing or blank cell are dropped, as are rows whose
/// cell count differs from the header (too short or too long).
pub fn parse_csv<R: Read>(name: &str, reader: R) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let mut columns: Vec<Column> = headers
        .iter()
        .map(|h| Column::new(h.clone(), Vec::new()))
        .collect();

    let mut kept = 0usize;
    let mut dropped = 0usize;
    let mut ragged = 0usize;
    for result in reader.records() {
        let record = result?;
        if record.len() != headers.len() {
            ragged += 1;
            continue;
        }
        if record.iter().any(|cell| cell.trim().is_empty()) {
            dropped += 1;
            continue;
        }
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.values.push(CategoryValue::Str(cell.to_string()));
        }
        kept += 1;
    }

    if ragged > 0 {
        tracing::warn!(
            table = name,
            ragged,
            expected = headers.len(),
            "dropped rows with a cell count different from the header"
        );
    }
    if dropped > 0 {
        tracing::warn!(table = name, dropped, "dropped rows with missing values");
    }
    tracing::debug!(table = name, columns = ?headers, rows = kept, "parsed CSV");

    Table::new(name, columns)
}
