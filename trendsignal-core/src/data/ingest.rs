//! CSV ingestion into an `OhlcvTable`.
//!
//! Validation order matters and is fixed:
//! 1. the bytes must parse as CSV with a header row (`InvalidFormat`)
//! 2. at least one data row must exist (`Empty`)
//! 3. a `close` column must exist, case-sensitive (`MissingColumn`)

use std::path::Path;

use thiserror::Error;

use crate::data::table::{Column, ColumnData, OhlcvTable};

/// The only column the pipeline requires.
pub const CLOSE_COLUMN: &str = "close";

/// Errors from the data loading layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("cannot read input '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("empty input")]
    Empty,

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

/// A parsed table plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: OhlcvTable,
    /// BLAKE3 hex digest of the raw input bytes.
    pub fingerprint: String,
}

/// Read a CSV file and parse it. The file handle is closed before parsing starts.
pub fn load_csv_file(path: &Path) -> Result<LoadedTable, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_csv(&bytes)
}

/// Parse CSV bytes (header row required) into a typed table.
pub fn load_csv(bytes: &[u8]) -> Result<LoadedTable, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| InputError::InvalidFormat(e.to_string()))?
        .clone();

    if headers.is_empty() {
        return Err(InputError::InvalidFormat("no header row".into()));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| InputError::InvalidFormat(e.to_string()))?;
        for (col, field) in cells.iter_mut().zip(record.iter()) {
            col.push(field.to_string());
        }
    }

    if cells[0].is_empty() {
        return Err(InputError::Empty);
    }

    if !headers.iter().any(|h| h == CLOSE_COLUMN) {
        return Err(InputError::MissingColumn(CLOSE_COLUMN.into()));
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .map(|(name, raw)| Column::new(name, ColumnData::infer(raw)))
        .collect();

    let table = OhlcvTable::from_columns(columns)
        .ok_or_else(|| InputError::InvalidFormat("columns differ in length".into()))?;

    Ok(LoadedTable {
        table,
        fingerprint: blake3::hash(bytes).to_hex().to_string(),
    })
}
