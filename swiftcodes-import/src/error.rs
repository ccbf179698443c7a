//! Error types for spreadsheet import.

use std::path::PathBuf;

use thiserror::Error;

use crate::mapping::Field;

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that abort an import before or while it runs.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The workbook could not be opened or read
    #[error("Failed to open {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    /// The workbook has no worksheet
    #[error("Workbook {0} has no worksheet")]
    NoWorksheet(PathBuf),

    /// CSV input could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is not a known spreadsheet format
    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Required fields have no matching column; nothing was imported
    #[error(
        "Could not find columns for required fields: {} (columns: {})",
        field_list(.missing),
        column_list(.found)
    )]
    MissingColumns { missing: Vec<Field>, found: Vec<String> },

    /// Record store failure outside of a single row
    #[error("Store error: {0}")]
    Store(#[from] swiftcodes_store_db::Error),
}

/// A single row that was skipped.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("row {row}: missing value for {field}")]
    MissingValue { row: usize, field: Field },

    #[error("row {row}: failed to store {code}: {source}")]
    Store {
        row: usize,
        code: String,
        #[source]
        source: swiftcodes_store_db::Error,
    },
}

fn column_list(columns: &[String]) -> String {
    columns.join(", ")
}

fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
