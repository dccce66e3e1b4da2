//! Error types for indexdoclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building an index document
#[derive(Error, Debug)]
pub enum IndexError {
    /// Input spreadsheet is missing or could not be opened
    #[error("failed to read input '{path}': {reason}")]
    InputNotFound { path: PathBuf, reason: String },

    /// File extension is not a spreadsheet format we can read
    #[error("unsupported input format: {0} (expected .xlsx, .xlsm, .xlsb, .xls or .ods)")]
    UnsupportedFormat(PathBuf),

    /// Requested worksheet does not exist
    #[error("worksheet not found: {0}")]
    SheetNotFound(String),

    /// Grouping, sort or schema column is not part of the table
    #[error("column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// Input has no columns or no data rows
    #[error("input table is empty: {0}")]
    EmptyInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to package the output document
    #[error("failed to write document archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl IndexError {
    /// Build a `MissingColumn` error for `column` given the available columns.
    pub fn missing_column(column: impl Into<String>, available: &[String]) -> Self {
        IndexError::MissingColumn {
            column: column.into(),
            available: available.to_vec(),
        }
    }
}
