//! Error types for the data-loader crate.
//!
//! File-level failures (`FileNotFound`, `IoError`) are returned to the caller
//! of the `read_*`/`parse_*` functions. Row-level failures (`ParseError`,
//! `FieldCountMismatch`) never escape a loader: the offending row is logged
//! and skipped.

use thiserror::Error;

/// Errors that can occur during data loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Row in a data file couldn't be parsed
    #[error("Parse error at row {row} in {file}: {reason}")]
    ParseError {
        file: String,
        row: usize,
        reason: String,
    },

    /// Row has fewer fields than the table needs
    #[error("Expected at least {expected} fields but found {found} at row {row} in {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        row: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
