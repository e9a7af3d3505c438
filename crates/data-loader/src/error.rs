//! Error types for the data-loader crate.
//!
//! Every fallible operation in this crate returns [`Result<T>`], which wraps
//! a [`DataLoadError`]. Row-level problems in the raw CSVs are not errors:
//! the cleaning step drops those rows and counts them in a report instead.

use thiserror::Error;

/// Errors that can occur during data loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader failed before any row could be decoded (bad headers, etc.)
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Line in a cleaned data file couldn't be decoded
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A stringified literal (nested column) is malformed
    #[error("Literal syntax error at byte {position}: {reason}")]
    LiteralSyntax { position: usize, reason: String },

    /// Serializing a cleaned record failed
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
