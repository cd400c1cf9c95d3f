//! Error types for the filter-and-summarize pipeline.

use thiserror::Error;

/// Errors raised while turning uploaded bytes into a [`Table`](super::model::Table).
#[derive(Error, Debug)]
pub enum ParseError {
    /// No bytes, or only whitespace.
    #[error("the uploaded file is empty")]
    Empty,

    /// The first record has no usable column names.
    #[error("the file has no header row")]
    MissingHeader,

    /// A data record does not have as many fields as the header.
    #[error("line {line}: expected {expected} fields but found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Anything the CSV reader itself rejects (invalid UTF-8, bad quoting).
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised by a bad user selection against a parsed table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("column '{0}' does not exist in the uploaded data")]
    ColumnNotFound(String),

    #[error("column '{0}' is not numeric and cannot be filtered by a threshold")]
    NonNumericColumn(String),
}
