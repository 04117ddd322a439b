//! Error types for Libris core operations.
//!
//! Only genuine storage and decoding failures are errors. Business-rule
//! outcomes (book unavailable, loan already returned) are ordinary return
//! values on the catalog and never reach this type.

use thiserror::Error;

/// Result type alias for Libris operations.
pub type Result<T> = std::result::Result<T, LibrisError>;

/// Core error type for Libris operations.
#[derive(Debug, Error)]
pub enum LibrisError {
    /// Storage backend error (unreadable or unwritable table)
    #[error("Storage error: {0}")]
    Storage(String),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(String),

    /// A stored row could not be mapped onto its record
    #[error("Corrupt {table} row: {reason}")]
    Corrupt { table: &'static str, reason: String },

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LibrisError {
    pub(crate) fn corrupt(table: &'static str, reason: impl Into<String>) -> Self {
        LibrisError::Corrupt {
            table,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for LibrisError {
    fn from(err: std::io::Error) -> Self {
        LibrisError::Storage(err.to_string())
    }
}

impl From<csv::Error> for LibrisError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return LibrisError::Storage(err.to_string());
        }
        LibrisError::Csv(err.to_string())
    }
}
