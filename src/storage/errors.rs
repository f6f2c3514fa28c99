//! Storage error types
//!
//! Error codes:
//! - FT_STORAGE_NOT_FOUND
//! - FT_STORAGE_READ_FAILED
//! - FT_STORAGE_WRITE_FAILED
//! - FT_STORAGE_CORRUPT

use std::io;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Table store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// No persisted table under this name
    #[error("Table '{0}' not found")]
    NotFound(String),

    /// The table file exists but could not be read
    #[error("Error reading table {table}: {source}")]
    ReadFailed {
        table: String,
        #[source]
        source: io::Error,
    },

    /// The table could not be persisted
    #[error("Error writing table {table}: {source}")]
    WriteFailed {
        table: String,
        #[source]
        source: io::Error,
    },

    /// The table file is not a valid table document
    #[error("Malformed table file {table}: {reason}")]
    Corrupt { table: String, reason: String },
}

impl StorageError {
    pub fn read_failed(table: impl Into<String>, source: io::Error) -> Self {
        StorageError::ReadFailed {
            table: table.into(),
            source,
        }
    }

    pub fn write_failed(table: impl Into<String>, source: io::Error) -> Self {
        StorageError::WriteFailed {
            table: table.into(),
            source,
        }
    }

    pub fn corrupt(table: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Corrupt {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::NotFound(_) => "FT_STORAGE_NOT_FOUND",
            StorageError::ReadFailed { .. } => "FT_STORAGE_READ_FAILED",
            StorageError::WriteFailed { .. } => "FT_STORAGE_WRITE_FAILED",
            StorageError::Corrupt { .. } => "FT_STORAGE_CORRUPT",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
