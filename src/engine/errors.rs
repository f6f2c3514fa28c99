//! Engine error types
//!
//! Error codes:
//! - FT_ALREADY_EXISTS
//! - FT_NOT_FOUND
//! - FT_MISSING_COLUMN
//! - FT_UNKNOWN_COLUMN
//! - FT_INVALID_TYPE
//! - FT_INVALID_NAME
//! - FT_IO_FAILURE
//! - FT_INTERNAL
//!
//! Every error is recoverable. "Record not found" on update/delete is not
//! an error; it is reported as zero affected rows.

use std::fmt;
use thiserror::Error;

use crate::schema::ValidationError;
use crate::storage::StorageError;
use crate::types::DescriptorError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error categories visible to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    MissingColumn,
    UnknownColumn,
    InvalidType,
    InvalidName,
    IoFailure,
    Internal,
}

impl ErrorKind {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyExists => "FT_ALREADY_EXISTS",
            ErrorKind::NotFound => "FT_NOT_FOUND",
            ErrorKind::MissingColumn => "FT_MISSING_COLUMN",
            ErrorKind::UnknownColumn => "FT_UNKNOWN_COLUMN",
            ErrorKind::InvalidType => "FT_INVALID_TYPE",
            ErrorKind::InvalidName => "FT_INVALID_NAME",
            ErrorKind::IoFailure => "FT_IO_FAILURE",
            ErrorKind::Internal => "FT_INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Table '{0}' already exists.")]
    AlreadyExists(String),

    #[error("Table '{0}' not found.")]
    NotFound(String),

    #[error("Missing required column '{column}' in record for table '{table}'.")]
    MissingColumn { table: String, column: String },

    #[error("Column '{column}' does not exist in table '{table}'.")]
    UnknownColumn { table: String, column: String },

    #[error("Invalid data format/type for column '{column}' in table '{table}'. Expected '{expected}', got '{actual}'.")]
    InvalidType {
        table: String,
        column: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid table name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error(transparent)]
    Io(StorageError),

    /// A worker running the operation did not complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            EngineError::NotFound(_) => ErrorKind::NotFound,
            EngineError::MissingColumn { .. } => ErrorKind::MissingColumn,
            EngineError::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            EngineError::InvalidType { .. } => ErrorKind::InvalidType,
            EngineError::InvalidName { .. } => ErrorKind::InvalidName,
            EngineError::Io(_) => ErrorKind::IoFailure,
            EngineError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Attaches the table name to a validation failure
    pub fn from_validation(table: &str, err: ValidationError) -> Self {
        match err {
            ValidationError::MissingColumn(column) => EngineError::MissingColumn {
                table: table.to_string(),
                column,
            },
            ValidationError::UnknownColumn(column) => EngineError::UnknownColumn {
                table: table.to_string(),
                column,
            },
            ValidationError::InvalidType {
                column,
                expected,
                actual,
            } => EngineError::InvalidType {
                table: table.to_string(),
                column,
                expected,
                actual,
            },
        }
    }

    /// A column declared with a type outside the catalogue
    pub fn invalid_descriptor(table: &str, column: &str, err: DescriptorError) -> Self {
        EngineError::InvalidType {
            table: table.to_string(),
            column: column.to_string(),
            expected: "a supported column type".to_string(),
            actual: err.to_string(),
        }
    }
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(table) => EngineError::NotFound(table),
            other => EngineError::Io(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_kinds_and_codes() {
        assert_eq!(
            EngineError::AlreadyExists("t".into()).code(),
            "FT_ALREADY_EXISTS"
        );
        assert_eq!(EngineError::NotFound("t".into()).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_storage_not_found_maps_to_not_found() {
        let err: EngineError = StorageError::NotFound("products".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: EngineError =
            StorageError::read_failed("products", io::Error::new(io::ErrorKind::Other, "eio"))
                .into();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(err.to_string().contains("products"));
    }

    #[test]
    fn test_validation_errors_carry_table() {
        let err = EngineError::from_validation(
            "products",
            ValidationError::UnknownColumn("extra".into()),
        );
        assert_eq!(err.kind(), ErrorKind::UnknownColumn);
        assert_eq!(
            err.to_string(),
            "Column 'extra' does not exist in table 'products'."
        );
    }
}
