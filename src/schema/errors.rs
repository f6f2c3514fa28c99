//! Record validation errors
//!
//! Each variant names the offending column; the engine attaches the table.

use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a record or patch does not conform to its table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A declared column is absent from the record
    #[error("Missing required column '{0}' in record")]
    MissingColumn(String),

    /// The record carries a column the table does not declare
    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),

    /// The value does not satisfy the column type
    #[error("Invalid data format/type for column '{column}': expected {expected}, got {actual}")]
    InvalidType {
        column: String,
        expected: String,
        actual: String,
    },
}

impl ValidationError {
    pub fn invalid_type(
        column: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidType {
            column: column.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// The column this error is about
    pub fn column(&self) -> &str {
        match self {
            ValidationError::MissingColumn(c) | ValidationError::UnknownColumn(c) => c,
            ValidationError::InvalidType { column, .. } => column,
        }
    }
}
