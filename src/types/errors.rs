//! Descriptor parse errors

use thiserror::Error;

/// Failure to parse a rendered type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Family name not in the catalogue
    #[error("unknown column type '{0}'")]
    UnknownType(String),

    /// Parameter list present but malformed
    #[error("malformed parameters in column type '{0}'")]
    MalformedParameters(String),

    /// Parameters given to a family that takes none, or the wrong count
    #[error("column type '{family}' does not accept {count} parameter(s)")]
    UnexpectedParameters { family: String, count: usize },
}
