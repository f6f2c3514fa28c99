//! CLI error types
//!
//! A CLI error ends the process with a non-zero exit. Failed requests are
//! not CLI errors; they are answered on stdout as error responses.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::storage::StorageError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Config file unreadable, malformed or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Data directory {} already exists", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Data directory {} does not exist. Run 'flattable init' first.", .0.display())]
    NotInitialized(PathBuf),

    /// `exec` found no request line on stdin
    #[error("No request on stdin")]
    EmptyInput,

    #[error("I/O error on stdio: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The async runtime could not be built
    #[error("Failed to start runtime: {0}")]
    Runtime(io::Error),
}

impl CliError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "FT_CLI_CONFIG",
            CliError::AlreadyInitialized(_) => "FT_CLI_ALREADY_INITIALIZED",
            CliError::NotInitialized(_) => "FT_CLI_NOT_INITIALIZED",
            CliError::EmptyInput => "FT_CLI_EMPTY_INPUT",
            CliError::Io(_) => "FT_CLI_IO",
            CliError::Storage(e) => e.code(),
            CliError::Runtime(_) => "FT_CLI_RUNTIME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        let err = CliError::NotInitialized(PathBuf::from("/srv/tables"));
        assert_eq!(err.code(), "FT_CLI_NOT_INITIALIZED");
        assert_eq!(
            err.to_string(),
            "Data directory /srv/tables does not exist. Run 'flattable init' first."
        );

        let err: CliError = StorageError::NotFound("t".into()).into();
        assert_eq!(err.code(), "FT_STORAGE_NOT_FOUND");
    }
}
