//! CLI module for flattable
//!
//! Provides command-line interface for:
//! - init: Create the data directory
//! - start: Serve JSON-lines requests from stdin
//! - exec: One-shot request execution

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{exec, init, run, run_command, serve, start, Config};
pub use errors::{CliError, CliResult};
pub use io::{read_request, read_requests, write_json};
