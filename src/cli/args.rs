//! CLI argument definitions using clap
//!
//! Commands:
//! - flattable init --config <path>
//! - flattable start --config <path>
//! - flattable exec --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// flattable - typed tables stored as flat JSON files
#[derive(Parser, Debug)]
#[command(name = "flattable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./flattable.json")]
        config: PathBuf,
    },

    /// Serve JSON-lines requests from stdin until EOF
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./flattable.json")]
        config: PathBuf,
    },

    /// Execute a single request from stdin and exit
    Exec {
        /// Path to configuration file
        #[arg(long, default_value = "./flattable.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
