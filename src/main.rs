//! flattable CLI entry point
//!
//! Installs the logger, dispatches to the CLI module, prints errors to
//! stderr and exits non-zero on failure.

use flattable::{cli, observability};

fn main() {
    observability::init();

    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
