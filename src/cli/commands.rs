//! CLI command implementations
//!
//! Every command loads the configuration first. `start` and `exec` open the
//! file store in the configured data directory and route requests through
//! `ApiHandler` on a tokio runtime.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::runtime::Runtime;

use crate::api::{ApiHandler, Response};
use crate::engine::{CreatePolicy, Engine, SharedEngine};
use crate::observability::{log_event, Event};
use crate::storage::{JsonFileStore, StorageError};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_requests, write_json};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one `<table>.json` file per table (required)
    pub data_dir: String,

    /// Create missing tables on insert (default: true)
    #[serde(default = "default_true")]
    pub create_if_absent: bool,

    /// Pretty-print table files (default: true)
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("Invalid JSON in {}: {}", path.display(), e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::Config("data_dir must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Insert policy derived from `create_if_absent`
    pub fn create_policy(&self) -> CreatePolicy {
        if self.create_if_absent {
            CreatePolicy::CreateIfAbsent
        } else {
            CreatePolicy::RequireExisting
        }
    }

    /// Open the file store and wrap it in a shared engine
    pub fn open_engine(&self) -> CliResult<SharedEngine<JsonFileStore>> {
        let store = JsonFileStore::open(self.data_path())?.with_pretty(self.pretty);
        let engine = Engine::new(store).with_policy(self.create_policy());
        Ok(SharedEngine::new(engine))
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
        Command::Exec { config } => exec(&config),
    }
}

/// Create the data directory.
///
/// Refuses a directory that already exists.
pub fn init(config_path: &Path) -> CliResult<()> {
    init_with(config_path, &mut io::stdout())
}

fn init_with<W: Write>(config_path: &Path, writer: &mut W) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(data_dir) {
        return Err(CliError::AlreadyInitialized(data_dir.to_path_buf()));
    }

    fs::create_dir_all(data_dir)
        .map_err(|e| StorageError::write_failed(data_dir.display().to_string(), e))?;

    log_event(Event::Initialized, &[("data_dir", &config.data_dir)]);
    let response = Response::success(json!({"initialized": true}));
    write_json(writer, &response.to_json())?;

    Ok(())
}

/// Serve requests from stdin, one per line, until EOF.
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let (runtime, handler) = boot(&config)?;

    log_event(Event::Serving, &[("data_dir", &config.data_dir)]);
    let stdin = io::stdin();
    let served = serve(&runtime, &handler, stdin.lock(), &mut io::stdout())?;
    log_event(
        Event::ShutdownComplete,
        &[("requests", &served.to_string())],
    );

    Ok(())
}

/// Execute a single request from stdin and exit
pub fn exec(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let (runtime, handler) = boot(&config)?;

    let stdin = io::stdin();
    let request = read_request(&mut stdin.lock())?;
    let response = runtime.block_on(handler.handle(&request));
    write_json(&mut io::stdout(), &response.to_json())
}

/// Answer every request line in `reader` on `writer`. Returns the number of
/// requests served.
pub fn serve<R: BufRead, W: Write>(
    runtime: &Runtime,
    handler: &ApiHandler<JsonFileStore>,
    reader: R,
    writer: &mut W,
) -> CliResult<usize> {
    let mut served = 0;
    for request in read_requests(reader) {
        let request = request?;
        let response = runtime.block_on(handler.handle(&request));
        write_json(writer, &response.to_json())?;
        served += 1;
    }
    Ok(served)
}

/// A data directory is initialized once it exists
fn is_initialized(data_dir: &Path) -> bool {
    data_dir.is_dir()
}

fn boot(config: &Config) -> CliResult<(Runtime, ApiHandler<JsonFileStore>)> {
    if !is_initialized(config.data_path()) {
        return Err(CliError::NotInitialized(config.data_path().to_path_buf()));
    }

    let runtime = Runtime::new().map_err(CliError::Runtime)?;
    let handler = ApiHandler::new(config.open_engine()?);

    Ok((runtime, handler))
}
