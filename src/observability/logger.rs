//! Structured JSON logger for flattable
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Emitted through the `log` facade; `init` installs an `env_logger`
//!   backend that writes each line to stderr unchanged

use serde_json::{Map, Value};
use std::fmt;
use std::io::Write;

/// Target used for every flattable event
pub const LOG_TARGET: &str = "flattable";

/// Environment variable holding the log filter (default `info`)
pub const LOG_ENV: &str = "FLATTABLE_LOG";

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    fn level(&self) -> log::Level {
        match self {
            Severity::Trace => log::Level::Trace,
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event logger producing one JSON object per line.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let level = severity.level();
        if log::log_enabled!(target: LOG_TARGET, level) {
            let line = Self::render(severity, event, fields);
            log::log!(target: LOG_TARGET, level, "{}", line);
        }
    }

    /// Renders an event as a single JSON line (without trailing newline).
    ///
    /// Fields are output in deterministic order (alphabetical by key).
    pub fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut object = Map::new();
        object.insert("event".into(), Value::String(event.to_string()));
        object.insert("severity".into(), Value::String(severity.as_str().to_string()));

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            object.insert((*key).to_string(), Value::String((*value).to_string()));
        }

        Value::Object(object).to_string()
    }

    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    pub fn debug(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Debug, event, fields);
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

/// Installs the stderr logger. Safe to call more than once.
pub fn init() {
    let env = env_logger::Env::new().filter_or(LOG_ENV, "info");
    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .target(env_logger::Target::Stderr)
        .try_init();
}
