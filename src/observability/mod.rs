//! Observability subsystem for flattable
//!
//! Structured JSON logging of lifecycle and data events.
//!
//! # Usage
//!
//! ```ignore
//! use flattable::observability::{self, Event, Logger};
//!
//! observability::init();
//! observability::log_event(Event::TableCreated, &[("table", "products")]);
//! Logger::warn("table_load_failed", &[("table", "products")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init, Logger, Severity, LOG_ENV, LOG_TARGET};

/// Log an event at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
