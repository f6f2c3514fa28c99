//! Observable events
//!
//! Events are explicit and typed; their string form is the `event` key of
//! the log line.

use std::fmt;

use super::logger::Severity;

/// Observable events in flattable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Data directory initialized
    Initialized,
    /// Request loop ready
    Serving,
    /// Request loop finished
    ShutdownComplete,

    // Table lifecycle
    /// Table created explicitly
    TableCreated,
    /// Table created implicitly by an insert
    TableAutoCreated,

    // Record lifecycle
    RecordInserted,
    RecordUpdated,
    RecordDeleted,

    /// An operation failed with a caller-visible error
    OperationRejected,
}

impl Event {
    /// Returns the event name as it appears in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Initialized => "initialized",
            Event::Serving => "serving",
            Event::ShutdownComplete => "shutdown_complete",
            Event::TableCreated => "table_created",
            Event::TableAutoCreated => "table_auto_created",
            Event::RecordInserted => "record_inserted",
            Event::RecordUpdated => "record_updated",
            Event::RecordDeleted => "record_deleted",
            Event::OperationRejected => "operation_rejected",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::RecordInserted | Event::RecordUpdated | Event::RecordDeleted => {
                Severity::Debug
            }
            Event::OperationRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_snake_case() {
        let events = [
            Event::Initialized,
            Event::Serving,
            Event::ShutdownComplete,
            Event::TableCreated,
            Event::TableAutoCreated,
            Event::RecordInserted,
            Event::RecordUpdated,
            Event::RecordDeleted,
            Event::OperationRejected,
        ];
        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn test_rejections_are_warnings() {
        assert_eq!(Event::OperationRejected.severity(), Severity::Warn);
        assert_eq!(Event::TableCreated.severity(), Severity::Info);
    }
}
