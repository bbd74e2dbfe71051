//! Crash-report transports
//!
//! A transport is the receiving end of [`CrashReportingSink`](crate::sinks::CrashReportingSink).
//! The remote backend and its wire protocol live outside this crate; the
//! implementations here cover in-process inspection, hand-off to another
//! thread, and JSON lines on any writer.

pub mod channel;
pub mod memory;
pub mod writer;

pub use channel::ChannelTransport;
pub use memory::MemoryTransport;
pub use writer::WriterTransport;

use crate::core::{EventError, Result, Severity};
use serde::{Deserialize, Serialize};

/// Receiving end of forwarded log events
///
/// Calls are fire-and-forget from the sink's point of view: an `Err` is
/// handed back to the dispatcher as a sink failure and never retried.
pub trait CrashReportTransport: Send + Sync {
    /// Record one log event
    fn report(&self, severity: Severity, tag: Option<&str>, message: &str) -> Result<()>;

    /// Record the error attached to the event that was just reported
    fn record_error(&self, severity: Severity, tag: Option<&str>, error: &EventError)
        -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// A `report` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub severity: Severity,
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub message: String,
}

impl Report {
    pub fn new(severity: Severity, tag: Option<&str>, message: &str) -> Self {
        Self {
            severity,
            priority: severity.priority(),
            tag: tag.map(String::from),
            message: message.to_string(),
        }
    }
}

/// A `record_error` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub error: EventError,
}

impl ErrorReport {
    pub fn new(severity: Severity, tag: Option<&str>, error: &EventError) -> Self {
        Self {
            severity,
            tag: tag.map(String::from),
            error: error.clone(),
        }
    }
}

/// Either kind of transport call, in the order they were made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportRecord {
    Report(Report),
    Error(ErrorReport),
}

impl TransportRecord {
    pub fn severity(&self) -> Severity {
        match self {
            TransportRecord::Report(report) => report.severity,
            TransportRecord::Error(report) => report.severity,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = TransportRecord::Report(Report::new(Severity::Error, Some("Net"), "timeout"));
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(value["kind"], "report");
        assert_eq!(value["severity"], "Error");
        assert_eq!(value["priority"], 6);
        assert_eq!(value["tag"], "Net");
        assert_eq!(value["message"], "timeout");
    }

    #[test]
    fn test_error_record_keeps_description() {
        let error = EventError::from_description("socket closed").with_cause("peer reset");
        let record = TransportRecord::Error(ErrorReport::new(Severity::Warn, None, &error));
        let json = record.to_json().unwrap();

        assert!(json.contains("\"kind\":\"error\""));
        assert!(json.contains("socket closed"));
        assert!(json.contains("peer reset"));
        assert!(!json.contains("\"tag\""));

        let parsed: TransportRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
