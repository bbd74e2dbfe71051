//! Crash-reporting sink
//!
//! Forwards every event to a [`CrashReportTransport`]. An attached error is
//! never dropped: it is surfaced through `record_error` right after the
//! event's own report.

use crate::core::{Event, Result, Sink};
use crate::transports::CrashReportTransport;
use std::sync::Arc;

/// Sink that forwards events to a crash-reporting backend
///
/// No severity filtering, no buffering, no retry. The transport runs on
/// the logging thread, so a slow backend slows the caller down; wrap it
/// in a [`ChannelTransport`](crate::transports::ChannelTransport) to move
/// delivery onto another thread.
///
/// # Example
///
/// ```
/// use forest_logger::prelude::*;
/// use std::sync::Arc;
///
/// let transport = Arc::new(MemoryTransport::new());
/// let sink = CrashReportingSink::new(transport.clone());
///
/// let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket closed");
/// let event = Event::new(Severity::Error, "timeout")
///     .with_tag("Net")
///     .with_error(EventError::from_error(&io_err));
/// sink.handle(&event).unwrap();
///
/// assert_eq!(transport.reports()[0].message, "timeout");
/// assert_eq!(transport.errors()[0].error.description(), "socket closed");
/// ```
pub struct CrashReportingSink {
    transport: Arc<dyn CrashReportTransport>,
    derive_tags: bool,
}

impl CrashReportingSink {
    pub fn new(transport: Arc<dyn CrashReportTransport>) -> Self {
        Self {
            transport,
            derive_tags: false,
        }
    }

    /// Forward the caller's module name as the tag when an event has none
    ///
    /// Default: disabled, untagged events are forwarded without a tag.
    #[must_use]
    pub fn with_derived_tags(mut self, enable: bool) -> Self {
        self.derive_tags = enable;
        self
    }
}

impl Sink for CrashReportingSink {
    fn handle(&self, event: &Event) -> Result<()> {
        let tag = if self.derive_tags {
            event.effective_tag()
        } else {
            event.tag()
        };

        let reported = self.transport.report(event.severity(), tag, event.message());

        // Surface the error even if the report itself failed
        let surfaced = event.error().map_or(Ok(()), |error| {
            self.transport.record_error(event.severity(), tag, error)
        });

        reported.and(surfaced)
    }

    fn flush(&self) -> Result<()> {
        self.transport.flush()
    }

    fn name(&self) -> &str {
        "crash_reporting"
    }
}
