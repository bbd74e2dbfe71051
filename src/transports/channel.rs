//! Channel transport
//!
//! Hands every record to a crossbeam channel so that a thread owned by the
//! application can talk to the real backend. The sink itself stays
//! synchronous; only the hand-off happens on the logging thread.

use super::{CrashReportTransport, ErrorReport, Report, TransportRecord};
use crate::core::{EventError, ForestError, Result, Severity};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};

/// Transport that forwards records over a channel
///
/// # Example
///
/// ```
/// use forest_logger::transports::{ChannelTransport, CrashReportTransport};
/// use forest_logger::Severity;
///
/// let (transport, receiver) = ChannelTransport::bounded(16);
/// transport.report(Severity::Error, Some("Net"), "timeout").unwrap();
///
/// let record = receiver.try_recv().unwrap();
/// assert_eq!(record.severity(), Severity::Error);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: Sender<TransportRecord>,
}

impl ChannelTransport {
    /// Create a transport backed by a bounded channel
    ///
    /// When the channel is full the record is rejected with
    /// [`ForestError::Transport`] rather than blocking the logging thread.
    pub fn bounded(capacity: usize) -> (Self, Receiver<TransportRecord>) {
        let (sender, receiver) = bounded(capacity);
        (Self { sender }, receiver)
    }

    pub fn unbounded() -> (Self, Receiver<TransportRecord>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    fn send(&self, record: TransportRecord) -> Result<()> {
        match self.sender.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ForestError::transport(format!(
                "channel full ({} records buffered)",
                self.sender.len()
            ))),
            Err(TrySendError::Disconnected(_)) => Err(ForestError::TransportDisconnected),
        }
    }
}

impl CrashReportTransport for ChannelTransport {
    fn report(&self, severity: Severity, tag: Option<&str>, message: &str) -> Result<()> {
        self.send(TransportRecord::Report(Report::new(severity, tag, message)))
    }

    fn record_error(
        &self,
        severity: Severity,
        tag: Option<&str>,
        error: &EventError,
    ) -> Result<()> {
        self.send(TransportRecord::Error(ErrorReport::new(severity, tag, error)))
    }
}
