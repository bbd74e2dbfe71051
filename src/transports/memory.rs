//! In-memory transport

use super::{CrashReportTransport, ErrorReport, Report, TransportRecord};
use crate::core::{EventError, Result, Severity};
use parking_lot::Mutex;

/// Transport that keeps every call in memory, in call order
///
/// Useful as a stand-in backend in tests and for inspecting what a
/// crash-reporting sink would have sent.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    records: Mutex<Vec<TransportRecord>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call
    pub fn records(&self) -> Vec<TransportRecord> {
        self.records.lock().clone()
    }

    /// Only the `report` calls
    pub fn reports(&self) -> Vec<Report> {
        self.records
            .lock()
            .iter()
            .filter_map(|record| match record {
                TransportRecord::Report(report) => Some(report.clone()),
                TransportRecord::Error(_) => None,
            })
            .collect()
    }

    /// Only the `record_error` calls
    pub fn errors(&self) -> Vec<ErrorReport> {
        self.records
            .lock()
            .iter()
            .filter_map(|record| match record {
                TransportRecord::Error(report) => Some(report.clone()),
                TransportRecord::Report(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl CrashReportTransport for MemoryTransport {
    fn report(&self, severity: Severity, tag: Option<&str>, message: &str) -> Result<()> {
        self.records
            .lock()
            .push(TransportRecord::Report(Report::new(severity, tag, message)));
        Ok(())
    }

    fn record_error(
        &self,
        severity: Severity,
        tag: Option<&str>,
        error: &EventError,
    ) -> Result<()> {
        self.records
            .lock()
            .push(TransportRecord::Error(ErrorReport::new(severity, tag, error)));
        Ok(())
    }
}
