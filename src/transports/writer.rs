//! JSON lines transport

use super::{CrashReportTransport, ErrorReport, Report, TransportRecord};
use crate::core::{EventError, Result, Severity};
use parking_lot::Mutex;
use std::io::Write;

/// Transport that writes each record as one JSON object per line
///
/// Works with any `Write`: a file, a socket, or stdout for local runs.
pub struct WriterTransport<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_record(&self, record: &TransportRecord) -> Result<()> {
        let line = record.to_json()?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        Ok(())
    }
}

impl<W: Write + Send> CrashReportTransport for WriterTransport<W> {
    fn report(&self, severity: Severity, tag: Option<&str>, message: &str) -> Result<()> {
        self.write_record(&TransportRecord::Report(Report::new(severity, tag, message)))
    }

    fn record_error(
        &self,
        severity: Severity,
        tag: Option<&str>,
        error: &EventError,
    ) -> Result<()> {
        self.write_record(&TransportRecord::Error(ErrorReport::new(severity, tag, error)))
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}
