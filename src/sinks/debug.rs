//! Debug sink: verbose local output for development builds

use crate::core::{Event, Result, Severity, Sink};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

enum Output {
    Console,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Sink that writes every event, unfiltered, for a developer to read
///
/// Each event becomes one line:
/// `2024-01-01 12:00:00.000 main E/Net: timeout`, followed by the attached
/// error and its causes on indented lines. On the console, Error and Assert
/// go to stderr and everything else to stdout.
pub struct DebugSink {
    use_colors: bool,
    output: Output,
}

impl DebugSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            output: Output::Console,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            output: Output::Console,
        }
    }

    /// Write to `writer` instead of stdout/stderr, without colors
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            use_colors: false,
            output: Output::Writer(Mutex::new(Box::new(writer))),
        }
    }

    fn format_event(&self, event: &Event) -> String {
        let tag = event.effective_tag().unwrap_or("-");
        let label = format!("{}/{}", event.severity().short(), tag);
        let label = self.paint(&label, event.severity());

        let mut out = format!(
            "{} {} {}: {}",
            event.timestamp().format("%Y-%m-%d %H:%M:%S%.3f"),
            event.thread_name().unwrap_or("<unnamed>"),
            label,
            event.message()
        );

        if let Some(error) = event.error() {
            out.push_str("\n    ");
            if let Some(type_name) = error.type_name() {
                out.push_str(type_name);
                out.push_str(": ");
            }
            out.push_str(error.description());
            for cause in error.causes() {
                out.push_str("\n    caused by: ");
                out.push_str(cause);
            }
        }

        out
    }

    #[cfg(feature = "console")]
    fn paint(&self, text: &str, severity: Severity) -> String {
        if self.use_colors {
            text.color(severity.color_code()).to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, text: &str, _severity: Severity) -> String {
        text.to_string()
    }
}

impl Default for DebugSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for DebugSink {
    fn handle(&self, event: &Event) -> Result<()> {
        let output = self.format_event(event);

        match &self.output {
            Output::Console => match event.severity() {
                Severity::Error | Severity::Assert => eprintln!("{}", output),
                _ => println!("{}", output),
            },
            Output::Writer(writer) => {
                writeln!(writer.lock(), "{}", output)?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match &self.output {
            Output::Console => {
                std::io::stdout().flush()?;
                std::io::stderr().flush()?;
            }
            Output::Writer(writer) => writer.lock().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "debug"
    }
}
