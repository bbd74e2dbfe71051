//! Sink trait for log event consumers

use super::{error::Result, event::Event};

/// A pluggable consumer of log events (a "tree" in the forest)
///
/// Sinks are shared between threads and invoked in line on the logging
/// thread, so `handle` takes `&self`; implementations that need mutable
/// state guard it themselves.
pub trait Sink: Send + Sync {
    fn handle(&self, event: &Event) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
