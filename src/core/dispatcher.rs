//! Event dispatcher: the sink registry and its fan-out

use super::{
    error::{ForestError, Result},
    event::{Event, EventError},
    metrics::DispatchMetrics,
    severity::Severity,
    sink::Sink,
};
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifier handed out by [`Dispatcher::install`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(u64);

impl SinkId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Details of one sink failing to handle one event
#[derive(Debug)]
pub struct SinkFailure {
    pub sink_id: SinkId,
    pub sink_name: String,
    pub severity: Severity,
    pub error: ForestError,
}

/// Side channel notified whenever a sink fails or panics
///
/// Runs on the logging thread. It must not log through the dispatcher
/// that invoked it.
pub type SinkFailureCallback = Arc<dyn Fn(&SinkFailure) + Send + Sync>;

#[derive(Clone)]
struct Installed {
    id: SinkId,
    sink: Arc<dyn Sink>,
}

/// Fans each logged [`Event`] out to every installed [`Sink`]
///
/// The registry is a copy-on-write list: `log` clones the current list
/// under a short read lock and delivers without holding any lock, so
/// installs may race with logging and sinks may log re-entrantly.
///
/// # Example
///
/// ```
/// use forest_logger::prelude::*;
/// use std::sync::Arc;
///
/// let transport = Arc::new(MemoryTransport::new());
/// let dispatcher = Dispatcher::new();
/// dispatcher.install(Arc::new(CrashReportingSink::new(transport.clone())));
///
/// dispatcher.tagged("Net").info("connected");
/// assert_eq!(transport.reports().len(), 1);
/// ```
pub struct Dispatcher {
    forest: RwLock<Arc<Vec<Installed>>>,
    next_id: AtomicU64,
    metrics: DispatchMetrics,
    on_sink_failure: Option<SinkFailureCallback>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            forest: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(1),
            metrics: DispatchMetrics::new(),
            on_sink_failure: None,
        }
    }

    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Append a sink to the registry
    ///
    /// Installing the same `Arc` twice makes it receive every event twice.
    pub fn install(&self, sink: Arc<dyn Sink>) -> SinkId {
        let id = SinkId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut forest = self.forest.write();
        let mut sinks = Vec::clone(&forest);
        sinks.push(Installed { id, sink });
        *forest = Arc::new(sinks);
        id
    }

    /// Install several sinks, preserving iteration order
    pub fn install_all<I>(&self, sinks: I) -> Vec<SinkId>
    where
        I: IntoIterator<Item = Arc<dyn Sink>>,
    {
        sinks.into_iter().map(|sink| self.install(sink)).collect()
    }

    /// Remove one previously installed sink
    pub fn uninstall(&self, id: SinkId) -> Result<()> {
        let mut forest = self.forest.write();
        let Some(position) = forest.iter().position(|installed| installed.id == id) else {
            return Err(ForestError::SinkNotInstalled { id });
        };
        let mut sinks = Vec::clone(&forest);
        sinks.remove(position);
        *forest = Arc::new(sinks);
        Ok(())
    }

    /// Remove every installed sink, returning how many were removed
    pub fn uninstall_all(&self) -> usize {
        let mut forest = self.forest.write();
        let removed = forest.len();
        *forest = Arc::new(Vec::new());
        removed
    }

    pub fn sink_count(&self) -> usize {
        self.forest.read().len()
    }

    /// Names of the installed sinks in delivery order
    pub fn sink_names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|installed| installed.sink.name().to_string())
            .collect()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    fn snapshot(&self) -> Arc<Vec<Installed>> {
        Arc::clone(&self.forest.read())
    }

    /// Deliver an event to every installed sink in registration order
    ///
    /// **Per-sink isolation**: each `handle` call is wrapped in
    /// `catch_unwind`. A sink returning `Err` or panicking is reported on
    /// stderr and to the failure callback, then delivery continues with
    /// the next sink. Nothing is propagated to the caller.
    pub fn log(&self, event: &Event) {
        let forest = self.snapshot();
        if forest.is_empty() {
            self.metrics.record_dropped();
            return;
        }
        self.metrics.record_dispatched();

        for installed in forest.iter() {
            let result = catch_unwind(AssertUnwindSafe(|| installed.sink.handle(event)));

            match result {
                Ok(Ok(())) => {
                    self.metrics.record_delivery();
                }
                Ok(Err(e)) => {
                    self.metrics.record_sink_failure();
                    eprintln!(
                        "[FOREST ERROR] Sink {} '{}' failed: {}",
                        installed.id,
                        installed.sink.name(),
                        e
                    );
                    let error = ForestError::sink_failed(installed.sink.name(), e.to_string());
                    self.notify_failure(installed, event.severity(), error);
                }
                Err(panic_info) => {
                    self.metrics.record_sink_panic();
                    let panic_msg = panic_message(panic_info.as_ref());
                    eprintln!(
                        "[FOREST CRITICAL] Sink {} '{}' panicked: {}. \
                         Other sinks continue to receive events.",
                        installed.id,
                        installed.sink.name(),
                        panic_msg
                    );
                    let error = ForestError::sink_panicked(installed.sink.name(), panic_msg);
                    self.notify_failure(installed, event.severity(), error);
                }
            }
        }
    }

    fn notify_failure(&self, installed: &Installed, severity: Severity, error: ForestError) {
        let Some(ref callback) = self.on_sink_failure else {
            return;
        };

        let failure = SinkFailure {
            sink_id: installed.id,
            sink_name: installed.sink.name().to_string(),
            severity,
            error,
        };
        if catch_unwind(AssertUnwindSafe(|| callback(&failure))).is_err() {
            eprintln!("[FOREST CRITICAL] Sink failure callback panicked");
        }
    }

    /// Build an event from its parts and log it
    pub fn log_with(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: impl Into<String>,
        error: Option<EventError>,
    ) {
        let mut event = Event::new(severity, message);
        if let Some(tag) = tag {
            event = event.with_tag(tag);
        }
        if let Some(error) = error {
            event = event.with_error(error);
        }
        self.log(&event);
    }

    /// Log with an attached error
    pub fn log_with_error<E>(&self, severity: Severity, error: &E, message: impl Into<String>)
    where
        E: std::error::Error + ?Sized,
    {
        self.log_with(severity, None, message, Some(EventError::from_error(error)));
    }

    #[inline]
    pub fn verbose(&self, message: impl Into<String>) {
        self.log_with(Severity::Verbose, None, message, None);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log_with(Severity::Debug, None, message, None);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log_with(Severity::Info, None, message, None);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log_with(Severity::Warn, None, message, None);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log_with(Severity::Error, None, message, None);
    }

    /// Log a condition that should never happen
    #[inline]
    pub fn wtf(&self, message: impl Into<String>) {
        self.log_with(Severity::Assert, None, message, None);
    }

    pub fn warn_with_error<E>(&self, error: &E, message: impl Into<String>)
    where
        E: std::error::Error + ?Sized,
    {
        self.log_with_error(Severity::Warn, error, message);
    }

    pub fn error_with_error<E>(&self, error: &E, message: impl Into<String>)
    where
        E: std::error::Error + ?Sized,
    {
        self.log_with_error(Severity::Error, error, message);
    }

    pub fn wtf_with_error<E>(&self, error: &E, message: impl Into<String>)
    where
        E: std::error::Error + ?Sized,
    {
        self.log_with_error(Severity::Assert, error, message);
    }

    /// One-shot tagged view: every call through it carries `tag`
    pub fn tagged(&self, tag: impl Into<String>) -> Tagged<'_> {
        Tagged {
            dispatcher: self,
            tag: tag.into(),
        }
    }

    /// Flush every installed sink, returning the first failure
    ///
    /// All sinks are flushed even when an earlier one fails. Each flush is
    /// wrapped in `catch_unwind`, so a panicking sink is reported and
    /// counted but never unwinds out of this call or out of `Drop`.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for installed in self.snapshot().iter() {
            let result = catch_unwind(AssertUnwindSafe(|| installed.sink.flush()));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.metrics.record_sink_failure();
                    eprintln!(
                        "[FOREST ERROR] Sink {} '{}' flush failed: {}",
                        installed.id,
                        installed.sink.name(),
                        e
                    );
                    first_error.get_or_insert(e);
                }
                Err(panic_info) => {
                    self.metrics.record_sink_panic();
                    let panic_msg = panic_message(panic_info.as_ref());
                    eprintln!(
                        "[FOREST CRITICAL] Sink {} '{}' panicked during flush: {}. \
                         Other sinks continue to be flushed.",
                        installed.id,
                        installed.sink.name(),
                        panic_msg
                    );
                    let error = ForestError::sink_panicked(installed.sink.name(), panic_msg);
                    first_error.get_or_insert(error);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("sinks", &self.sink_names())
            .field("metrics", &self.metrics)
            .field("on_sink_failure", &self.on_sink_failure.is_some())
            .finish()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // flush() already reports each failure on stderr
        let _ = self.flush();
    }
}

/// Dispatcher view that attaches a fixed tag to every event
///
/// Returned by [`Dispatcher::tagged`].
pub struct Tagged<'a> {
    dispatcher: &'a Dispatcher,
    tag: String,
}

impl Tagged<'_> {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        self.dispatcher.log_with(severity, Some(&self.tag), message, None);
    }

    pub fn log_with_error<E>(&self, severity: Severity, error: &E, message: impl Into<String>)
    where
        E: std::error::Error + ?Sized,
    {
        self.dispatcher.log_with(
            severity,
            Some(&self.tag),
            message,
            Some(EventError::from_error(error)),
        );
    }

    pub fn verbose(&self, message: impl Into<String>) {
        self.log(Severity::Verbose, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    pub fn wtf(&self, message: impl Into<String>) {
        self.log(Severity::Assert, message);
    }

    pub fn error_with_error<E>(&self, error: &E, message: impl Into<String>)
    where
        E: std::error::Error + ?Sized,
    {
        self.log_with_error(Severity::Error, error, message);
    }
}

/// Builder for constructing a Dispatcher with a fluent API
///
/// # Example
/// ```
/// use forest_logger::prelude::*;
/// use std::sync::Arc;
///
/// let dispatcher = Dispatcher::builder()
///     .sink(DebugSink::new())
///     .on_sink_failure(Arc::new(|failure: &SinkFailure| {
///         eprintln!("sink {} failed: {}", failure.sink_name, failure.error);
///     }))
///     .build();
///
/// assert_eq!(dispatcher.sink_count(), 1);
/// ```
pub struct DispatcherBuilder {
    sinks: Vec<Arc<dyn Sink>>,
    on_sink_failure: Option<SinkFailureCallback>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            on_sink_failure: None,
        }
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Add a sink that is also held elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Set the side channel for sink failures
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_failure(mut self, callback: SinkFailureCallback) -> Self {
        self.on_sink_failure = Some(callback);
        self
    }

    pub fn build(self) -> Dispatcher {
        let mut dispatcher = Dispatcher::new();
        dispatcher.on_sink_failure = self.on_sink_failure;
        dispatcher.install_all(self.sinks);
        dispatcher
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
