//! Dispatcher metrics for observability
//!
//! Counters for monitoring dispatch health: how many events went out,
//! how many were dropped for lack of sinks, and how often sinks failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for dispatcher observability
///
/// # Example
///
/// ```
/// use forest_logger::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.events_dispatched(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Events handed to at least one sink
    events_dispatched: AtomicU64,

    /// Events logged while no sink was installed
    events_dropped: AtomicU64,

    /// Successful `handle` calls across all sinks
    deliveries: AtomicU64,

    /// Sinks returning `Err` from `handle` or `flush`
    sink_failures: AtomicU64,

    /// Sinks panicking in `handle` or `flush`
    sink_panics: AtomicU64,
}

impl DispatchMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            sink_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_panics(&self) -> u64 {
        self.sink_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.events_dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivery(&self) -> u64 {
        self.deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_panic(&self) -> u64 {
        self.sink_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of `handle` calls that failed or panicked, as a percentage
    ///
    /// Returns 0.0 if no sink has been invoked yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = (self.sink_failures() + self.sink_panics()) as f64;
        let total = self.deliveries() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.events_dispatched.store(0, Ordering::Relaxed);
        self.events_dropped.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.sink_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            events_dispatched: AtomicU64::new(self.events_dispatched()),
            events_dropped: AtomicU64::new(self.events_dropped()),
            deliveries: AtomicU64::new(self.deliveries()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            sink_panics: AtomicU64::new(self.sink_panics()),
        }
    }
}
