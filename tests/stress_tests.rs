//! Stress tests for concurrent dispatch
//!
//! These tests verify:
//! - No event is lost when many threads log at once
//! - Per-thread ordering holds under contention
//! - Installing sinks while other threads log is safe

use forest_logger::core::{Dispatcher, Event, ForestError, Result, Severity, Sink};
use forest_logger::sinks::CrashReportingSink;
use forest_logger::transports::MemoryTransport;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

#[derive(Default)]
struct ThreadOrderSink {
    by_thread: Mutex<HashMap<String, Vec<usize>>>,
}

impl Sink for ThreadOrderSink {
    fn handle(&self, event: &Event) -> Result<()> {
        let (thread, seq) = event
            .message()
            .split_once(':')
            .ok_or_else(|| ForestError::other("malformed message"))?;
        let seq: usize = seq.parse().map_err(|_| ForestError::other("bad sequence"))?;
        self.by_thread
            .lock()
            .entry(thread.to_string())
            .or_default()
            .push(seq);
        Ok(())
    }

    fn name(&self) -> &str {
        "thread_order"
    }
}

/// Test that concurrent callers never lose an event and keep per-thread order
#[test]
fn test_concurrent_logging_keeps_per_thread_order() {
    let dispatcher = Arc::new(Dispatcher::new());
    let sink = Arc::new(ThreadOrderSink::default());
    let transport = Arc::new(MemoryTransport::new());
    dispatcher.install(sink.clone());
    dispatcher.install(Arc::new(CrashReportingSink::new(transport.clone())));

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let dispatcher = Arc::clone(&dispatcher);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    dispatcher.info(format!("t{}:{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let by_thread = sink.by_thread.lock();
    assert_eq!(by_thread.len(), THREADS);
    for sequence in by_thread.values() {
        let expected: Vec<usize> = (0..PER_THREAD).collect();
        assert_eq!(sequence, &expected);
    }
    assert_eq!(transport.len(), THREADS * PER_THREAD);
    assert_eq!(dispatcher.metrics().sink_failures(), 0);
}

/// Test that installs racing with early log calls neither deadlock nor crash
#[test]
fn test_install_races_with_logging() {
    struct Counter(AtomicUsize);

    impl Sink for Counter {
        fn handle(&self, _event: &Event) -> Result<()> {
            self.0.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn name(&self) -> &str {
            "counter"
        }
    }

    let dispatcher = Arc::new(Dispatcher::new());
    let counters: Vec<Arc<Counter>> =
        (0..50).map(|_| Arc::new(Counter(AtomicUsize::new(0)))).collect();

    let loggers: Vec<_> = (0..4)
        .map(|_| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                for i in 0..1_000 {
                    dispatcher.log(&Event::new(Severity::Debug, format!("early {}", i)));
                }
            })
        })
        .collect();

    for counter in &counters {
        dispatcher.install(counter.clone());
    }

    for handle in loggers {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(dispatcher.sink_count(), 50);

    // Every event went to a prefix of the install order, so counts never increase
    let counts: Vec<usize> = counters.iter().map(|c| c.0.load(Ordering::Relaxed)).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]), "counts: {:?}", counts);

    let metrics = dispatcher.metrics();
    assert_eq!(metrics.events_dispatched() + metrics.events_dropped(), 4_000);
}

/// Test that uninstall_all while logging leaves the dispatcher usable
#[test]
fn test_uninstall_all_while_logging() {
    let dispatcher = Arc::new(Dispatcher::new());
    let transport = Arc::new(MemoryTransport::new());

    let logger = {
        let dispatcher = Arc::clone(&dispatcher);
        std::thread::spawn(move || {
            for i in 0..2_000 {
                dispatcher.warn(format!("Message {}", i));
            }
        })
    };

    for _ in 0..100 {
        dispatcher.install(Arc::new(CrashReportingSink::new(transport.clone())));
        dispatcher.uninstall_all();
    }

    logger.join().expect("Thread panicked");

    dispatcher.install(Arc::new(CrashReportingSink::new(transport.clone())));
    transport.clear();
    dispatcher.error("final");
    assert_eq!(transport.len(), 1);
}
