//! Criterion benchmarks for forest_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use forest_logger::prelude::*;
use std::sync::Arc;

struct NullSink;

impl Sink for NullSink {
    fn handle(&self, event: &Event) -> Result<()> {
        black_box(event);
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Event Construction Benchmarks
// ============================================================================

fn bench_event_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("plain", |b| {
        b.iter(|| black_box(Event::new(Severity::Info, black_box("message"))));
    });

    group.bench_function("tag_and_error", |b| {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket closed");
        b.iter(|| {
            black_box(
                Event::new(Severity::Error, black_box("timeout"))
                    .with_tag("Net")
                    .with_error(EventError::from_error(&io_err)),
            )
        });
    });

    group.finish();
}

// ============================================================================
// Fan-out Benchmarks
// ============================================================================

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    group.throughput(Throughput::Elements(1));

    for sinks in [0usize, 1, 4, 16] {
        let dispatcher = Dispatcher::new();
        for _ in 0..sinks {
            dispatcher.install(Arc::new(NullSink));
        }
        let event = Event::new(Severity::Info, "message");

        group.bench_with_input(BenchmarkId::from_parameter(sinks), &sinks, |b, _| {
            b.iter(|| dispatcher.log(black_box(&event)));
        });
    }

    group.finish();
}

// ============================================================================
// Crash-reporting Benchmarks
// ============================================================================

fn bench_crash_reporting(c: &mut Criterion) {
    let mut group = c.benchmark_group("crash_reporting");
    group.throughput(Throughput::Elements(1));

    let (transport, receiver) = ChannelTransport::unbounded();
    let dispatcher = Dispatcher::new();
    dispatcher.install(Arc::new(CrashReportingSink::new(Arc::new(transport))));

    group.bench_function("channel_report", |b| {
        b.iter(|| {
            dispatcher.tagged("Net").info(black_box("connected"));
            receiver.try_iter().for_each(drop);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_event_creation,
    bench_fan_out,
    bench_crash_reporting
);
criterion_main!(benches);
