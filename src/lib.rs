//! # Forest Logger
//!
//! A pluggable logging facade. Call sites log events (severity, optional
//! tag, message, optional error) through a [`Dispatcher`], which fans each
//! event out to every installed [`Sink`].
//!
//! ## Features
//!
//! - **Failure Isolation**: a sink that errors or panics never stops the others
//! - **Crash Reporting**: [`CrashReportingSink`] forwards events and their errors to a transport
//! - **Build Modes**: one startup decision picks the debug or crash-reporting sink
//! - **Thread Safe**: copy-on-write sink registry, safe to install while logging

pub mod config;
pub mod core;
pub mod macros;
pub mod sinks;
pub mod transports;

pub mod prelude {
    pub use crate::config::{install_for_mode, BuildMode, LoggingConfig};
    pub use crate::core::{
        DispatchMetrics, Dispatcher, DispatcherBuilder, Event, EventError, ForestError, Result,
        Severity, Sink, SinkFailure, SinkFailureCallback, SinkId,
    };
    pub use crate::sinks::{CrashReportingSink, DebugSink};
    pub use crate::transports::{
        ChannelTransport, CrashReportTransport, MemoryTransport, TransportRecord, WriterTransport,
    };
}

pub use crate::core::{
    DispatchMetrics, Dispatcher, DispatcherBuilder, Event, EventError, ForestError, Location,
    Result, Severity, Sink, SinkFailure, SinkFailureCallback, SinkId, Tagged,
};
pub use config::{install_for_mode, BuildMode, LoggingConfig};
pub use sinks::{CrashReportingSink, DebugSink};
pub use transports::{CrashReportTransport, MemoryTransport};
