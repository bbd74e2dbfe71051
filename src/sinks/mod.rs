//! Sink implementations

pub mod crash_reporting;
pub mod debug;

pub use crash_reporting::CrashReportingSink;
pub use debug::DebugSink;

pub use crate::core::Sink;
