//! Core facade types and traits

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod metrics;
pub mod severity;
pub mod sink;

pub use dispatcher::{
    Dispatcher, DispatcherBuilder, SinkFailure, SinkFailureCallback, SinkId, Tagged,
};
pub use error::{ForestError, Result};
pub use event::{Event, EventError, Location};
pub use metrics::DispatchMetrics;
pub use severity::Severity;
pub use sink::Sink;
