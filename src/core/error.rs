//! Error types for the logging facade

use super::dispatcher::SinkId;

pub type Result<T> = std::result::Result<T, ForestError>;

#[derive(Debug, thiserror::Error)]
pub enum ForestError {
    /// A sink returned an error while handling an event
    #[error("Sink '{sink}' failed: {message}")]
    SinkFailed { sink: String, message: String },

    /// A sink panicked while handling an event
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },

    /// Crash-report transport rejected or failed to deliver a record
    #[error("Crash report transport error: {message}")]
    Transport { message: String },

    /// Receiving end of a channel transport is gone
    #[error("Crash report transport disconnected")]
    TransportDisconnected,

    /// Uninstall of a sink that is not in the registry
    #[error("No sink installed with id {id}")]
    SinkNotInstalled { id: SinkId },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ForestError {
    /// Create a sink failure error
    pub fn sink_failed(sink: impl Into<String>, message: impl Into<String>) -> Self {
        ForestError::SinkFailed {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a sink panic error
    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        ForestError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        ForestError::Transport {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        ForestError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ForestError::Other(msg.into())
    }

    /// Whether this error came from a sink panicking rather than returning `Err`
    pub fn is_panic(&self) -> bool {
        matches!(self, ForestError::SinkPanicked { .. })
    }
}
