//! Log event structure

use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread name, computing and caching it on first access
fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Captured form of an error attached to a log call
///
/// The description of the error itself plus the descriptions of every
/// error in its `source()` chain, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventError {
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    causes: Vec<String>,
}

impl EventError {
    /// Capture an error and its source chain
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            description: error.to_string(),
            type_name: Some(std::any::type_name::<E>().to_string()),
            causes,
        }
    }

    /// Build an error from a bare description
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            type_name: None,
            causes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)?;
        for cause in &self.causes {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

/// Source location of a log call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub module_path: String,
}

impl Location {
    /// Last segment of the module path, used as a fallback tag
    pub fn short_module(&self) -> &str {
        self.module_path
            .rsplit("::")
            .next()
            .unwrap_or(&self.module_path)
    }
}

/// One log call
///
/// Built once by the caller and never mutated after it is handed to a
/// [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<EventError>,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
}

impl Event {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            tag: None,
            message: message.into(),
            error: None,
            timestamp: Utc::now(),
            thread_name: current_thread_name(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: EventError) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_location(mut self, file: &str, line: u32, module_path: &str) -> Self {
        self.location = Some(Location {
            file: file.to_string(),
            line,
            module_path: module_path.to_string(),
        });
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&EventError> {
        self.error.as_ref()
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Explicit tag, or the caller's module name when none was given
    pub fn effective_tag(&self) -> Option<&str> {
        self.tag()
            .or_else(|| self.location.as_ref().map(Location::short_module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl std::error::Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_captures_source_chain() {
        let captured = EventError::from_error(&Outer(Inner));
        assert_eq!(captured.description(), "request failed");
        assert_eq!(captured.causes(), ["connection reset".to_string()]);
        assert!(captured.type_name().unwrap().ends_with("Outer"));
        assert_eq!(captured.to_string(), "request failed: connection reset");
    }

    #[test]
    fn test_empty_description_is_still_present() {
        let event = Event::new(Severity::Warn, "").with_error(EventError::from_description(""));
        assert_eq!(event.message(), "");
        assert_eq!(event.error().map(EventError::description), Some(""));

        let bare = Event::new(Severity::Warn, "");
        assert!(bare.error().is_none());
    }

    #[test]
    fn test_effective_tag() {
        let event = Event::new(Severity::Info, "loaded")
            .with_location("src/ui.rs", 12, "app::screens::ui");
        assert_eq!(event.tag(), None);
        assert_eq!(event.effective_tag(), Some("ui"));

        let tagged = event.clone().with_tag("UI");
        assert_eq!(tagged.effective_tag(), Some("UI"));
    }

    #[test]
    fn test_message_kept_verbatim() {
        let event = Event::new(Severity::Debug, "line one\nline two");
        assert_eq!(event.message(), "line one\nline two");
    }
}
