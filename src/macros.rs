//! Logging macros for ergonomic log message formatting.
//!
//! Every macro takes the dispatcher first, then optional `tag:` and `err:`
//! prefixes (in that order), then `format!` arguments. The call site's
//! file, line and module path are recorded on the event.
//!
//! # Examples
//!
//! ```
//! use forest_logger::prelude::*;
//! use forest_logger::{error, info};
//!
//! let dispatcher = Dispatcher::new();
//!
//! info!(dispatcher, "Server started");
//! info!(dispatcher, tag: "Http", "Listening on port {}", 8080);
//!
//! let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket closed");
//! error!(dispatcher, tag: "Net", err: io_err, "Request {} timed out", 42);
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use forest_logger::prelude::*;
/// # let dispatcher = Dispatcher::new();
/// use forest_logger::log;
/// log!(dispatcher, Severity::Info, "Simple message");
/// log!(dispatcher, Severity::Error, tag: "Http", "Status: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($dispatcher:expr, $severity:expr, tag: $tag:expr, err: $err:expr, $($arg:tt)+) => {
        $dispatcher.log(
            &$crate::Event::new($severity, format!($($arg)+))
                .with_tag($tag)
                .with_error($crate::EventError::from_error(&$err))
                .with_location(file!(), line!(), module_path!()),
        )
    };
    ($dispatcher:expr, $severity:expr, tag: $tag:expr, $($arg:tt)+) => {
        $dispatcher.log(
            &$crate::Event::new($severity, format!($($arg)+))
                .with_tag($tag)
                .with_location(file!(), line!(), module_path!()),
        )
    };
    ($dispatcher:expr, $severity:expr, err: $err:expr, $($arg:tt)+) => {
        $dispatcher.log(
            &$crate::Event::new($severity, format!($($arg)+))
                .with_error($crate::EventError::from_error(&$err))
                .with_location(file!(), line!(), module_path!()),
        )
    };
    ($dispatcher:expr, $severity:expr, $($arg:tt)+) => {
        $dispatcher.log(
            &$crate::Event::new($severity, format!($($arg)+))
                .with_location(file!(), line!(), module_path!()),
        )
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Severity::Verbose, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use forest_logger::prelude::*;
/// # let dispatcher = Dispatcher::new();
/// use forest_logger::debug;
/// debug!(dispatcher, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use forest_logger::prelude::*;
/// # let dispatcher = Dispatcher::new();
/// use forest_logger::warn;
/// warn!(dispatcher, tag: "Disk", "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Severity::Error, $($arg)+)
    };
}

/// Log an assert-level message: a condition that should never happen.
#[macro_export]
macro_rules! wtf {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Severity::Assert, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Dispatcher, Event, Result, Severity, Sink};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Capture(Mutex<Vec<Event>>);

    impl Sink for Capture {
        fn handle(&self, event: &Event) -> Result<()> {
            self.0.lock().push(event.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn setup() -> (Dispatcher, Arc<Capture>) {
        let dispatcher = Dispatcher::new();
        let capture = Arc::new(Capture::default());
        dispatcher.install(capture.clone());
        (dispatcher, capture)
    }

    #[test]
    fn test_log_macro() {
        let (dispatcher, capture) = setup();
        log!(dispatcher, Severity::Info, "Formatted: {}", 42);

        let events = capture.0.lock();
        assert_eq!(events[0].severity(), Severity::Info);
        assert_eq!(events[0].message(), "Formatted: 42");
        assert_eq!(events[0].tag(), None);
        assert!(events[0].error().is_none());
    }

    #[test]
    fn test_location_recorded() {
        let (dispatcher, capture) = setup();
        debug!(dispatcher, "here");

        let events = capture.0.lock();
        let location = events[0].location().expect("macro records location");
        assert!(location.file.ends_with("macros.rs"));
        assert_eq!(location.module_path, module_path!());
        assert_eq!(events[0].effective_tag(), Some("tests"));
    }

    #[test]
    fn test_tag_and_err_prefixes() {
        let (dispatcher, capture) = setup();
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket closed");

        error!(dispatcher, tag: "Net", err: io_err, "timeout after {}ms", 500);
        warn!(dispatcher, tag: "Disk", "low space");
        wtf!(dispatcher, err: io_err, "impossible");

        let events = capture.0.lock();
        assert_eq!(events[0].tag(), Some("Net"));
        assert_eq!(events[0].message(), "timeout after 500ms");
        assert_eq!(events[0].error().unwrap().description(), "socket closed");

        assert_eq!(events[1].tag(), Some("Disk"));
        assert!(events[1].error().is_none());

        assert_eq!(events[2].severity(), Severity::Assert);
        assert_eq!(events[2].tag(), None);
        assert!(events[2].error().is_some());
    }

    #[test]
    fn test_every_level_macro() {
        let (dispatcher, capture) = setup();
        verbose!(dispatcher, "v");
        debug!(dispatcher, "d");
        info!(dispatcher, "i");
        warn!(dispatcher, "w");
        error!(dispatcher, "e");
        wtf!(dispatcher, "a");

        let severities: Vec<Severity> = capture.0.lock().iter().map(Event::severity).collect();
        assert_eq!(severities, Severity::ALL.to_vec());
    }
}
