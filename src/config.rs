//! Startup configuration
//!
//! The build mode is resolved once, into a [`LoggingConfig`], and drives a
//! single install call through [`install_for_mode`].

use crate::core::{Dispatcher, ForestError, Result, SinkId};
use crate::sinks::{CrashReportingSink, DebugSink};
use crate::transports::CrashReportTransport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Environment variable holding the build mode override
pub const BUILD_MODE_ENV: &str = "FOREST_BUILD_MODE";

/// Environment variable toggling colors in the debug sink
pub const USE_COLORS_ENV: &str = "FOREST_USE_COLORS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Verbose local output through [`DebugSink`]
    Debug,
    /// Forward everything through [`CrashReportingSink`]
    Release,
}

impl BuildMode {
    /// Mode matching how this binary was compiled
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Debug
        } else {
            BuildMode::Release
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for BuildMode {
    type Err = ForestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "dev" | "development" => Ok(BuildMode::Debug),
            "release" | "prod" | "production" => Ok(BuildMode::Release),
            other => Err(ForestError::config(
                "BuildMode",
                format!("unknown build mode '{}'", other),
            )),
        }
    }
}

/// Logging setup chosen at startup
///
/// Missing fields take their defaults when deserialized.
///
/// # Example
///
/// ```
/// use forest_logger::config::{BuildMode, LoggingConfig};
///
/// let config = LoggingConfig::from_json(r#"{ "mode": "release" }"#).unwrap();
/// assert_eq!(config.mode, BuildMode::Release);
/// assert!(config.use_colors);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub mode: BuildMode,
    /// Colors in the debug sink
    pub use_colors: bool,
    /// Let the crash-reporting sink fall back to the caller's module name as tag
    pub derive_crash_tags: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::current(),
            use_colors: true,
            derive_crash_tags: false,
        }
    }
}

impl LoggingConfig {
    pub fn for_mode(mode: BuildMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `FOREST_BUILD_MODE` and `FOREST_USE_COLORS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup(BUILD_MODE_ENV) {
            config.mode = mode.parse()?;
        }
        if let Some(colors) = lookup(USE_COLORS_ENV) {
            config.use_colors = parse_flag(USE_COLORS_ENV, &colors)?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ForestError::config(
            name,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

/// Install the one sink the build mode calls for
///
/// Debug builds get a [`DebugSink`]; release builds get a
/// [`CrashReportingSink`] over `transport`.
///
/// # Example
///
/// ```
/// use forest_logger::config::{install_for_mode, BuildMode, LoggingConfig};
/// use forest_logger::prelude::*;
/// use std::sync::Arc;
///
/// let dispatcher = Dispatcher::new();
/// let transport = Arc::new(MemoryTransport::new());
/// install_for_mode(&dispatcher, &LoggingConfig::for_mode(BuildMode::Release), transport.clone());
///
/// assert_eq!(dispatcher.sink_names(), vec!["crash_reporting"]);
/// ```
pub fn install_for_mode(
    dispatcher: &Dispatcher,
    config: &LoggingConfig,
    transport: Arc<dyn CrashReportTransport>,
) -> SinkId {
    match config.mode {
        BuildMode::Debug => dispatcher.install(Arc::new(DebugSink::with_colors(config.use_colors))),
        BuildMode::Release => dispatcher.install(Arc::new(
            CrashReportingSink::new(transport).with_derived_tags(config.derive_crash_tags),
        )),
    }
}
