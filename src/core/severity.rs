//! Severity definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Severity {
    Verbose = 2,
    Debug = 3,
    #[default]
    Info = 4,
    Warn = 5,
    Error = 6,
    /// "What a terrible failure": a condition that should never happen
    Assert = 7,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 6] = [
        Severity::Verbose,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Assert,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Verbose => "VERBOSE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Assert => "ASSERT",
        }
    }

    /// Single-letter code used in compact debug output
    pub fn short(&self) -> char {
        match self {
            Severity::Verbose => 'V',
            Severity::Debug => 'D',
            Severity::Info => 'I',
            Severity::Warn => 'W',
            Severity::Error => 'E',
            Severity::Assert => 'A',
        }
    }

    /// Numeric priority passed to crash-report transports
    pub fn priority(&self) -> u8 {
        *self as u8
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Verbose => BrightBlack,
            Severity::Debug => Blue,
            Severity::Info => Green,
            Severity::Warn => Yellow,
            Severity::Error => Red,
            Severity::Assert => BrightRed,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VERBOSE" | "V" => Ok(Severity::Verbose),
            "DEBUG" | "D" => Ok(Severity::Debug),
            "INFO" | "I" => Ok(Severity::Info),
            "WARN" | "WARNING" | "W" => Ok(Severity::Warn),
            "ERROR" | "E" => Ok(Severity::Error),
            "ASSERT" | "WTF" | "A" => Ok(Severity::Assert),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Verbose < Severity::Debug);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Assert);
    }

    #[test]
    fn test_priority_values() {
        assert_eq!(Severity::Verbose.priority(), 2);
        assert_eq!(Severity::Error.priority(), 6);
        assert_eq!(Severity::Assert.priority(), 7);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warn));
        assert_eq!("wtf".parse::<Severity>(), Ok(Severity::Assert));
        assert_eq!("E".parse::<Severity>(), Ok(Severity::Error));
        assert!("loud".parse::<Severity>().is_err());
    }
}
