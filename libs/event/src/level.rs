//! Severity levels for log events.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name a known level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown level: '{0}'")]
pub struct UnknownLevel(pub String);

/// Severity of a log event, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    /// All levels, in severity order.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Critical,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }

    /// Uppercased first letter of the level name, used as the leading
    /// character of a rendered line.
    #[must_use]
    pub const fn initial(&self) -> char {
        match self {
            Level::Debug => 'D',
            Level::Info => 'I',
            Level::Warn => 'W',
            Level::Error => 'E',
            Level::Critical => 'C',
        }
    }

    /// Parses a level from its canonical lowercase name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "critical" => Some(Level::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s).ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for level in Level::ALL {
            assert_eq!(Level::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Level::parse("fatal"), None);
        assert_eq!(Level::parse(""), None);
        assert_eq!(Level::parse("Info"), None);
    }

    #[test]
    fn test_initial() {
        assert_eq!(Level::Info.initial(), 'I');
        assert_eq!(Level::Critical.initial(), 'C');
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Level::Warn).unwrap(), "\"warn\"");
        let parsed: Level = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Level::Error);
    }

    #[test]
    fn test_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Critical);
    }
}
