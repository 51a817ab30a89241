#![forbid(unsafe_code)]

//! Log entry value type.

use std::fmt;
use std::str::FromStr;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    /// Informational.
    Info,
    /// Something looks off.
    Warn,
    /// Something failed.
    Error,
}

impl LogLevel {
    /// All levels in ascending severity.
    pub const ALL: [LogLevel; 3] = [LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    /// Upper-case display label (`INFO`, `WARN`, `ERROR`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Lower-case label used for case-insensitive matching.
    #[must_use]
    pub const fn folded(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Style class attached to a rendered level cell.
    #[must_use]
    pub const fn style_class(self) -> &'static str {
        match self {
            Self::Info => "lvl INFO",
            Self::Warn => "lvl WARN",
            Self::Error => "lvl ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known level label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: {:?}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}

/// A single immutable log line.
///
/// Created once at ingestion and never mutated. Identity is [`LogEntry::id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Unique, stable identifier.
    pub id: u64,
    /// Preformatted timestamp text.
    pub timestamp: String,
    /// Severity.
    pub level: LogLevel,
    /// Message body.
    pub message: String,
}

impl LogEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(
        id: u64,
        timestamp: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            level,
            message: message.into(),
        }
    }
}
