//! Log levels and threshold checks

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Severity threshold for a logger.
///
/// Concrete levels are ordered by verbosity:
/// `Suppress < Error < Warn < Info < Debug < Verbose`. A threshold of `Suppress`
/// therefore enables nothing and `Verbose` enables everything.
///
/// `Native` is not a threshold. It defers the enabled check to the sink, and it is
/// unordered with respect to every other level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Suppress,
    Error,
    Warn,
    Info,
    Debug,
    Verbose,
    Native,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Suppress,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Verbose,
        LogLevel::Native,
    ];

    fn rank(self) -> Option<u8> {
        match self {
            LogLevel::Suppress => Some(0),
            LogLevel::Error => Some(1),
            LogLevel::Warn => Some(2),
            LogLevel::Info => Some(3),
            LogLevel::Debug => Some(4),
            LogLevel::Verbose => Some(5),
            LogLevel::Native => None,
        }
    }

    /// Whether a record at `self` passes the `threshold`.
    ///
    /// Always false when either side is `Native`; callers resolve a `Native`
    /// threshold against the sink instead.
    pub fn is_enabled_at(self, threshold: LogLevel) -> bool {
        match (self.rank(), threshold.rank()) {
            (Some(level), Some(threshold)) => level <= threshold,
            _ => false,
        }
    }

    pub fn is_native(self) -> bool {
        self == LogLevel::Native
    }

    /// Single-letter label used in logcat-style output.
    pub fn label(self) -> char {
        match self {
            LogLevel::Suppress => 'S',
            LogLevel::Error => 'E',
            LogLevel::Warn => 'W',
            LogLevel::Info => 'I',
            LogLevel::Debug => 'D',
            LogLevel::Verbose => 'V',
            LogLevel::Native => 'N',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Suppress => "SUPPRESS",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Native => "NATIVE",
        }
    }
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Trace => LogLevel::Verbose,
        }
    }
}
