//! Log records as seen by the formatter.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a record, rendered upper-case in the line format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// The name used in formatted lines, e.g. `WARNING`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "slog")]
impl From<slog::Level> for Level {
    fn from(level: slog::Level) -> Self {
        match level {
            slog::Level::Critical => Level::Critical,
            slog::Level::Error => Level::Error,
            slog::Level::Warning => Level::Warning,
            slog::Level::Info => Level::Info,
            slog::Level::Debug | slog::Level::Trace => Level::Debug,
        }
    }
}

/// One log call, captured before formatting.
///
/// Records are immutable: build one, hand it to
/// [`RedactingFormatter::format`](crate::RedactingFormatter::format), drop it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    logger_name: String,
    level: Level,
    timestamp: DateTime<Utc>,
    raw_message: String,
}

impl LogRecord {
    pub fn new(
        logger_name: impl Into<String>,
        level: Level,
        timestamp: DateTime<Utc>,
        raw_message: impl Into<String>,
    ) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            timestamp,
            raw_message: raw_message.into(),
        }
    }

    /// Convenience constructor stamped with the current time.
    pub fn now(logger_name: impl Into<String>, level: Level, raw_message: impl Into<String>) -> Self {
        Self::new(logger_name, level, Utc::now(), raw_message)
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }
}
