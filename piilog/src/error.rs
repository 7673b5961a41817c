//! Errors surfaced to callers.
//!
//! Only construction-time problems are errors. Redaction itself is total: a
//! message that does not look like `key=value` pairs is returned unchanged.

use thiserror::Error;

/// A formatter or redaction rule could not be built from its configuration.
///
/// Construction is all-or-nothing: when this is returned no partially
/// configured formatter exists.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A sensitive field name was the empty string.
    #[error("sensitive field names must not be empty")]
    EmptyField,

    /// The same sensitive field name was listed more than once.
    #[error("sensitive field `{0}` is listed more than once")]
    DuplicateField(String),

    /// A sensitive field name contains `=`, whitespace, or the separator.
    #[error("sensitive field `{0}` contains `=`, whitespace, or the separator")]
    InvalidField(String),

    /// The pair separator was the empty string.
    #[error("separator must not be empty")]
    EmptySeparator,

    /// The redaction token contains `=` or the separator, so redacted output
    /// would no longer parse as the same pairs.
    #[error("redaction token `{0}` must not contain `=` or the separator")]
    InvalidToken(String),

    /// A JSON configuration document could not be parsed.
    #[error("invalid formatter configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hashing a secret failed before any digest was produced.
#[cfg(feature = "hasher")]
#[derive(Clone, Copy, Debug, Error)]
pub enum HashError {
    /// The operating system could not provide salt bytes.
    #[error("failed to gather salt entropy: {0}")]
    Entropy(#[source] getrandom::Error),

    /// The configured cost is outside the supported range.
    #[error("hash cost {0} is outside 4..=31")]
    InvalidCost(u32),
}
