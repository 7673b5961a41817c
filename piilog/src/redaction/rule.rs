//! The token and separator applied to every sensitive field.
//!
//! A rule is a pair of strings fixed at construction. It does not know which
//! fields are sensitive; that lives in [`crate::SensitiveFieldSet`].

use std::borrow::Cow;

use crate::error::ConfigurationError;

/// Default replacement for a sensitive value.
pub const DEFAULT_REDACTION: &str = "***";

/// Default delimiter between `key=value` pairs.
pub const DEFAULT_SEPARATOR: &str = "; ";

/// How a sensitive value is replaced and where it ends.
///
/// The separator is the value-boundary delimiter: a value runs from just after
/// `key=` up to the next separator or the end of the message. Values that
/// themselves contain the separator cannot be bounded correctly, so callers
/// must guarantee they never do.
// Use `Cow` so the defaults stay borrowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedactionRule {
    redaction: Cow<'static, str>,
    separator: Cow<'static, str>,
}

impl RedactionRule {
    /// Builds a rule from an explicit token and separator.
    ///
    /// The separator must be non-empty and the token must contain neither `=`
    /// nor the separator. Either would let a redacted value be re-read as a
    /// different set of pairs.
    pub fn new<R, S>(redaction: R, separator: S) -> Result<Self, ConfigurationError>
    where
        R: Into<Cow<'static, str>>,
        S: Into<Cow<'static, str>>,
    {
        let redaction = redaction.into();
        let separator = separator.into();

        if separator.is_empty() {
            return Err(ConfigurationError::EmptySeparator);
        }
        if redaction.contains('=') || redaction.contains(separator.as_ref()) {
            return Err(ConfigurationError::InvalidToken(redaction.into_owned()));
        }

        Ok(Self {
            redaction,
            separator,
        })
    }

    /// Replaces the token, keeping the separator.
    pub fn with_redaction<R>(self, redaction: R) -> Result<Self, ConfigurationError>
    where
        R: Into<Cow<'static, str>>,
    {
        Self::new(redaction, self.separator)
    }

    /// Replaces the separator, keeping the token.
    pub fn with_separator<S>(self, separator: S) -> Result<Self, ConfigurationError>
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(self.redaction, separator)
    }

    /// The literal substituted for each sensitive value.
    #[must_use]
    pub fn redaction(&self) -> &str {
        &self.redaction
    }

    /// The pair delimiter.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for RedactionRule {
    fn default() -> Self {
        Self {
            redaction: Cow::Borrowed(DEFAULT_REDACTION),
            separator: Cow::Borrowed(DEFAULT_SEPARATOR),
        }
    }
}
