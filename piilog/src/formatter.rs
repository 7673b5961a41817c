//! Rendering a [`LogRecord`] into a redacted line.
//!
//! Line format:
//!
//! ```text
//! [<prefix>] <logger_name> <LEVEL> <YYYY-MM-DD HH:MM:SS,mmm>: <message>
//! ```
//!
//! Only the message goes through [`filter`](crate::filter). The header is
//! rendered around the redacted message, so the first pair of the message is
//! always a key start and header text is never redacted.

use std::borrow::Cow;

use crate::{
    config::{FormatterConfig, DEFAULT_PREFIX},
    error::ConfigurationError,
    fields::SensitiveFieldSet,
    record::LogRecord,
    redaction::{filter, RedactionRule},
};

/// Timestamp layout: UTC with millisecond precision after a comma.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Formats log records and scrubs sensitive field values.
///
/// Holds only immutable configuration, so one instance can be shared by any
/// number of threads.
///
/// ## Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use piilog::{Level, LogRecord, RedactingFormatter, SensitiveFieldSet};
///
/// let formatter = RedactingFormatter::new(SensitiveFieldSet::new(["email"])?)?;
/// let record = LogRecord::new(
///     "user_data",
///     Level::Info,
///     Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
///     "email=bob@example.com; role=admin",
/// );
/// assert_eq!(
///     formatter.format(&record),
///     "[PII] user_data INFO 2024-03-01 09:30:00,000: email=***; role=admin",
/// );
/// # Ok::<(), piilog::ConfigurationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RedactingFormatter {
    fields: SensitiveFieldSet,
    rule: RedactionRule,
    prefix: Cow<'static, str>,
}

impl RedactingFormatter {
    /// Builds a formatter with the default token, separator and prefix.
    pub fn new(fields: SensitiveFieldSet) -> Result<Self, ConfigurationError> {
        Self::with_rule(fields, RedactionRule::default())
    }

    /// Builds a formatter with an explicit rule.
    ///
    /// Fails if a field name shares a character with the rule's separator.
    pub fn with_rule(
        fields: SensitiveFieldSet,
        rule: RedactionRule,
    ) -> Result<Self, ConfigurationError> {
        fields.check_separator(rule.separator())?;
        Ok(Self {
            fields,
            rule,
            prefix: Cow::Borrowed(DEFAULT_PREFIX),
        })
    }

    /// Validates and applies every option in `config`.
    pub fn from_config(config: &FormatterConfig) -> Result<Self, ConfigurationError> {
        let fields = SensitiveFieldSet::new(config.fields.iter().cloned())?;
        let rule = RedactionRule::new(config.redaction.clone(), config.separator.clone())?;
        Ok(Self::with_rule(fields, rule)?.with_prefix(config.prefix.clone()))
    }

    /// Replaces the bracketed line tag.
    #[must_use]
    pub fn with_prefix<P>(mut self, prefix: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        self.prefix = prefix.into();
        self
    }

    pub fn fields(&self) -> &SensitiveFieldSet {
        &self.fields
    }

    pub fn rule(&self) -> &RedactionRule {
        &self.rule
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Renders `record` and redacts every sensitive `field=value` pair.
    ///
    /// Never fails. A message that is not made of pairs comes back verbatim
    /// inside the rendered line.
    #[must_use]
    pub fn format(&self, record: &LogRecord) -> String {
        format!(
            "[{}] {} {} {}: {}",
            self.prefix,
            record.logger_name(),
            record.level(),
            record.timestamp().format(TIMESTAMP_FORMAT),
            self.redact(record.raw_message()),
        )
    }

    /// Applies this formatter's fields and rule to an arbitrary message.
    #[must_use]
    pub fn redact<'a>(&self, message: &'a str) -> Cow<'a, str> {
        filter(
            self.fields.as_slice(),
            self.rule.redaction(),
            message,
            self.rule.separator(),
        )
    }
}

impl Default for RedactingFormatter {
    fn default() -> Self {
        Self {
            fields: SensitiveFieldSet::default(),
            rule: RedactionRule::default(),
            prefix: Cow::Borrowed(DEFAULT_PREFIX),
        }
    }
}
