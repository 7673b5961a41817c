//! Configuration for the formatter and for the database row source.
//!
//! [`FormatterConfig`] is plain data; validation happens when it is turned
//! into a [`RedactingFormatter`](crate::RedactingFormatter).
//! [`DbConfig`] is read from the environment and is only meant for whatever
//! opens the database connection. The formatter never looks at it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    fields::DEFAULT_PII_FIELDS,
    redaction::{DEFAULT_REDACTION, DEFAULT_SEPARATOR},
};

/// Tag rendered between brackets at the start of each line.
pub const DEFAULT_PREFIX: &str = "PII";

/// Logger name used by [`crate::slog::logger`] unless overridden.
pub const DEFAULT_LOGGER_NAME: &str = "user_data";

/// Recognized formatter options. Every key is optional in JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    /// Sensitive field names, in order.
    pub fields: Vec<String>,
    /// Replacement for each sensitive value.
    pub redaction: String,
    /// Pair delimiter and value boundary.
    pub separator: String,
    /// Line tag.
    pub prefix: String,
    /// Logger name used when records come from `slog`.
    pub logger_name: String,
}

impl FormatterConfig {
    /// Parses a JSON document such as `{"fields": ["ssn"], "prefix": "APP"}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            fields: DEFAULT_PII_FIELDS.iter().map(ToString::to_string).collect(),
            redaction: DEFAULT_REDACTION.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
        }
    }
}

/// Environment variable holding the database user.
pub const DB_USERNAME_VAR: &str = "PERSONAL_DATA_DB_USERNAME";
/// Environment variable holding the database password.
pub const DB_PASSWORD_VAR: &str = "PERSONAL_DATA_DB_PASSWORD";
/// Environment variable holding the database host.
pub const DB_HOST_VAR: &str = "PERSONAL_DATA_DB_HOST";
/// Environment variable holding the database name.
pub const DB_NAME_VAR: &str = "PERSONAL_DATA_DB_NAME";

/// Connection settings for the database that rows are read from.
///
/// Unset variables fall back to `root`, an empty password, and `localhost`.
/// The database name has no default.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub database: Option<String>,
}

impl DbConfig {
    /// Reads the `PERSONAL_DATA_DB_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns `None` for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            username: lookup(DB_USERNAME_VAR).unwrap_or_else(|| "root".to_string()),
            password: lookup(DB_PASSWORD_VAR).unwrap_or_default(),
            host: lookup(DB_HOST_VAR).unwrap_or_else(|| "localhost".to_string()),
            database: lookup(DB_NAME_VAR),
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("username", &self.username)
            .field("password", &DEFAULT_REDACTION)
            .field("host", &self.host)
            .field("database", &self.database)
            .finish()
    }
}
