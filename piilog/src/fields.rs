//! The ordered set of field names whose values are scrubbed.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigurationError;

/// Field names redacted when no explicit set is configured.
pub const DEFAULT_PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// An ordered, duplicate-free set of sensitive field names.
///
/// Names are matched case-sensitively and literally. Every name is non-empty
/// and contains neither `=` nor whitespace; both would make the name
/// impossible to locate as a whole key.
///
/// Insertion order is preserved for display and iteration. Redaction output
/// does not depend on it.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SensitiveFieldSet {
    names: Vec<String>,
}

impl SensitiveFieldSet {
    /// Builds a set, rejecting empty, duplicate, and malformed names.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(ConfigurationError::EmptyField);
            }
            if name.contains('=') || name.chars().any(char::is_whitespace) {
                return Err(ConfigurationError::InvalidField(name));
            }
            if collected.contains(&name) {
                return Err(ConfigurationError::DuplicateField(name));
            }
            collected.push(name);
        }
        Ok(Self { names: collected })
    }

    /// Fails if any name shares a character with `separator`.
    ///
    /// A name containing part of the separator could never start right after
    /// one, so it would silently stop matching.
    pub(crate) fn check_separator(&self, separator: &str) -> Result<(), ConfigurationError> {
        match self
            .names
            .iter()
            .find(|name| name.chars().any(|ch| separator.contains(ch)))
        {
            Some(name) => Err(ConfigurationError::InvalidField(name.clone())),
            None => Ok(()),
        }
    }

    /// Iterates the names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Returns `true` if `name` is one of the sensitive fields.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| candidate == name)
    }

    /// Number of names in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when nothing is redacted.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl Default for SensitiveFieldSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_PII_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Debug for SensitiveFieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'de> Deserialize<'de> for SensitiveFieldSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Self::new(names).map_err(serde::de::Error::custom)
    }
}
