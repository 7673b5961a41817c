//! Redaction of `key=value` messages.
//!
//! - **`rule`**: the token and separator applied to every sensitive field
//! - **`filter`**: the pure scanner that performs the substitution
//!
//! The field set itself lives in `crate::fields`.

mod filter;
mod rule;

pub use filter::filter;
pub use rule::{RedactionRule, DEFAULT_REDACTION, DEFAULT_SEPARATOR};
