//! PII-redacting structured log formatting.
//!
//! This crate turns log records into a fixed, greppable line format and
//! scrubs the values of sensitive `key=value` pairs on the way out:
//!
//! ```text
//! [PII] user_data INFO 2024-03-01 09:30:00,000: name=***; email=***; role=admin
//! ```
//!
//! It separates:
//! - **Fields**: which keys are sensitive ([`SensitiveFieldSet`]).
//! - **Rule**: what a redacted value becomes and where values end
//!   ([`RedactionRule`]).
//! - **Formatting**: rendering a [`LogRecord`] and applying both
//!   ([`RedactingFormatter`]).
//!
//! Redaction assumes messages are `key=value` pairs joined by the separator
//! and that no value contains the separator. See [`filter`].
//!
//! What this crate does:
//! - redacts and formats records, purely and without shared state
//! - provides a `slog` drain and logger wiring behind the `slog` feature
//! - renders rows from a record source, with `#[derive(LogRow)]` for structs
//! - provides a salted credential hasher behind the `hasher` feature
//!
//! What it does not do:
//! - store, ship, or rotate logs
//! - open database connections (only [`DbConfig`] is provided)

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use piilog_derive::LogRow;

#[allow(unused_extern_crates)]
extern crate self as piilog;

// Module declarations
mod config;
mod error;
mod fields;
mod formatter;
#[cfg(feature = "hasher")]
mod hasher;
mod record;
mod redaction;
mod row;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use config::{
    DbConfig, FormatterConfig, DB_HOST_VAR, DB_NAME_VAR, DB_PASSWORD_VAR, DB_USERNAME_VAR,
    DEFAULT_LOGGER_NAME, DEFAULT_PREFIX,
};
#[cfg(feature = "hasher")]
pub use error::HashError;
pub use error::ConfigurationError;
pub use fields::{SensitiveFieldSet, DEFAULT_PII_FIELDS};
pub use formatter::{RedactingFormatter, TIMESTAMP_FORMAT};
#[cfg(feature = "hasher")]
pub use hasher::{CredentialHasher, Digest, SaltedHasher, DEFAULT_COST};
pub use record::{Level, LogRecord};
pub use redaction::{filter, RedactionRule, DEFAULT_REDACTION, DEFAULT_SEPARATOR};
pub use row::{AsRow, Row};
