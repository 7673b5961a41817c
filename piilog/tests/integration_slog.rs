//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `RedactingDrain` writes one redacted line per record to its sink
//! - record key/value pairs are rendered as `key=value` and redacted
//! - level filtering and logger names are honored
//! - `log_rows` drains a row source through the logger
//! - `RedactedKv` serializes only the redacted text

#![cfg(feature = "slog")]

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::Arguments,
    io,
    sync::{Arc, Mutex},
};

use piilog::{
    slog::{log_rows, log_rows_with, logger, logger_from_drain, RedactedKv, RedactingDrain},
    FormatterConfig, LogRow, RedactingFormatter, RedactionRule, Row, SensitiveFieldSet,
};
use slog::{info, o, warn, Drain};

/// An `io::Write` sink whose contents stay readable after the logger owns it.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(ToString::to_string)
            .collect()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that always fails.
struct BrokenSink;

impl io::Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Splits `[PII] user_data INFO <date> <time>: message` into header and message.
fn message_of(line: &str) -> &str {
    let (_, message) = line.split_once(": ").expect("line has a header");
    message
}

// ============================================================================
// Drain and logger wiring
// ============================================================================

#[test]
fn message_is_redacted_and_written_with_header() {
    let sink = SharedBuffer::default();
    let log = logger(RedactingFormatter::default(), sink.clone(), slog::Level::Info);

    info!(log, "name=Ann Lee; email=ann@example.com; role=admin");

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[PII] user_data INFO "));
    assert_eq!(message_of(&lines[0]), "name=***; email=***; role=admin");
}

#[test]
fn record_pairs_are_appended_and_redacted() {
    let sink = SharedBuffer::default();
    let log = logger(RedactingFormatter::default(), sink.clone(), slog::Level::Info);

    info!(log, "login"; "email" => "ann@example.com");

    let lines = sink.lines();
    assert_eq!(message_of(&lines[0]), "login; email=***");
}

#[test]
fn multiple_record_pairs_keep_declaration_order() {
    let sink = SharedBuffer::default();
    let log = logger(RedactingFormatter::default(), sink.clone(), slog::Level::Info);

    info!(log, ""; "id" => 7, "ssn" => "000-12-3456", "role" => "admin");

    assert_eq!(message_of(&sink.lines()[0]), "id=7; ssn=***; role=admin");
}

#[test]
fn logger_context_pairs_are_included() {
    let sink = SharedBuffer::default();
    let root = logger(RedactingFormatter::default(), sink.clone(), slog::Level::Info);
    let child = root.new(o!("phone" => "555-0100"));

    info!(child, "id=3");

    let lines = sink.lines();
    let message = message_of(&lines[0]);
    assert!(message.starts_with("id=3"));
    assert!(message.contains("phone=***"));
    assert!(!message.contains("555-0100"));
}

#[test]
fn records_below_min_level_are_dropped() {
    let sink = SharedBuffer::default();
    let log = logger(RedactingFormatter::default(), sink.clone(), slog::Level::Warning);

    info!(log, "email=quiet@example.com");
    warn!(log, "email=loud@example.com");

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" WARNING "));
    assert!(!lines[0].contains("loud@example.com"));
}

#[test]
fn drain_from_config_uses_logger_name_and_prefix() {
    let config = FormatterConfig {
        prefix: "AUDIT".into(),
        logger_name: "accounts".into(),
        ..FormatterConfig::default()
    };
    let sink = SharedBuffer::default();
    let drain = RedactingDrain::from_config(&config, sink.clone()).unwrap();
    let log = logger_from_drain(drain, slog::Level::Info);

    info!(log, "ssn=123-45-6789");

    let lines = sink.lines();
    assert!(lines[0].starts_with("[AUDIT] accounts INFO "));
    assert_eq!(message_of(&lines[0]), "ssn=***");
}

#[test]
fn drain_reports_sink_errors() {
    let drain = RedactingDrain::new(RedactingFormatter::default(), BrokenSink);
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    let values = slog::OwnedKVList::from(o!());

    let err = drain.log(&record, &values).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn logger_swallows_sink_errors() {
    let drain = RedactingDrain::new(RedactingFormatter::default(), BrokenSink);
    let log = logger_from_drain(drain, slog::Level::Info);
    info!(log, "email=a@b.c");
}

#[test]
fn into_inner_returns_the_sink() {
    let drain = RedactingDrain::new(RedactingFormatter::default(), Vec::new());
    assert!(drain.into_inner().is_empty());
}

// ============================================================================
// Row logging
// ============================================================================

#[derive(LogRow)]
struct User {
    name: String,
    email: String,
    phone: String,
    #[row(rename = "ssn")]
    social_security: String,
    password: String,
    ip: String,
    #[row(skip)]
    #[allow(dead_code)]
    session: u64,
}

fn sample_user(index: usize) -> User {
    User {
        name: format!("User {index}"),
        email: format!("user{index}@example.com"),
        phone: "555-0100".into(),
        social_security: "000-00-0000".into(),
        password: "hunter2".into(),
        ip: format!("10.0.0.{index}"),
        session: 99,
    }
}

#[test]
fn log_rows_logs_one_line_per_row() {
    let sink = SharedBuffer::default();
    let log = logger(RedactingFormatter::default(), sink.clone(), slog::Level::Info);

    let count = log_rows(&log, (1..=3).map(sample_user));

    assert_eq!(count, 3);
    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    for (index, line) in lines.iter().enumerate() {
        assert_eq!(
            message_of(line),
            format!(
                "name=***; email=***; phone=***; ssn=***; password=***; ip=10.0.0.{}",
                index + 1
            )
        );
    }
}

#[test]
fn log_rows_accepts_plain_rows_and_empty_sources() {
    let sink = SharedBuffer::default();
    let log = logger(RedactingFormatter::default(), sink.clone(), slog::Level::Info);

    assert_eq!(log_rows(&log, Vec::<Row>::new()), 0);
    assert!(sink.lines().is_empty());

    let row = Row::new(["email", "plan"], ["x@y.z", "pro"]);
    assert_eq!(log_rows(&log, [&row]), 1);
    assert_eq!(message_of(&sink.lines()[0]), "email=***; plan=pro");
}

#[test]
fn log_rows_with_uses_the_formatter_separator() {
    let rule = RedactionRule::new("***", " | ").unwrap();
    let formatter = RedactingFormatter::with_rule(SensitiveFieldSet::default(), rule).unwrap();
    let sink = SharedBuffer::default();
    let log = logger(formatter.clone(), sink.clone(), slog::Level::Info);

    let row = Row::new(["name", "city", "email"], ["Ann; Lee", "Oslo", "ann@example.com"]);
    assert_eq!(log_rows_with(&log, &formatter, [row]), 1);

    assert_eq!(
        message_of(&sink.lines()[0]),
        "name=*** | city=Oslo | email=***"
    );
}

// ============================================================================
// RedactedKv as a slog::Value
// ============================================================================

struct CapturingSerializer {
    captured: RefCell<HashMap<String, String>>,
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), val.to_string());
        Ok(())
    }
}

#[test]
fn redacted_kv_serializes_redacted_text_only() {
    let formatter = RedactingFormatter::default();
    let value = RedactedKv::new(&formatter, "name=Ann; plan=pro");
    assert_eq!(value.as_str(), "name=***; plan=pro");

    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());

    let mut serializer = CapturingSerializer {
        captured: RefCell::new(HashMap::new()),
    };
    slog::Value::serialize(&value, &record, "data", &mut serializer).unwrap();
    assert_eq!(
        serializer.captured.borrow().get("data").map(String::as_str),
        Some("name=***; plan=pro")
    );
}
