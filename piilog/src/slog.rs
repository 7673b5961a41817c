//! Adapters for emitting redacted lines through `slog`.
//!
//! This module connects [`RedactingFormatter`] to `slog`:
//!
//! - [`RedactingDrain`] is a `slog::Drain` that renders each record into the
//!   line format, redacts it, and writes it to an `io::Write` sink.
//! - [`logger`] wires a drain into a root `slog::Logger`. There is no global
//!   registry: callers keep the returned handle and pass it around.
//! - [`log_rows`] logs one INFO record per row from a row source.
//! - [`RedactedKv`] is a `slog::Value` that carries an already redacted
//!   `key=value` message, for drains other than [`RedactingDrain`].
//!
//! Sink failures are reported through the drain's `Result`. The logger built
//! by [`logger`] drops them, so a failing sink never panics a call site.

use std::{
    fmt::{self, Arguments},
    io,
    sync::Mutex,
};

use slog::{
    Drain, Key, Level as SlogLevel, LevelFilter, Logger, OwnedKVList, Record,
    Result as SlogResult, Serializer, Value as SlogValue, KV,
};

use crate::{
    config::{FormatterConfig, DEFAULT_LOGGER_NAME},
    error::ConfigurationError,
    formatter::RedactingFormatter,
    record::LogRecord,
    redaction::DEFAULT_SEPARATOR,
    row::AsRow,
};

/// A `slog::Drain` that writes redacted lines to `sink`, one per record.
///
/// The record's key/value pairs are appended to its message as `key=value`
/// joined by the formatter's separator, so
/// `info!(log, "login"; "email" => "a@b.c")` produces a line ending in
/// `login; email=***`.
pub struct RedactingDrain<W> {
    formatter: RedactingFormatter,
    logger_name: String,
    sink: Mutex<W>,
}

impl<W> RedactingDrain<W>
where
    W: io::Write,
{
    pub fn new(formatter: RedactingFormatter, sink: W) -> Self {
        Self {
            formatter,
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
            sink: Mutex::new(sink),
        }
    }

    /// Builds the formatter from `config` and uses its logger name.
    pub fn from_config(config: &FormatterConfig, sink: W) -> Result<Self, ConfigurationError> {
        let formatter = RedactingFormatter::from_config(config)?;
        Ok(Self::new(formatter, sink).with_logger_name(config.logger_name.clone()))
    }

    /// Sets the name rendered after the prefix.
    #[must_use]
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    pub fn formatter(&self) -> &RedactingFormatter {
        &self.formatter
    }

    /// Returns the sink, e.g. to inspect a buffer after logging.
    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn render_message(&self, record: &Record<'_>, values: &OwnedKVList) -> SlogResult<String> {
        let mut record_pairs = PairCollector::default();
        record.kv().serialize(record, &mut record_pairs)?;
        let mut logger_pairs = PairCollector::default();
        values.serialize(record, &mut logger_pairs)?;

        // slog serializes pairs last-declared first.
        let pairs: Vec<String> = record_pairs
            .pairs
            .into_iter()
            .rev()
            .chain(logger_pairs.pairs.into_iter().rev())
            .collect();

        let separator = self.formatter.rule().separator();
        let mut message = record.msg().to_string();
        if !pairs.is_empty() {
            if !message.is_empty() {
                message.push_str(separator);
            }
            message.push_str(&pairs.join(separator));
        }
        Ok(message)
    }
}

impl<W> Drain for RedactingDrain<W>
where
    W: io::Write,
{
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> io::Result<()> {
        let message = self
            .render_message(record, values)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        let record = LogRecord::now(self.logger_name.clone(), record.level().into(), message);
        let line = self.formatter.format(&record);

        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink lock poisoned"))?;
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()
    }
}

/// Collects `key=value` strings in the order `slog` emits them.
#[derive(Default)]
struct PairCollector {
    pairs: Vec<String>,
}

impl Serializer for PairCollector {
    fn emit_arguments(&mut self, key: Key, val: &Arguments<'_>) -> SlogResult {
        self.pairs.push(format!("{key}={val}"));
        Ok(())
    }
}

/// Builds a root logger that writes redacted lines to `sink`.
///
/// Records below `min_level` are discarded. Write errors are ignored.
///
/// The returned `Logger` does not expose `formatter`. Rows logged through it
/// must be joined with the formatter's separator: use [`log_rows_with`] with
/// the same formatter when it does not use the default separator.
///
/// ## Example
/// ```
/// use piilog::{slog::logger, RedactingFormatter};
///
/// let log = logger(RedactingFormatter::default(), std::io::stderr(), slog::Level::Info);
/// slog::info!(log, "name=Ann; email=ann@example.com; role=admin");
/// ```
pub fn logger<W>(formatter: RedactingFormatter, sink: W, min_level: SlogLevel) -> Logger
where
    W: io::Write + Send + 'static,
{
    logger_from_drain(RedactingDrain::new(formatter, sink), min_level)
}

/// Same as [`logger`] for an already configured drain.
pub fn logger_from_drain<W>(drain: RedactingDrain<W>, min_level: SlogLevel) -> Logger
where
    W: io::Write + Send + 'static,
{
    let drain = LevelFilter::new(drain, min_level).ignore_res();
    Logger::root(drain, slog::o!())
}

/// Logs every row from `rows` at INFO, joined with the default separator.
///
/// Returns the number of rows logged. The source is consumed. Only correct
/// for loggers whose formatter uses [`DEFAULT_SEPARATOR`]; see
/// [`log_rows_with`] otherwise.
pub fn log_rows<I>(logger: &Logger, rows: I) -> usize
where
    I: IntoIterator,
    I::Item: AsRow,
{
    join_and_log(logger, rows, DEFAULT_SEPARATOR)
}

/// Logs every row from `rows` at INFO, joined with `formatter`'s separator.
///
/// `formatter` should be the one the logger was built with, so that the
/// drain bounds values at the same separator the rows are joined with.
pub fn log_rows_with<I>(logger: &Logger, formatter: &RedactingFormatter, rows: I) -> usize
where
    I: IntoIterator,
    I::Item: AsRow,
{
    join_and_log(logger, rows, formatter.rule().separator())
}

fn join_and_log<I>(logger: &Logger, rows: I, separator: &str) -> usize
where
    I: IntoIterator,
    I::Item: AsRow,
{
    let mut count = 0;
    for row in rows {
        let message = row.as_row().to_message(separator);
        slog::info!(logger, "{}", message);
        count += 1;
    }
    count
}

/// A `slog::Value` holding the redacted form of a `key=value` message.
///
/// The message is redacted once, at construction. The original text is not
/// kept.
///
/// ## Example
/// ```ignore
/// use piilog::slog::RedactedKv;
///
/// info!(log, "row"; "data" => RedactedKv::new(&formatter, "name=Ann; id=3"));
/// ```
#[derive(Clone)]
pub struct RedactedKv {
    redacted: String,
}

impl RedactedKv {
    pub fn new(formatter: &RedactingFormatter, message: &str) -> Self {
        Self {
            redacted: formatter.redact(message).into_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.redacted
    }
}

impl fmt::Debug for RedactedKv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RedactedKv").field(&self.redacted).finish()
    }
}

impl SlogValue for RedactedKv {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.redacted)
    }
}
