//! Bounded `key=value` substitution.
//!
//! The scanner walks the message once. At every position where a key may
//! start it checks whether a sensitive name followed by `=` begins there; if
//! so the value up to the next separator is replaced and scanning resumes at
//! that separator.
//!
//! A key may start only at the beginning of the message or directly after a
//! separator. This anchors both ends of the name: `email` matches neither
//! `emails=` nor `user_email=`, and `key=` text inside another pair's value
//! (`note=sent to email=x`) is left alone.
//!
//! Because every position is tested against the whole field set at once, the
//! output does not depend on the order of the fields.

use std::borrow::Cow;

/// Replaces the value of every `field=value` pair whose key is in `fields`.
///
/// # Preconditions
///
/// `message` is expected to be a sequence of `key=value` pairs joined by
/// `separator`. [`RedactingFormatter`](crate::RedactingFormatter) redacts the
/// message before adding the line header, so the header never needs to be
/// scanned.
/// No value may contain `separator`: the value is taken to end at the first
/// separator after `key=`, so a value that embeds one is only redacted up to
/// that point.
///
/// Text that does not look like pairs is left as is. Fields that never appear
/// are ignored. Empty field names never match.
///
/// Returns the input unchanged (borrowed) when nothing was redacted.
#[must_use]
pub fn filter<'a, S>(
    fields: &[S],
    redaction: &str,
    message: &'a str,
    separator: &str,
) -> Cow<'a, str>
where
    S: AsRef<str>,
{
    if fields.is_empty() || separator.is_empty() {
        return Cow::Borrowed(message);
    }

    let mut output: Option<String> = None;
    // Start of the not-yet-copied tail of `message`.
    let mut copied = 0;
    let mut pos = 0;

    while pos < message.len() {
        if !at_key_start(message, pos, separator) {
            pos += next_char_len(message, pos);
            continue;
        }

        let Some(key_len) = matching_key(fields, &message[pos..]) else {
            pos += next_char_len(message, pos);
            continue;
        };

        let value_start = pos + key_len + 1;
        let value_end = message[value_start..]
            .find(separator)
            .map_or(message.len(), |offset| value_start + offset);

        let out = output.get_or_insert_with(|| String::with_capacity(message.len()));
        out.push_str(&message[copied..value_start]);
        out.push_str(redaction);
        copied = value_end;
        pos = value_end;
    }

    match output {
        Some(mut out) => {
            out.push_str(&message[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(message),
    }
}

/// A key may begin at the start or right after a separator.
fn at_key_start(message: &str, pos: usize, separator: &str) -> bool {
    pos == 0 || message[..pos].ends_with(separator)
}

/// Returns the length of the field name that starts `rest` and is directly
/// followed by `=`.
///
/// At most one field can match: names never contain `=`, so a shorter name
/// that is a prefix of a longer one is followed by a name character, not `=`.
fn matching_key<S: AsRef<str>>(fields: &[S], rest: &str) -> Option<usize> {
    fields.iter().map(AsRef::as_ref).find_map(|field| {
        if field.is_empty() {
            return None;
        }
        rest.strip_prefix(field)
            .filter(|after| after.starts_with('='))
            .map(|_| field.len())
    })
}

fn next_char_len(message: &str, pos: usize) -> usize {
    message[pos..].chars().next().map_or(1, char::len_utf8)
}
