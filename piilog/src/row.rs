//! Rows read from a record source and their `key=value` rendering.
//!
//! A row source is any finite iterator of values implementing [`AsRow`];
//! a live database cursor is the typical case. It is consumed once.

use std::fmt;

/// Ordered column names paired with ordered values.
///
/// Pairs are formed positionally. If one list is longer than the other the
/// extra entries are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<String>,
}

impl Row {
    pub fn new<C, V>(columns: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a row from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values) = pairs
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .unzip();
        Self { columns, values }
    }

    /// Appends one column/value pair.
    pub fn push(&mut self, column: impl Into<String>, value: impl fmt::Display) {
        self.columns.push(column.into());
        self.values.push(value.to_string());
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.columns
            .iter()
            .zip(&self.values)
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }

    /// Renders `col1=val1<separator>col2=val2...`.
    pub fn to_message(&self, separator: &str) -> String {
        let mut message = String::new();
        for (index, (column, value)) in self.pairs().enumerate() {
            if index > 0 {
                message.push_str(separator);
            }
            message.push_str(column);
            message.push('=');
            message.push_str(value);
        }
        message
    }
}

/// Types that can be logged as one row.
///
/// Usually derived with `#[derive(LogRow)]`.
pub trait AsRow {
    fn as_row(&self) -> Row;
}

impl AsRow for Row {
    fn as_row(&self) -> Row {
        self.clone()
    }
}

impl<T: AsRow + ?Sized> AsRow for &T {
    fn as_row(&self) -> Row {
        (**self).as_row()
    }
}
