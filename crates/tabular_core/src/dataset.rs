//! Dataset representation for validation.
//!
//! The engine never owns or mutates the data it checks. It reads it through
//! the [`Dataset`] trait, and [`Table`] is the in-memory implementation used
//! by the CLI and the tests.

use std::collections::BTreeMap;

/// A single row of data.
///
/// Fields are keyed by their 0-based column index. Rows may be ragged or
/// sparse: a column the row does not carry is reported by [`Row::get`] as
/// absent, which is different from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: BTreeMap<usize, String>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a row from positional values, starting at column 0.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().collect()
    }

    /// Sets the value of a column, returning the row for chaining.
    pub fn with(mut self, column: usize, value: impl Into<String>) -> Self {
        self.fields.insert(column, value.into());
        self
    }

    /// Sets the value of a column, returning the previous value if any.
    pub fn insert(&mut self, column: usize, value: impl Into<String>) -> Option<String> {
        self.fields.insert(column, value.into())
    }

    /// Gets the value at a column, or `None` if the row does not carry it.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.fields.get(&column).map(String::as_str)
    }

    /// Returns true if the row carries a value for the column.
    pub fn contains(&self, column: usize) -> bool {
        self.fields.contains_key(&column)
    }

    /// Returns the number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the row carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.fields.iter().map(|(column, value)| (*column, value.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .enumerate()
                .map(|(column, value)| (column, value.into()))
                .collect(),
        }
    }
}

/// Read-only access to tabular data.
///
/// Implement this for any source the engine should validate. The engine only
/// calls these accessors and never requires mutation.
pub trait Dataset {
    /// Whether the first line of the source is a header row (the legend).
    fn has_headers(&self) -> bool;

    /// The declared headers, empty if the source has none.
    fn headers(&self) -> &[String];

    /// The data rows in source order, excluding the header row.
    fn rows(&self) -> &[Row];

    /// Returns the number of data rows.
    fn len(&self) -> usize {
        self.rows().len()
    }

    /// Returns true if there are no data rows.
    fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// An in-memory dataset.
///
/// # Example
///
/// ```rust
/// use tabular_core::{Dataset, Row, Table};
///
/// let table = Table::with_headers(["id", "age"])
///     .with_row(Row::from_values(["7", "42"]));
///
/// assert!(table.has_headers());
/// assert_eq!(table.rows()[0].get(1), Some("42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Option<Vec<String>>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a new empty table without a header row.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table without headers from rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            headers: None,
            rows,
        }
    }

    /// Creates an empty table whose first line is the given header row.
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: Some(headers.into_iter().map(Into::into).collect()),
            rows: Vec::new(),
        }
    }

    /// Appends a row, returning the table for chaining.
    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Appends several rows, returning the table for chaining.
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Appends a row.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}

impl Dataset for Table {
    fn has_headers(&self) -> bool {
        self.headers.is_some()
    }

    fn headers(&self) -> &[String] {
        self.headers.as_deref().unwrap_or(&[])
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
