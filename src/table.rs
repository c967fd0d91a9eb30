//! Untyped tabular input.
//!
//! [`RawTable`] is the hand-off point between file adapters and the
//! normalizer: headers and cells are plain strings, nothing is typed yet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The input and output relations of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Students,
    Seats,
    Preferences,
    Results,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Students => "students",
            Self::Seats => "seats",
            Self::Preferences => "preferences",
            Self::Results => "results",
        };
        f.write_str(name)
    }
}

/// A header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column headers as read (trimmed).
    pub headers: Vec<String>,
    /// Data rows. May be shorter than `headers`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates an empty table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(|h| h.into().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row (builder form).
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    /// Appends a row.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Cell at `(row, col)`; missing cells read as `""`.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
