//! Single-student lookup over a published result.
//!
//! Bad input is a user-facing message, not a failure of the system: the
//! [`LookupError`] display text is meant to be shown as-is.

use thiserror::Error;

use crate::models::ResultRow;

/// Why a lookup produced no row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The entered id is not a number.
    #[error("Please enter a valid numeric Unique ID (got '{0}').")]
    NotNumeric(String),

    /// No result row has this id.
    #[error("No allotment found for Unique ID {0}.")]
    NotFound(i64),
}

/// Finds the result row for a raw, user-entered id.
pub fn find_by_id<'a>(rows: &'a [ResultRow], raw: &str) -> Result<&'a ResultRow, LookupError> {
    let text = raw.trim();
    let id: i64 = text
        .parse()
        .map_err(|_| LookupError::NotNumeric(text.to_string()))?;
    rows.iter()
        .find(|r| r.unique_id == Some(id))
        .ok_or(LookupError::NotFound(id))
}
