//! Error types for allotment runs.
//!
//! Only input-shape problems are errors: a source that cannot be read, or
//! one that lacks a column the run cannot do without. Bad cells, unknown
//! references and students without a seat are absorbed into the data
//! model instead (see [`crate::normalize`] and [`crate::allotment`]).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::table::Relation;

/// Result type alias for allotment operations.
pub type AllotResult<T> = Result<T, AllotError>;

/// Fatal errors that abort a run before allocation starts.
#[derive(Error, Debug)]
pub enum AllotError {
    /// An input file could not be opened or decoded.
    #[error("cannot read {relation} input '{}': {source}", path.display())]
    Source {
        relation: Relation,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A relation lacks a column needed to key or order its records.
    #[error("{relation} input is missing required column '{column}'")]
    MissingColumn {
        relation: Relation,
        column: &'static str,
    },

    /// CSV encoding/decoding failure outside of source loading.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while writing results.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AllotError {
    /// Creates a missing-column error.
    pub fn missing_column(relation: Relation, column: &'static str) -> Self {
        Self::MissingColumn { relation, column }
    }

    /// Whether the error concerns the shape of an input relation.
    pub fn is_input_shape(&self) -> bool {
        matches!(self, Self::Source { .. } | Self::MissingColumn { .. })
    }
}
