//! CSV adapters.
//!
//! Reads input relations into [`RawTable`]s and writes/reads the published
//! result relation. Everything here is plumbing around the `csv` crate;
//! no cell is interpreted.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{AllotError, AllotResult};
use crate::models::ResultRow;
use crate::table::{RawTable, Relation};

/// Reads a CSV file into a raw table.
///
/// Rows may have fewer or more cells than the header. A file that cannot
/// be opened or decoded is an input-shape error.
pub fn read_table(relation: Relation, path: &Path) -> AllotResult<RawTable> {
    let unreadable = |source: csv::Error| AllotError::Source {
        relation,
        path: path.to_path_buf(),
        source,
    };
    let reader = reader_builder().from_path(path).map_err(unreadable)?;
    collect_table(reader).map_err(unreadable)
}

/// Reads CSV from any reader into a raw table.
pub fn read_table_from<R: Read>(reader: R) -> AllotResult<RawTable> {
    Ok(collect_table(reader_builder().from_reader(reader))?)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.flexible(true).trim(csv::Trim::Headers);
    builder
}

fn collect_table<R: Read>(mut reader: csv::Reader<R>) -> Result<RawTable, csv::Error> {
    let mut table = RawTable::new(reader.headers()?.iter());
    for record in reader.records() {
        table.push_row(record?.iter());
    }
    Ok(table)
}

/// Writes result rows to a CSV file with the fixed lowercase header.
pub fn write_results(path: &Path, rows: &[ResultRow]) -> AllotResult<()> {
    let file = std::fs::File::create(path)?;
    write_results_to(file, rows)
}

/// Writes result rows to any writer.
///
/// The header is always written, even for an empty result.
pub fn write_results_to<W: Write>(writer: W, rows: &[ResultRow]) -> AllotResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(ResultRow::HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a previously written result relation.
pub fn read_results(path: &Path) -> AllotResult<Vec<ResultRow>> {
    let unreadable = |source: csv::Error| AllotError::Source {
        relation: Relation::Results,
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(unreadable)?;
    reader
        .deserialize()
        .collect::<Result<Vec<ResultRow>, _>>()
        .map_err(unreadable)
}
