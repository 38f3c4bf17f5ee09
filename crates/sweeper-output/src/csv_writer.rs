//! CSV serialization.

use csv::{Terminator, WriterBuilder};

use sweeper_common::Table;
use sweeper_model::FileFormat;

use crate::error::{OutputError, Result};

/// Serializes a table as UTF-8 CSV with a header row and no index column.
///
/// Missing values are written as empty fields. A table without columns has
/// no header to write and serializes to zero bytes, whatever its row count.
pub fn write_csv(table: &Table) -> Result<Vec<u8>> {
    if table.width() == 0 {
        return Ok(Vec::new());
    }
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(table.column_names())?;
    for row in 0..table.height() {
        writer.write_record(table.row(row).iter().map(ToString::to_string))?;
    }
    writer
        .into_inner()
        .map_err(|e| OutputError::serialization(FileFormat::Csv, e.error()))
}
