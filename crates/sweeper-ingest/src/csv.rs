//! CSV reading from in-memory bytes.

use std::io::Cursor;

use polars::prelude::{CsvReadOptions, NullValues, SerReader};

use sweeper_common::Table;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Field values read as missing, in addition to empty fields.
pub const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn missing_values() -> NullValues {
    NullValues::AllColumns(MISSING_TOKENS.iter().map(|token| (*token).into()).collect())
}

/// Reads CSV bytes into a table.
///
/// The first row is the header. Types are inferred over every row and empty
/// fields and the [`MISSING_TOKENS`] become missing values. A leading UTF-8
/// BOM is ignored.
pub fn read_csv_bytes(file_name: &str, bytes: &[u8]) -> Result<Table> {
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::parse(file_name, "no columns to parse from file"));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|options| options.with_null_values(Some(missing_values())))
        .into_reader_with_file_handle(Cursor::new(content.to_vec()))
        .finish()
        .map_err(|e| IngestError::parse(file_name, e))?;

    Ok(Table::from_frame(df))
}
