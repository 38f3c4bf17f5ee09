//! Output generation for the Data Sweeper pipeline.
//!
//! This crate serializes a [`Table`] into one of the supported formats:
//!
//! - **CSV**: header row, comma separated, UTF-8, no index column
//! - **Excel**: single `Sheet1` workbook, bold header row, no index column
//!
//! [`convert`] pairs the bytes with the output file name and MIME type.

mod csv_writer;
mod error;
mod xlsx_writer;

use std::time::Instant;

use tracing::info;

use sweeper_common::Table;
use sweeper_model::{ConversionRequest, ConversionResult, FileFormat, split_extension};

pub use csv_writer::write_csv;
pub use error::{OutputError, Result};
pub use xlsx_writer::{MAX_COLUMNS, MAX_ROWS, SHEET_NAME, write_xlsx};

/// Name of the converted file: the source extension replaced by the target's.
///
/// ```
/// use sweeper_model::FileFormat;
/// use sweeper_output::output_file_name;
///
/// assert_eq!(output_file_name("Sales.CSV", FileFormat::Excel), "Sales.xlsx");
/// assert_eq!(output_file_name("report.xlsx", FileFormat::Csv), "report.csv");
/// ```
pub fn output_file_name(source_name: &str, format: FileFormat) -> String {
    let (stem, _) = split_extension(source_name);
    format!("{stem}{}", format.extension())
}

/// Serializes a table in the requested format.
pub fn serialize(table: &Table, format: FileFormat) -> Result<Vec<u8>> {
    match format {
        FileFormat::Csv => write_csv(table),
        FileFormat::Excel => write_xlsx(table),
    }
}

/// Converts a table into a named, typed output buffer.
pub fn convert(
    table: &Table,
    source_name: &str,
    request: &ConversionRequest,
) -> Result<ConversionResult> {
    let format = request.target_format;
    let start = Instant::now();
    let bytes = serialize(table, format)?;
    let file_name = output_file_name(source_name, format);
    info!(
        source = %source_name,
        output = %file_name,
        format = %format,
        bytes = bytes.len(),
        duration_ms = start.elapsed().as_millis(),
        "converted file"
    );
    Ok(ConversionResult {
        file_name,
        bytes,
        mime_type: format.mime_type().to_string(),
    })
}
