//! XLSX serialization.

use rust_xlsxwriter::{Format, Workbook};

use sweeper_common::{Cell, Table};
use sweeper_model::FileFormat;

use crate::error::{OutputError, Result};

/// Name of the single worksheet written.
pub const SHEET_NAME: &str = "Sheet1";

/// Rows per worksheet, header included.
pub const MAX_ROWS: usize = 1_048_576;

/// Columns per worksheet.
pub const MAX_COLUMNS: usize = 16_384;

/// Serializes a table as a single-sheet workbook with a bold header row
/// and no index column.
///
/// Fails when the table exceeds the sheet limits or holds a non-finite
/// number, neither of which a cell can store.
pub fn write_xlsx(table: &Table) -> Result<Vec<u8>> {
    if table.width() > MAX_COLUMNS {
        return Err(OutputError::serialization(
            FileFormat::Excel,
            format!("{} columns exceed the sheet limit of {MAX_COLUMNS}", table.width()),
        ));
    }
    if table.height() + 1 > MAX_ROWS {
        return Err(OutputError::serialization(
            FileFormat::Excel,
            format!("{} rows exceed the sheet limit of {}", table.height(), MAX_ROWS - 1),
        ));
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // Limits were checked above, so the narrowing casts below cannot truncate.
    for (col, name) in table.column_names().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header)?;
    }
    for row in 0..table.height() {
        let sheet_row = (row + 1) as u32;
        for (col, cell) in table.row(row).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Null => {}
                Cell::Int(v) => {
                    worksheet.write_number(sheet_row, col, v as f64)?;
                }
                Cell::Float(v) if !v.is_finite() => {
                    return Err(OutputError::serialization(
                        FileFormat::Excel,
                        format!("cannot store {v} in row {}, column {}", row + 1, col + 1),
                    ));
                }
                Cell::Float(v) => {
                    worksheet.write_number(sheet_row, col, v)?;
                }
                Cell::Bool(v) => {
                    worksheet.write_boolean(sheet_row, col, v)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(sheet_row, col, s)?;
                }
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

    #[test]
    fn test_write_xlsx_produces_zip() {
        let df = DataFrame::new(vec![Series::new("a".into(), &[1i64, 2]).into_column()]).unwrap();
        let bytes = write_xlsx(&Table::from_frame(df)).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_xlsx_rejects_non_finite() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &[1.0f64, f64::INFINITY]).into_column(),
        ])
        .unwrap();
        let err = write_xlsx(&Table::from_frame(df)).unwrap_err();
        assert!(matches!(
            err,
            OutputError::Serialization {
                format: FileFormat::Excel,
                ..
            }
        ));
    }
}
