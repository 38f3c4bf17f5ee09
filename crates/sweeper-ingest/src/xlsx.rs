//! XLSX reading from in-memory bytes.

use std::collections::HashSet;
use std::io::Cursor;

use calamine::{Data, DataType as _, Reader, Xlsx};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use sweeper_common::{Cell, Table, format_numeric};
use sweeper_model::ColumnKind;

use crate::error::{IngestError, Result};

/// Prefix for columns whose header cell is blank.
pub const UNNAMED_PREFIX: &str = "Unnamed: ";

/// Text form of date and datetime cells.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the first worksheet of an XLSX workbook into a table.
///
/// The first row supplies column names; every later row is data. Short rows
/// are padded with missing values.
pub fn read_xlsx_bytes(file_name: &str, bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes.to_vec())).map_err(|e| IngestError::parse(file_name, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            file: file_name.to_string(),
        })?
        .map_err(|e| IngestError::parse(file_name, e))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        debug!(file = %file_name, "worksheet is empty");
        return Ok(Table::default());
    };
    let headers = header_names(header_row);

    let mut values: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(row.get(idx).map_or(Cell::Null, data_to_cell));
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    let mut kinds = Vec::with_capacity(headers.len());
    for (name, cells) in headers.iter().zip(values) {
        let (column, kind) = build_column(name, cells);
        columns.push(column);
        kinds.push(kind);
    }
    let df = DataFrame::new(columns)?;
    Ok(Table::with_kinds(df, kinds)?)
}

fn data_to_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Null,
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) => Cell::Float(*v),
        Data::Bool(v) => Cell::Bool(*v),
        Data::String(s) if s.is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) if dt.is_duration() => match value.as_duration() {
            Some(duration) => Cell::Text(format_duration(duration)),
            None => Cell::Text(value.to_string()),
        },
        Data::DateTime(_) | Data::DateTimeIso(_) => {
            let datetime = value
                .as_datetime()
                .or_else(|| value.as_date().and_then(|date| date.and_hms_opt(0, 0, 0)));
            match datetime {
                Some(datetime) => Cell::Text(datetime.format(DATETIME_FORMAT).to_string()),
                None => Cell::Text(value.to_string()),
            }
        }
        other => Cell::Text(other.to_string()),
    }
}

/// `<days> days HH:MM:SS`, whole seconds.
fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let (days, rest) = (total / 86_400, total % 86_400);
    format!(
        "{sign}{days} days {:02}:{:02}:{:02}",
        rest / 3_600,
        rest % 3_600 / 60,
        rest % 60
    )
}

/// Column names from the header row, made unique.
///
/// Blank cells become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(row.len());
    for (idx, value) in row.iter().enumerate() {
        let base = match data_to_cell(value) {
            Cell::Null => format!("{UNNAMED_PREFIX}{idx}"),
            Cell::Float(v) => format_numeric(v),
            cell => cell.to_string(),
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while !seen.insert(name.clone()) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        names.push(name);
    }
    names
}

/// Builds a typed column from raw cells and declares its kind.
fn build_column(name: &str, cells: Vec<Cell>) -> (Column, ColumnKind) {
    let present: Vec<&Cell> = cells.iter().filter(|cell| !cell.is_null()).collect();
    let has_missing = present.len() < cells.len();

    if present.is_empty() {
        let values: Vec<Option<String>> = vec![None; cells.len()];
        return (
            Series::new(name.into(), values).into_column(),
            ColumnKind::Text,
        );
    }

    let all_numeric = present.iter().all(|cell| cell.as_f64().is_some());
    if all_numeric {
        let integral = present.iter().all(|cell| match cell {
            Cell::Int(_) => true,
            Cell::Float(v) => v.fract() == 0.0 && v.abs() < 9.0e15,
            _ => false,
        });
        // Whole numbers stay integers unless a gap forces a float column.
        if integral && !has_missing {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| cell.as_f64().map(|v| v as i64))
                .collect();
            return (
                Series::new(name.into(), values).into_column(),
                ColumnKind::Numeric,
            );
        }
        let values: Vec<Option<f64>> = cells.iter().map(Cell::as_f64).collect();
        return (
            Series::new(name.into(), values).into_column(),
            ColumnKind::Numeric,
        );
    }

    if present.iter().all(|cell| matches!(cell, Cell::Bool(_))) {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|cell| match cell {
                Cell::Bool(v) => Some(*v),
                _ => None,
            })
            .collect();
        return (
            Series::new(name.into(), values).into_column(),
            ColumnKind::Boolean,
        );
    }

    let values: Vec<Option<String>> = cells
        .iter()
        .map(|cell| match cell {
            Cell::Null => None,
            Cell::Float(v) => Some(format_numeric(*v)),
            other => Some(other.to_string()),
        })
        .collect();
    (
        Series::new(name.into(), values).into_column(),
        ColumnKind::Text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            format_duration(chrono::Duration::seconds(90_061)),
            "1 days 01:01:01"
        );
        assert_eq!(format_duration(chrono::Duration::seconds(-60)), "-0 days 00:01:00");
    }

    #[test]
    fn test_header_names_unique_and_unnamed() {
        let row = vec![
            Data::String("a".to_string()),
            Data::Empty,
            Data::String("a".to_string()),
            Data::Float(2024.0),
        ];
        assert_eq!(header_names(&row), vec!["a", "Unnamed: 1", "a.1", "2024"]);
    }

    #[test]
    fn test_build_column_integral_floats_become_integers() {
        let (column, kind) = build_column("n", vec![Cell::Float(1.0), Cell::Float(2.0)]);
        assert_eq!(kind, ColumnKind::Numeric);
        assert_eq!(column.dtype(), &polars::prelude::DataType::Int64);
    }

    #[test]
    fn test_build_column_gap_forces_float() {
        let (column, kind) = build_column("n", vec![Cell::Float(1.0), Cell::Null]);
        assert_eq!(kind, ColumnKind::Numeric);
        assert_eq!(column.dtype(), &polars::prelude::DataType::Float64);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_build_column_mixed_is_text() {
        let (column, kind) = build_column(
            "m",
            vec![Cell::Float(1.5), Cell::Text("x".to_string()), Cell::Null],
        );
        assert_eq!(kind, ColumnKind::Text);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_build_column_booleans() {
        let (_, kind) = build_column("b", vec![Cell::Bool(true), Cell::Null]);
        assert_eq!(kind, ColumnKind::Boolean);
    }

    #[test]
    fn test_corrupt_workbook_is_parse_error() {
        let err = read_xlsx_bytes("bad.xlsx", b"not a zip").unwrap_err();
        assert!(matches!(err, IngestError::Parse { ref file, .. } if file == "bad.xlsx"));
    }
}
