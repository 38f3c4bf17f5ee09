//! In-memory table shared by every pipeline stage.

use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, IntoColumn, NewChunkedArray, PolarsError,
};
use thiserror::Error;

use sweeper_model::ColumnKind;

use crate::polars::{Cell, any_to_cell, kind_for_dtype};

/// Errors raised by table operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// Declared kinds do not line up with the columns.
    #[error("expected {columns} column kinds, got {kinds}")]
    KindMismatch { columns: usize, kinds: usize },

    /// Column not found in the table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Row mask length differs from the row count.
    #[error("row mask has {mask} entries for {rows} rows")]
    MaskLength { rows: usize, mask: usize },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for TableError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// A Polars `DataFrame` plus the declared [`ColumnKind`] of each column.
///
/// Kinds are positional: `kinds()[i]` describes the `i`-th column.
#[derive(Debug, Clone, Default)]
pub struct Table {
    data: DataFrame,
    kinds: Vec<ColumnKind>,
}

impl Table {
    /// Wraps a frame, declaring each column's kind from its data type.
    pub fn from_frame(data: DataFrame) -> Self {
        let kinds = data
            .get_columns()
            .iter()
            .map(|column| kind_for_dtype(column.dtype()))
            .collect();
        Self { data, kinds }
    }

    /// Wraps a frame with explicitly declared kinds.
    pub fn with_kinds(data: DataFrame, kinds: Vec<ColumnKind>) -> Result<Self, TableError> {
        if kinds.len() != data.width() {
            return Err(TableError::KindMismatch {
                columns: data.width(),
                kinds: kinds.len(),
            });
        }
        Ok(Self { data, kinds })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_frame(self) -> DataFrame {
        self.data
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Position of a column by exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.data
            .get_columns()
            .iter()
            .position(|column| column.name().as_str() == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.position(name).map(|idx| self.kinds[idx])
    }

    /// Names of the numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.data
            .get_columns()
            .iter()
            .zip(&self.kinds)
            .filter(|(_, kind)| kind.is_numeric())
            .map(|(column, _)| column.name().to_string())
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.data
            .column(name)
            .map_err(|_| TableError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Value at `row` of the column at position `column`.
    ///
    /// Out-of-range positions read as [`Cell::Null`].
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.data
            .get_columns()
            .get(column)
            .and_then(|col| col.get(row).ok())
            .map_or(Cell::Null, any_to_cell)
    }

    /// All values of one row, in column order.
    pub fn row(&self, row: usize) -> Vec<Cell> {
        self.data
            .get_columns()
            .iter()
            .map(|col| any_to_cell(col.get(row).unwrap_or(AnyValue::Null)))
            .collect()
    }

    /// Number of missing values in a column.
    pub fn missing_count(&self, name: &str) -> Result<usize, TableError> {
        Ok(self.column(name)?.null_count())
    }

    /// The first `rows` rows.
    pub fn head(&self, rows: usize) -> Table {
        Self {
            data: self.data.head(Some(rows)),
            kinds: self.kinds.clone(),
        }
    }

    /// Replaces an existing column in place, keeping its position.
    pub fn replace_column(
        &mut self,
        name: &str,
        column: impl IntoColumn,
        kind: ColumnKind,
    ) -> Result<(), TableError> {
        let idx = self
            .position(name)
            .ok_or_else(|| TableError::ColumnNotFound {
                column: name.to_string(),
            })?;
        self.data.with_column(column)?;
        self.kinds[idx] = kind;
        Ok(())
    }

    /// Keeps the rows whose mask entry is `true`.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<(), TableError> {
        if keep.len() != self.height() {
            return Err(TableError::MaskLength {
                rows: self.height(),
                mask: keep.len(),
            });
        }
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        self.data = self.data.filter(&mask)?;
        Ok(())
    }

    /// Keeps only the named columns, in the given order.
    pub fn select(&self, names: &[String]) -> Result<Table, TableError> {
        let mut kinds = Vec::with_capacity(names.len());
        for name in names {
            let idx = self
                .position(name)
                .ok_or_else(|| TableError::ColumnNotFound {
                    column: name.clone(),
                })?;
            kinds.push(self.kinds[idx]);
        }
        let data = self.data.select(names.iter().map(String::as_str))?;
        Ok(Self { data, kinds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn sample() -> Table {
        let df = DataFrame::new(vec![
            Series::new("id".into(), &[1i64, 2, 3]).into_column(),
            Series::new("name".into(), &[Some("a"), None, Some("c")]).into_column(),
            Series::new("score".into(), &[Some(1.5f64), Some(2.5), None]).into_column(),
        ])
        .unwrap();
        Table::from_frame(df)
    }

    #[test]
    fn declares_kinds_from_dtypes() {
        let table = sample();
        assert_eq!(
            table.kinds(),
            &[ColumnKind::Numeric, ColumnKind::Text, ColumnKind::Numeric]
        );
        assert_eq!(table.numeric_columns(), vec!["id", "score"]);
        assert_eq!(table.kind_of("name"), Some(ColumnKind::Text));
        assert_eq!(table.kind_of("missing"), None);
    }

    #[test]
    fn with_kinds_checks_width() {
        let df = sample().into_frame();
        let err = Table::with_kinds(df, vec![ColumnKind::Text]).unwrap_err();
        assert!(matches!(
            err,
            TableError::KindMismatch {
                columns: 3,
                kinds: 1
            }
        ));
    }

    #[test]
    fn reads_cells_and_rows() {
        let table = sample();
        assert_eq!(table.cell(0, 1), Cell::Int(2));
        assert_eq!(table.cell(1, 1), Cell::Null);
        assert_eq!(table.cell(9, 0), Cell::Null);
        assert_eq!(
            table.row(0),
            vec![Cell::Int(1), Cell::Text("a".to_string()), Cell::Float(1.5)]
        );
        assert_eq!(table.missing_count("score").unwrap(), 1);
    }

    #[test]
    fn retain_rows_filters_in_order() {
        let mut table = sample();
        table.retain_rows(&[true, false, true]).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(0, 1), Cell::Int(3));

        let err = table.retain_rows(&[true]).unwrap_err();
        assert!(matches!(err, TableError::MaskLength { rows: 2, mask: 1 }));
    }

    #[test]
    fn select_keeps_kinds_aligned() {
        let table = sample();
        let projected = table
            .select(&["score".to_string(), "name".to_string()])
            .unwrap();
        assert_eq!(projected.column_names(), vec!["score", "name"]);
        assert_eq!(
            projected.kinds(),
            &[ColumnKind::Numeric, ColumnKind::Text]
        );

        let err = table.select(&["nope".to_string()]).unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound { .. }));
    }

    #[test]
    fn replace_column_updates_kind() {
        let mut table = sample();
        let replacement = Series::new("id".into(), &["x", "y", "z"]);
        table
            .replace_column("id", replacement, ColumnKind::Text)
            .unwrap();
        assert_eq!(table.column_names(), vec!["id", "name", "score"]);
        assert_eq!(table.kind_of("id"), Some(ColumnKind::Text));
    }

    #[test]
    fn head_limits_rows() {
        let table = sample();
        assert_eq!(table.head(2).height(), 2);
        assert_eq!(table.head(10).height(), 3);
    }
}
