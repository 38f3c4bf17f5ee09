//! Mean imputation for numeric columns.

use polars::prelude::{AnyValue, NamedFrom, Series};
use tracing::debug;

use sweeper_common::{Table, any_to_f64};
use sweeper_model::ColumnKind;

use crate::error::Result;

/// A column whose gaps were filled.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledColumn {
    pub column: String,
    pub mean: f64,
    pub filled: usize,
}

/// Replaces missing values in every numeric column with that column's mean.
///
/// Each mean is taken over the column's present values as they are when
/// this runs. Columns without gaps are left untouched; a column with no
/// present values stays missing. A filled column becomes floating point.
pub fn fill_missing_numeric(table: &mut Table) -> Result<Vec<FilledColumn>> {
    let mut filled_columns = Vec::new();
    for name in table.numeric_columns() {
        let column = table.column(&name)?;
        let missing = column.null_count();
        if missing == 0 || missing == column.len() {
            continue;
        }
        let values: Vec<Option<f64>> = (0..column.len())
            .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        let (sum, count) = values
            .iter()
            .flatten()
            .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));
        let mean = sum / count as f64;
        let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(mean)).collect();
        table.replace_column(
            &name,
            Series::new(name.as_str().into(), filled),
            ColumnKind::Numeric,
        )?;
        debug!(column = %name, mean, filled = missing, "filled missing values");
        filled_columns.push(FilledColumn {
            column: name,
            mean,
            filled: missing,
        });
    }
    Ok(filled_columns)
}
