//! Bar chart selection for numeric columns.

use serde::Serialize;

use sweeper_common::Table;

/// Maximum number of numeric columns plotted.
pub const CHART_SERIES_LIMIT: usize = 2;

/// Chart type. Only bar charts are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

/// One plotted column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    /// One value per row; `None` where the cell is missing.
    pub values: Vec<Option<f64>>,
}

/// Description of a chart, indexed by row position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub rows: usize,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Builds a bar chart of the first two numeric columns in column order.
pub fn visualize(table: &Table) -> ChartSpec {
    let names = table.column_names();
    let series = table
        .kinds()
        .iter()
        .enumerate()
        .filter(|(_, kind)| kind.is_numeric())
        .take(CHART_SERIES_LIMIT)
        .map(|(column, _)| ChartSeries {
            name: names[column].clone(),
            values: (0..table.height())
                .map(|row| table.cell(column, row).as_f64())
                .collect(),
        })
        .collect();
    ChartSpec {
        kind: ChartKind::Bar,
        rows: table.height(),
        series,
    }
}
