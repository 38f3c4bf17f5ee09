//! Table cleaning for the Data Sweeper pipeline.
//!
//! Cleaning is an ordered list of [`CleaningStep`]s followed by an optional
//! column projection:
//!
//! - [`remove_duplicates`]: drop exact duplicate rows, first occurrence wins
//! - [`fill_missing_numeric`]: mean imputation for numeric columns
//! - [`project`]: keep selected columns in table order
//!
//! [`visualize`] and [`preview`] are read-only views used by front ends.

pub mod chart;
pub mod dedupe;
pub mod error;
pub mod fill;
pub mod projection;

use tracing::{debug, info};

use sweeper_common::Table;
use sweeper_model::{CleaningOptions, CleaningStep};

pub use chart::{CHART_SERIES_LIMIT, ChartKind, ChartSeries, ChartSpec, visualize};
pub use dedupe::remove_duplicates;
pub use error::{Result, TransformError};
pub use fill::{FilledColumn, fill_missing_numeric};
pub use projection::project;

/// Number of rows shown in a preview.
pub const PREVIEW_ROWS: usize = 5;

/// What a single cleaning step changed.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    DuplicatesRemoved(usize),
    MissingFilled(Vec<FilledColumn>),
}

/// Applies one cleaning step in place.
pub fn apply_step(table: &mut Table, step: CleaningStep) -> Result<StepOutcome> {
    match step {
        CleaningStep::RemoveDuplicates => {
            let removed = remove_duplicates(table)?;
            info!(removed, rows = table.height(), "duplicates removed");
            Ok(StepOutcome::DuplicatesRemoved(removed))
        }
        CleaningStep::FillMissingNumeric => {
            let filled = fill_missing_numeric(table)?;
            info!(columns = filled.len(), "missing values filled");
            Ok(StepOutcome::MissingFilled(filled))
        }
    }
}

/// Applies cleaning steps in the order given.
pub fn run_steps(table: &mut Table, steps: &[CleaningStep]) -> Result<Vec<StepOutcome>> {
    steps
        .iter()
        .map(|step| {
            debug!(step = step.as_str(), "applying cleaning step");
            apply_step(table, *step)
        })
        .collect()
}

/// Runs the cleaning steps in order, then the column projection.
pub fn clean(mut table: Table, options: &CleaningOptions) -> Result<Table> {
    run_steps(&mut table, &options.steps)?;
    project(table, options.selected_columns.as_deref())
}

/// The first [`PREVIEW_ROWS`] rows of a table.
pub fn preview(table: &Table) -> Table {
    table.head(PREVIEW_ROWS)
}
