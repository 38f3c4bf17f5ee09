//! Error types for table transforms.

use thiserror::Error;

use sweeper_common::TableError;

/// Errors raised while cleaning or projecting a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Projection names a column the table does not have.
    #[error("unknown column: {column}")]
    UnknownColumn { column: String },

    #[error(transparent)]
    Table(#[from] TableError),
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Table(err.into())
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
