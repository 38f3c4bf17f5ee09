//! Error types for data ingestion.

use thiserror::Error;

use sweeper_common::TableError;

/// Errors that can occur while parsing an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Extension is neither `.csv` nor `.xlsx`.
    #[error("unsupported file type: {extension}")]
    UnsupportedFormat { extension: String },

    /// Content could not be parsed.
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    /// Workbook has no worksheet to read.
    #[error("no worksheet found in {file}")]
    NoWorksheet { file: String },

    /// Building the table failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl IngestError {
    pub(crate) fn parse(file: &str, message: impl ToString) -> Self {
        Self::Parse {
            file: file.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the file was rejected before its content was read.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Table(err.into())
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
