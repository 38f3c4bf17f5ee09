//! Error types for output generation.

use thiserror::Error;

use sweeper_model::FileFormat;

/// Errors raised while serializing a table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The target format cannot encode the table, or the writer failed.
    #[error("failed to serialize as {format}: {message}")]
    Serialization { format: FileFormat, message: String },
}

impl OutputError {
    pub(crate) fn serialization(format: FileFormat, message: impl ToString) -> Self {
        Self::Serialization {
            format,
            message: message.to_string(),
        }
    }
}

impl From<csv::Error> for OutputError {
    fn from(err: csv::Error) -> Self {
        Self::serialization(FileFormat::Csv, err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for OutputError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::serialization(FileFormat::Excel, err)
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
