//! Per-file processing outcome.

use serde::Serialize;

use crate::file::FileFormat;

/// Serialized output of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ConversionResult {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Lifecycle stage of a file. Files only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStage {
    Uploaded,
    Parsed,
    Cleaned,
    Projected,
    Converted,
    Downloaded,
}

impl FileStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Parsed => "parsed",
            Self::Cleaned => "cleaned",
            Self::Projected => "projected",
            Self::Converted => "converted",
            Self::Downloaded => "downloaded",
        }
    }

    /// Whether `next` is a legal forward transition from `self`.
    ///
    /// `Cleaned` may be skipped; nothing else may.
    pub fn can_advance_to(self, next: FileStage) -> bool {
        use FileStage::{Cleaned, Converted, Downloaded, Parsed, Projected, Uploaded};
        matches!(
            (self, next),
            (Uploaded, Parsed)
                | (Parsed, Cleaned | Projected)
                | (Cleaned, Projected)
                | (Projected, Converted)
                | (Converted, Downloaded)
        )
    }
}

impl std::fmt::Display for FileStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one file of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_name: String,
    /// Furthest stage reached.
    pub stage: FileStage,
    pub rows_in: Option<usize>,
    pub rows_out: Option<usize>,
    pub target_format: FileFormat,
    pub output_name: Option<String>,
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(file_name: impl Into<String>, target_format: FileFormat) -> Self {
        Self {
            file_name: file_name.into(),
            stage: FileStage::Uploaded,
            rows_in: None,
            rows_out: None,
            target_format,
            output_name: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
