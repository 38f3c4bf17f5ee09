//! Uploaded files and the tabular formats the pipeline understands.

use serde::{Deserialize, Serialize};

/// MIME type for CSV output.
pub const CSV_MIME: &str = "text/csv";

/// MIME type for XLSX output.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Tabular file format, used both for parsing and as a conversion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// Comma-separated values.
    Csv,
    /// Office Open XML workbook (`.xlsx`).
    Excel,
}

impl FileFormat {
    /// All supported formats.
    pub const ALL: [FileFormat; 2] = [FileFormat::Csv, FileFormat::Excel];

    /// Resolve a format from a lower-cased extension including the dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".csv" => Some(Self::Csv),
            ".xlsx" => Some(Self::Excel),
            _ => None,
        }
    }

    /// File extension, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Excel => ".xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => CSV_MIME,
            Self::Excel => XLSX_MIME,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Excel => "Excel",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named byte buffer handed to the pipeline.
///
/// The extension is derived once from the name (suffix from the last `.`,
/// lower-cased) and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    extension: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            extension,
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased extension including the dot, or `""` when the name has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Format implied by the extension, if supported.
    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_extension(&self.extension)
    }

    /// Name without its extension.
    pub fn stem(&self) -> &str {
        split_extension(&self.name).0
    }
}

/// Splits a file name into stem and extension (with the dot, original case).
///
/// Only the final path component is inspected, and a leading dot marks a
/// hidden file rather than an extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let base_start = name.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
    match name[base_start..].rfind('.') {
        Some(0) | None => (name, ""),
        Some(idx) => name.split_at(base_start + idx),
    }
}

fn extension_of(name: &str) -> String {
    split_extension(name).1.to_lowercase()
}
