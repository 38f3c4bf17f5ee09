//! Data model for the Data Sweeper file pipeline.
//!
//! These are plain values shared by every stage: the uploaded file, the
//! caller's cleaning and conversion choices, and the per-file outcome.
//! Table data itself lives in `sweeper-common`.

pub mod column;
pub mod file;
pub mod options;
pub mod processing;

pub use column::ColumnKind;
pub use file::{CSV_MIME, FileFormat, UploadedFile, XLSX_MIME, split_extension};
pub use options::{CleaningOptions, CleaningStep, ConversionRequest};
pub use processing::{ConversionResult, FileReport, FileStage};
