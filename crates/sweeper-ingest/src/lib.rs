//! Data ingestion for the Data Sweeper pipeline.
//!
//! Turns an [`UploadedFile`] into a [`Table`]. The format is decided by the
//! file's lower-cased extension alone:
//!
//! - **`.csv`**: read with Polars' CSV reader, types inferred over all rows
//! - **`.xlsx`**: first worksheet read with `calamine`, header on the first row
//!
//! Anything else is rejected with [`IngestError::UnsupportedFormat`] before
//! the bytes are looked at.
//!
//! # Example
//!
//! ```ignore
//! use sweeper_ingest::parse;
//! use sweeper_model::UploadedFile;
//!
//! let file = UploadedFile::new("sales.csv", std::fs::read("sales.csv")?);
//! let table = parse(&file)?;
//! println!("{} rows", table.height());
//! ```

mod csv;
mod error;
mod xlsx;

use std::time::Instant;

use tracing::{debug, info};

use sweeper_common::Table;
use sweeper_model::{FileFormat, UploadedFile};

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv::{MISSING_TOKENS, read_csv_bytes};
pub use xlsx::{DATETIME_FORMAT, UNNAMED_PREFIX, read_xlsx_bytes};

/// Parses an uploaded file into a table.
///
/// # Errors
///
/// [`IngestError::UnsupportedFormat`] for extensions other than `.csv` and
/// `.xlsx`; parse errors when the content is malformed.
pub fn parse(file: &UploadedFile) -> Result<Table> {
    let Some(format) = file.format() else {
        return Err(IngestError::UnsupportedFormat {
            extension: file.extension().to_string(),
        });
    };
    debug!(file = %file.name(), format = %format, bytes = file.bytes().len(), "parsing file");
    let start = Instant::now();
    let table = match format {
        FileFormat::Csv => read_csv_bytes(file.name(), file.bytes())?,
        FileFormat::Excel => read_xlsx_bytes(file.name(), file.bytes())?,
    };
    info!(
        file = %file.name(),
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "parsed file"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_extension() {
        let file = UploadedFile::new("notes.txt", b"a,b\n1,2\n".to_vec());
        let err = parse(&file).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { ref extension } if extension == ".txt"
        ));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let file = UploadedFile::new("DATA.CSV", b"a,b\n1,2\n".to_vec());
        let table = parse(&file).unwrap();
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn rejects_legacy_excel() {
        let file = UploadedFile::new("old.xls", Vec::new());
        assert!(parse(&file).unwrap_err().is_unsupported());
    }
}
