//! Per-file pipeline: parse, clean, project and convert.
//!
//! Every file owns its table. A failure is recorded on that file's
//! [`FileReport`] and never reaches its siblings.

use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, info_span};

use sweeper_common::Table;
use sweeper_ingest::IngestError;
use sweeper_model::{
    CleaningOptions, ConversionRequest, ConversionResult, FileReport, FileStage, UploadedFile,
};
use sweeper_output::OutputError;
use sweeper_transform::{ChartSpec, TransformError, preview, project, run_steps, visualize};

/// Error from any pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Everything produced for one file.
#[derive(Debug)]
pub struct ProcessedFile {
    pub report: FileReport,
    /// First rows of the parsed table, before cleaning.
    pub preview: Option<Table>,
    /// Present when visualization was requested and the file converted.
    pub chart: Option<ChartSpec>,
    pub output: Option<ConversionResult>,
}

impl ProcessedFile {
    fn new(file: &UploadedFile, request: &ConversionRequest) -> Self {
        Self {
            report: FileReport::new(file.name(), request.target_format),
            preview: None,
            chart: None,
            output: None,
        }
    }
}

/// Runs one file through every stage.
pub fn process_file(
    file: &UploadedFile,
    options: &CleaningOptions,
    request: &ConversionRequest,
) -> ProcessedFile {
    let span = info_span!("file", file = %file.name());
    let _entered = span.enter();
    let mut processed = ProcessedFile::new(file, request);
    if let Err(err) = run_stages(file, options, request, &mut processed) {
        error!(stage = %processed.report.stage, error = %err, "file failed");
        processed.report.error = Some(err.to_string());
    }
    processed
}

/// Runs each file in input order.
pub fn process_batch(
    files: &[UploadedFile],
    options: &CleaningOptions,
    request: &ConversionRequest,
) -> Vec<ProcessedFile> {
    files
        .iter()
        .map(|file| process_file(file, options, request))
        .collect()
}

/// Records that the converted output was delivered.
///
/// Returns `false` and leaves the report untouched unless the file converted.
pub fn mark_downloaded(report: &mut FileReport) -> bool {
    if report.stage.can_advance_to(FileStage::Downloaded) {
        report.stage = FileStage::Downloaded;
        true
    } else {
        false
    }
}

fn run_stages(
    file: &UploadedFile,
    options: &CleaningOptions,
    request: &ConversionRequest,
    processed: &mut ProcessedFile,
) -> Result<(), PipelineError> {
    let start = Instant::now();
    let report = &mut processed.report;

    let mut table = {
        let _stage = info_span!("parse").entered();
        sweeper_ingest::parse(file)?
    };
    let rows_before = table.height();
    report.rows_in = Some(rows_before);
    processed.preview = Some(preview(&table));
    advance(report, FileStage::Parsed);

    if !options.steps.is_empty() {
        let _stage = info_span!("clean").entered();
        run_steps(&mut table, &options.steps)?;
        advance(report, FileStage::Cleaned);
    }

    let table = {
        let _stage = info_span!("project").entered();
        project(table, options.selected_columns.as_deref())?
    };
    let rows_after = table.height();
    report.rows_out = Some(rows_after);
    advance(report, FileStage::Projected);

    if options.visualize {
        processed.chart = Some(visualize(&table));
    }

    let result = {
        let _stage = info_span!("convert").entered();
        sweeper_output::convert(&table, file.name(), request)?
    };
    report.output_name = Some(result.file_name.clone());
    processed.output = Some(result);
    advance(report, FileStage::Converted);

    info!(
        rows_before,
        rows_after,
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "file processed"
    );
    Ok(())
}

fn advance(report: &mut FileReport, next: FileStage) {
    debug_assert!(
        report.stage.can_advance_to(next),
        "illegal stage transition {} -> {}",
        report.stage,
        next
    );
    report.stage = next;
}
