use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use sweeper_cli::pipeline::{ProcessedFile, mark_downloaded, process_file};
use sweeper_model::{ConversionRequest, FileReport, UploadedFile, split_extension};
use sweeper_transform::preview;

use crate::cli::{ConvertArgs, InspectArgs};
use crate::summary::{print_columns, print_preview};
use crate::types::BatchResult;

pub fn run_convert(args: &ConvertArgs) -> Result<BatchResult> {
    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut plan = if args.dry_run {
        None
    } else {
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output dir {}", output_dir.display()))?;
        Some(OutputPlan::new(&output_dir, &args.files)?)
    };
    let options = args.cleaning_options();
    let request = ConversionRequest::new(args.to.format());
    info!(
        files = args.files.len(),
        target = %request.target_format,
        steps = options.steps.len(),
        dry_run = args.dry_run,
        "starting conversion"
    );

    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let file = match read_upload(path) {
            Ok(file) => file,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "skipping unreadable file");
                let mut report = FileReport::new(display_name(path), request.target_format);
                report.error = Some(format!("{error:#}"));
                reports.push(report);
                continue;
            }
        };
        let mut processed = process_file(&file, &options, &request);
        if args.preview
            && let Some(rows) = &processed.preview
        {
            print_preview(&format!("{} (first {} rows)", file.name(), rows.height()), rows);
        }
        if let Some(plan) = plan.as_mut()
            && processed.report.is_success()
            && let Err(error) = write_outputs(plan, &mut processed)
        {
            warn!(file = %file.name(), error = %error, "failed to write output");
            processed.report.error = Some(format!("{error:#}"));
        }
        reports.push(processed.report);
    }

    let has_errors = reports.iter().any(|report| !report.is_success());
    Ok(BatchResult {
        output_dir,
        files: reports,
        dry_run: args.dry_run,
        has_errors,
    })
}

/// Prints columns and a preview for each file. Returns whether any file failed.
pub fn run_inspect(args: &InspectArgs) -> Result<bool> {
    let mut has_errors = false;
    for path in &args.files {
        let table = read_upload(path).and_then(|file| {
            sweeper_ingest::parse(&file).with_context(|| format!("parse {}", file.name()))
        });
        match table {
            Ok(table) => {
                println!(
                    "{}: {} rows, {} columns",
                    display_name(path),
                    table.height(),
                    table.width()
                );
                print_columns(&table);
                let rows = preview(&table);
                print_preview(&format!("First {} rows", rows.height()), &rows);
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                has_errors = true;
            }
        }
    }
    Ok(has_errors)
}

fn read_upload(path: &Path) -> Result<UploadedFile> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(UploadedFile::new(display_name(path), bytes))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Output paths claimed by a batch.
///
/// An output may not land on any input of the batch, and no two files may
/// claim the same output path.
struct OutputPlan {
    dir: PathBuf,
    inputs: HashSet<PathBuf>,
    claimed: HashSet<PathBuf>,
}

impl OutputPlan {
    fn new(output_dir: &Path, inputs: &[PathBuf]) -> Result<Self> {
        let dir = fs::canonicalize(output_dir)
            .with_context(|| format!("resolve output dir {}", output_dir.display()))?;
        // Unreadable inputs fail on read; they have nothing to protect.
        let inputs = inputs
            .iter()
            .filter_map(|path| fs::canonicalize(path).ok())
            .collect();
        Ok(Self {
            dir,
            inputs,
            claimed: HashSet::new(),
        })
    }

    fn claim(&mut self, file_name: &str) -> Result<PathBuf> {
        let target = self.dir.join(file_name);
        let resolved = fs::canonicalize(&target).unwrap_or_else(|_| target.clone());
        if self.inputs.contains(&resolved) {
            bail!(
                "refusing to overwrite input file {}; choose another --output-dir",
                resolved.display()
            );
        }
        if self.claimed.contains(&resolved) {
            bail!(
                "{} is already written by another file in this batch",
                resolved.display()
            );
        }
        self.claimed.insert(resolved);
        Ok(target)
    }
}

/// Writes the converted file and, when present, its chart spec.
///
/// Both paths are claimed before anything is written.
fn write_outputs(plan: &mut OutputPlan, processed: &mut ProcessedFile) -> Result<()> {
    let Some(result) = &processed.output else {
        return Ok(());
    };
    let target = plan.claim(&result.file_name)?;
    let chart_path = match &processed.chart {
        Some(_) => {
            let (stem, _) = split_extension(&result.file_name);
            Some(plan.claim(&format!("{stem}.chart.json"))?)
        }
        None => None,
    };

    fs::write(&target, &result.bytes).with_context(|| format!("write {}", target.display()))?;
    info!(path = %target.display(), bytes = result.len(), "wrote output");

    if let (Some(chart), Some(chart_path)) = (&processed.chart, chart_path) {
        let json = serde_json::to_vec_pretty(chart).context("serialize chart spec")?;
        fs::write(&chart_path, json)
            .with_context(|| format!("write {}", chart_path.display()))?;
        info!(path = %chart_path.display(), series = chart.series.len(), "wrote chart");
    }

    mark_downloaded(&mut processed.report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{StepArg, TargetFormatArg};

    fn convert_args(files: Vec<PathBuf>, output_dir: &Path) -> ConvertArgs {
        ConvertArgs {
            files,
            to: TargetFormatArg::Csv,
            output_dir: Some(output_dir.to_path_buf()),
            steps: vec![StepArg::RemoveDuplicates],
            remove_duplicates: false,
            fill_missing: false,
            columns: None,
            chart: true,
            preview: false,
            dry_run: false,
        }
    }

    #[test]
    fn writes_output_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        fs::write(&input, "a,b\n1,2\n1,2\n3,4\n").unwrap();
        let out = dir.path().join("out");

        let result = run_convert(&convert_args(vec![input], &out)).unwrap();

        assert!(!result.has_errors);
        let report = &result.files[0];
        assert_eq!(report.stage, sweeper_model::FileStage::Downloaded);
        assert_eq!(report.rows_out, Some(2));
        let written = fs::read_to_string(out.join("in.csv")).unwrap();
        assert_eq!(written, "a,b\n1,2\n3,4\n");
        let chart: serde_json::Value =
            serde_json::from_slice(&fs::read(out.join("in.chart.json")).unwrap()).unwrap();
        assert_eq!(chart["kind"], "bar");
        assert_eq!(chart["series"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("same.csv");
        fs::write(&input, "a\n1\n").unwrap();

        let result = run_convert(&convert_args(vec![input.clone()], dir.path())).unwrap();

        assert!(result.has_errors);
        let report = &result.files[0];
        assert_eq!(report.stage, sweeper_model::FileStage::Converted);
        assert!(report.error.as_deref().unwrap().contains("refusing to overwrite"));
        assert_eq!(fs::read_to_string(&input).unwrap(), "a\n1\n");
    }

    #[test]
    fn never_overwrites_another_input_of_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx = dir.path().join("data.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "from_xlsx").unwrap();
        sheet.write_number(1, 0, 1).unwrap();
        fs::write(&xlsx, workbook.save_to_buffer().unwrap()).unwrap();
        let csv = dir.path().join("data.csv");
        fs::write(&csv, "from_csv\n42\n").unwrap();

        let result = run_convert(&convert_args(vec![xlsx, csv.clone()], dir.path())).unwrap();

        assert!(result.has_errors);
        for report in &result.files {
            assert_eq!(report.stage, sweeper_model::FileStage::Converted);
            assert!(report.error.as_deref().unwrap().contains("refusing to overwrite"));
        }
        assert_eq!(fs::read_to_string(&csv).unwrap(), "from_csv\n42\n");
    }

    #[test]
    fn two_files_cannot_claim_one_output() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a").join("report.csv");
        let second = dir.path().join("b").join("report.csv");
        for (path, text) in [(&first, "x\n1\n"), (&second, "x\n2\n")] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        let out = dir.path().join("out");

        let result = run_convert(&convert_args(vec![first, second], &out)).unwrap();

        assert!(result.files[0].is_success());
        assert!(
            result.files[1]
                .error
                .as_deref()
                .unwrap()
                .contains("already written by another file")
        );
        assert_eq!(fs::read_to_string(out.join("report.csv")).unwrap(), "x\n1\n");
    }

    #[test]
    fn missing_input_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, "x\n1\n").unwrap();
        let out = dir.path().join("out");
        let files = vec![dir.path().join("absent.csv"), good];

        let result = run_convert(&convert_args(files, &out)).unwrap();

        assert!(result.has_errors);
        assert_eq!(result.files.len(), 2);
        assert_eq!(result.files[0].file_name, "absent.csv");
        assert_eq!(result.files[0].stage, sweeper_model::FileStage::Uploaded);
        assert!(result.files[1].is_success());
        assert!(out.join("good.csv").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        fs::write(&input, "a\n1\n").unwrap();
        let out = dir.path().join("out");
        let mut args = convert_args(vec![input], &out);
        args.dry_run = true;

        let result = run_convert(&args).unwrap();

        assert!(!result.has_errors);
        assert_eq!(result.files[0].stage, sweeper_model::FileStage::Converted);
        assert!(!out.exists());
    }
}
