//! CLI argument definitions for Data Sweeper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sweeper_cli::logging::LogFormat;
use sweeper_model::{CleaningOptions, CleaningStep, FileFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "sweeper",
    version,
    about = "Data Sweeper - Clean and convert tabular files between CSV and Excel",
    long_about = "Clean and convert tabular files between CSV and Excel.\n\n\
                  Each file is parsed, optionally cleaned (duplicate removal, mean\n\
                  imputation of numeric gaps, column selection) and written in the\n\
                  target format. Files are processed independently."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean and convert files to another format.
    Convert(ConvertArgs),

    /// Show the columns, kinds and first rows of files.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input files (.csv or .xlsx).
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Target format.
    #[arg(long = "to", value_enum)]
    pub to: TargetFormatArg,

    /// Output directory for converted files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Cleaning step to apply; repeat to chain steps in order.
    #[arg(long = "step", value_enum, value_name = "STEP")]
    pub steps: Vec<StepArg>,

    /// Remove exact duplicate rows (shortcut for --step remove-duplicates).
    #[arg(long = "remove-duplicates", conflicts_with = "steps")]
    pub remove_duplicates: bool,

    /// Fill missing numeric values with the column mean
    /// (shortcut for --step fill-missing).
    #[arg(long = "fill-missing", conflicts_with = "steps")]
    pub fill_missing: bool,

    /// Keep only these columns (comma separated), in their original order.
    #[arg(long = "columns", value_name = "NAMES", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Write a bar chart spec of the first two numeric columns as JSON.
    #[arg(long = "chart")]
    pub chart: bool,

    /// Print the first rows of each parsed file.
    #[arg(long = "preview")]
    pub preview: bool,

    /// Run the pipeline without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl ConvertArgs {
    /// Cleaning options in the order the user asked for them.
    pub fn cleaning_options(&self) -> CleaningOptions {
        let mut options = if self.steps.is_empty() {
            CleaningOptions::from_flags(self.remove_duplicates, self.fill_missing)
        } else {
            let mut options = CleaningOptions::new();
            for step in &self.steps {
                options = options.with_step(step.step());
            }
            options
        };
        if let Some(columns) = &self.columns {
            options = options.with_selected_columns(columns.clone());
        }
        options.with_visualize(self.chart)
    }
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Input files (.csv or .xlsx).
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TargetFormatArg {
    Csv,
    Excel,
}

impl TargetFormatArg {
    pub fn format(self) -> FileFormat {
        match self {
            Self::Csv => FileFormat::Csv,
            Self::Excel => FileFormat::Excel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StepArg {
    RemoveDuplicates,
    FillMissing,
}

impl StepArg {
    pub fn step(self) -> CleaningStep {
        match self {
            Self::RemoveDuplicates => CleaningStep::RemoveDuplicates,
            Self::FillMissing => CleaningStep::FillMissingNumeric,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
