use std::path::PathBuf;

use sweeper_model::FileReport;

#[derive(Debug)]
pub struct BatchResult {
    pub output_dir: PathBuf,
    pub files: Vec<FileReport>,
    pub dry_run: bool,
    pub has_errors: bool,
}
