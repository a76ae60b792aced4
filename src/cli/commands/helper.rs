use std::path::Path;

use anyhow::Result;

use super::{CommandResult, CommandSummary};
use crate::cli::args::CommonArgs;
use crate::config::load_config;
use crate::core::{FileFailure, ScanOptions};

/// Build scan options from the config file found above `path`, with CLI
/// arguments taking priority.
pub fn scan_options(common: &CommonArgs) -> Result<ScanOptions> {
    let start_dir = if common.path.is_file() {
        common.path.parent().unwrap_or(Path::new("."))
    } else {
        common.path.as_path()
    };
    let mut options = load_config(start_dir)?.scan_options();

    if let Some(category) = &common.default_category {
        options.default_category = category.clone();
    }
    if let Some(ignore_file) = &common.ignore_file {
        options.ignore_file = ignore_file.clone();
    }
    Ok(options)
}

pub fn finish(
    summary: CommandSummary,
    mut failures: Vec<FileFailure>,
    files_scanned: usize,
    exit_on_failures: bool,
) -> CommandResult {
    failures.sort_by(|a, b| a.file_path.cmp(&b.file_path));

    CommandResult {
        summary,
        failures,
        files_scanned,
        exit_on_failures,
    }
}
