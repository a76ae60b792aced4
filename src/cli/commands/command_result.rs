use std::path::PathBuf;

use crate::core::{CatalogSet, FileFailure};

#[derive(Debug)]
pub struct ExtractSummary {
    /// Extracted catalogs, sorted.
    pub catalogs: CatalogSet,
    /// Catalog files written with `--output-dir`.
    pub written: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct UpdateSummary {
    pub catalog: PathBuf,
    pub added: usize,
    pub removed: usize,
    /// Stale messages left in place because some files failed to parse.
    pub kept: usize,
    pub total: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Update(UpdateSummary),
    Init(InitSummary),
}

/// Result of running msgharvest commands
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Files that could not be extracted.
    pub failures: Vec<FileFailure>,
    pub files_scanned: usize,
    /// If true, exit code 1 should be returned when `failures` is not empty.
    pub exit_on_failures: bool,
}
