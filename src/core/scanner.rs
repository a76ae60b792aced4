//! Scan orchestration.
//!
//! A scan walks the root sequentially (the ignore filter caches are plain
//! maps), then extracts the collected files in parallel and folds the results
//! in walk order, so the output does not depend on thread scheduling.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::extract::project_config::DEFAULT_CONFIG_MARKER;
use crate::core::extract::{
    ConfigRoot, ExtractionContext, Extractor, FileExtractor, extractor_for, find_config_root,
    find_enclosing_config_root,
};
use crate::core::ignore::{DEFAULT_IGNORE_FILE, IgnoreFilter};
use crate::core::{CatalogSet, ExtractError, FileFailure, MergeStrategy};
use crate::utils::relative_slash_path;

pub const DEFAULT_CATEGORY: &str = "site";

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Keep only messages of this category.
    pub category: Option<String>,
    pub default_category: String,
    pub ignore_file: String,
    /// File name marking the project config root.
    pub config_marker: String,
    /// Extensions handled by the template extractor.
    pub template_extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            category: None,
            default_category: DEFAULT_CATEGORY.to_string(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            config_marker: DEFAULT_CONFIG_MARKER.to_string(),
            template_extensions: vec!["twig".to_string(), "html".to_string()],
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub catalogs: CatalogSet,
    /// Files that could not be extracted; they contributed nothing.
    pub failures: Vec<FileFailure>,
    pub files_scanned: usize,
}

/// Extract every message below `root`, or from `root` itself if it is a file.
///
/// References are relative to the scan base: the root directory, or the
/// parent directory of a single file. Per-file read and parse errors end up
/// in [`ScanOutcome::failures`]; everything else aborts the scan.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<ScanOutcome, ExtractError> {
    let root = root.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::RootNotFound {
            path: root.to_path_buf(),
        },
        _ => ExtractError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    let (base, files) = if root.is_file() {
        let base = root.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
        let config_root = find_enclosing_config_root(&base, &options.config_marker);
        let extractor = extractor_for(&root, &options.template_extensions, config_root.as_ref())
            .ok_or_else(|| ExtractError::UnsupportedFile { path: root.clone() })?;
        (base, vec![(root, extractor)])
    } else {
        let config_root = find_config_root(&root, &options.config_marker);
        let files = collect_files(&root, options, config_root.as_ref())?;
        (root, files)
    };

    tracing::debug!(base = %base.display(), files = files.len(), "collected files");

    let results: Vec<(String, Result<CatalogSet, ExtractError>)> = files
        .par_iter()
        .map(|(path, extractor)| {
            let file_path = relative_slash_path(path, &base);
            let result = extract_file(path, &file_path, extractor, options);
            (file_path, result)
        })
        .collect();

    let mut outcome = ScanOutcome {
        files_scanned: results.len(),
        ..Default::default()
    };
    for (file_path, result) in results {
        match result {
            Ok(found) => {
                tracing::debug!(file = %file_path, messages = found.message_count(), "extracted");
                outcome.catalogs.merge_with(found, MergeStrategy::Additive);
            }
            Err(error) if error.is_file_scoped() => {
                tracing::warn!(file = %file_path, %error, "skipping file");
                outcome.failures.push(FileFailure { file_path, error });
            }
            Err(error) => return Err(error),
        }
    }

    tracing::info!(
        files = outcome.files_scanned,
        messages = outcome.catalogs.message_count(),
        failures = outcome.failures.len(),
        "scan finished"
    );
    Ok(outcome)
}

/// Walk `base` in name order, skipping ignored entries and files no extractor
/// handles. Ignored directories are not descended into.
fn collect_files(
    base: &Path,
    options: &ScanOptions,
    config_root: Option<&ConfigRoot>,
) -> Result<Vec<(PathBuf, FileExtractor)>, ExtractError> {
    let mut filter = IgnoreFilter::new(base, options.ignore_file.as_str());
    let mut files = Vec::new();

    let mut walker = WalkDir::new(base).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ExtractError::Io {
                    path: base.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot access path");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let is_dir = entry.file_type().is_dir();
        if filter.is_ignored(entry.path(), is_dir)? {
            tracing::debug!(path = %entry.path().display(), "ignored");
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        if entry.file_type().is_file()
            && let Some(extractor) =
                extractor_for(entry.path(), &options.template_extensions, config_root)
        {
            files.push((entry.into_path(), extractor));
        }
    }

    Ok(files)
}

fn extract_file(
    path: &Path,
    file_path: &str,
    extractor: &FileExtractor,
    options: &ScanOptions,
) -> Result<CatalogSet, ExtractError> {
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let ctx = ExtractionContext {
        path,
        file_path,
        content: &content,
        category: options.category.as_deref(),
        default_category: &options.default_category,
    };
    extractor.extract(&ctx)
}
