//! Layered `.translateignore` evaluation.
//!
//! Every directory between the scan root and a candidate path may carry its
//! own ignore file in `.gitignore` syntax. Rules are applied root to leaf, so a
//! deeper file can re-include (`!pattern`) what a shallower one excluded, and
//! vice versa. A directory that is itself ignored hides everything below it,
//! whatever deeper ignore files say.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::core::ExtractError;
use crate::utils::to_slash;

pub const DEFAULT_IGNORE_FILE: &str = ".translateignore";

/// Ignore decisions for one scan root.
///
/// Both caches are keyed by absolute forward-slash paths and are only valid
/// for the lifetime of one scan; create a new filter per run.
pub struct IgnoreFilter {
    root: PathBuf,
    file_name: String,
    /// Parsed rules per ignore-file path; `None` when the file does not exist.
    rule_sets: HashMap<String, Option<Gitignore>>,
    /// Resolved result per candidate path (directories end with `/`).
    resolved: HashMap<String, bool>,
}

impl IgnoreFilter {
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
            rule_sets: HashMap::new(),
            resolved: HashMap::new(),
        }
    }

    /// Whether `path` (absolute, below the root) is excluded.
    ///
    /// Fails only when an ignore file exists but cannot be read or contains
    /// an invalid pattern.
    pub fn is_ignored(&mut self, path: &Path, is_dir: bool) -> Result<bool, ExtractError> {
        let mut key = to_slash(path);
        if is_dir && !key.ends_with('/') {
            key.push('/');
        }
        if let Some(&ignored) = self.resolved.get(&key) {
            return Ok(ignored);
        }

        let Ok(relative) = path.strip_prefix(&self.root) else {
            return Ok(false);
        };
        let components: Vec<_> = relative.components().collect();
        if components.is_empty() {
            return Ok(false);
        }

        let mut ignored = false;
        let mut ancestor = self.root.clone();
        for (depth, component) in components.iter().enumerate() {
            if depth > 0 && self.is_ignored(&ancestor, true)? {
                ignored = true;
                break;
            }

            if let Some(rules) = self.rule_set(&ancestor)?
                && let Ok(candidate) = path.strip_prefix(&ancestor)
            {
                match rules.matched(candidate, is_dir) {
                    Match::Ignore(_) => ignored = true,
                    Match::Whitelist(_) => ignored = false,
                    Match::None => {}
                }
            }

            ancestor.push(component);
        }

        self.resolved.insert(key, ignored);
        Ok(ignored)
    }

    /// Load (once) the rules declared by `dir`'s own ignore file.
    fn rule_set(&mut self, dir: &Path) -> Result<Option<&Gitignore>, ExtractError> {
        let ignore_path = dir.join(&self.file_name);
        let key = to_slash(&ignore_path);

        if !self.rule_sets.contains_key(&key) {
            let rules = load_rule_set(dir, &ignore_path)?;
            self.rule_sets.insert(key.clone(), rules);
        }

        Ok(self.rule_sets.get(&key).and_then(Option::as_ref))
    }
}

fn load_rule_set(dir: &Path, ignore_path: &Path) -> Result<Option<Gitignore>, ExtractError> {
    let content = match fs::read_to_string(ignore_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ExtractError::IgnoreFile {
                path: ignore_path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    let mut builder = GitignoreBuilder::new(dir);
    for line in content.lines() {
        builder
            .add_line(Some(ignore_path.to_path_buf()), line)
            .map_err(|e| ExtractError::IgnoreFile {
                path: ignore_path.to_path_buf(),
                reason: format!("invalid pattern `{}`: {}", line, e),
            })?;
    }

    let rules = builder.build().map_err(|e| ExtractError::IgnoreFile {
        path: ignore_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!(file = %ignore_path.display(), rules = rules.len(), "loaded ignore rules");
    Ok(Some(rules))
}
