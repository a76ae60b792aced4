//! Per-file message extraction.
//!
//! Each supported grammar has an extractor turning one file's content into a
//! [`CatalogSet`]. The scanner picks the extractor by file extension with
//! [`extractor_for`] and merges the per-file results.

pub mod php;
pub mod project_config;
pub mod script;
pub mod template;

use std::path::Path;

use enum_dispatch::enum_dispatch;

pub use php::PhpExtractor;
pub use project_config::{
    ConfigRoot, ProjectConfigExtractor, find_config_root, find_enclosing_config_root,
};
pub use script::ScriptExtractor;
pub use template::TemplateExtractor;

use crate::core::{CatalogSet, ExtractError, Reference};

/// Everything an extractor needs to know about the file at hand.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// Absolute path of the file.
    pub path: &'a Path,
    /// Path used in references: relative to the scan base, forward slashes.
    pub file_path: &'a str,
    pub content: &'a str,
    /// Only messages of this category are kept when set.
    pub category: Option<&'a str>,
    pub default_category: &'a str,
}

impl<'a> ExtractionContext<'a> {
    /// The category a call site lands in, or `None` when the filter rejects it.
    pub fn accept<'s>(&'s self, explicit: Option<&'s str>) -> Option<&'s str> {
        let category = explicit.unwrap_or(self.default_category);
        match self.category {
            Some(filter) if filter != category => None,
            _ => Some(category),
        }
    }

    pub fn reference(&self, line: Option<usize>) -> Reference {
        Reference::new(self.file_path, line)
    }
}

#[enum_dispatch]
pub trait Extractor {
    /// Extract every translatable message of one file.
    ///
    /// A message that cannot be resolved statically is skipped, not reported.
    /// Malformed input is a [`ExtractError::Parse`].
    fn extract(&self, ctx: &ExtractionContext<'_>) -> Result<CatalogSet, ExtractError>;
}

#[enum_dispatch(Extractor)]
#[derive(Debug, Clone)]
pub enum FileExtractor {
    Php(PhpExtractor),
    Script(ScriptExtractor),
    Template(TemplateExtractor),
    ProjectConfig(ProjectConfigExtractor),
}

/// Pick the extractor for `path` by its extension.
///
/// YAML files always get the project config extractor; it returns nothing for
/// files outside `config_root`, and everything is outside when there is no
/// config root.
pub fn extractor_for(
    path: &Path,
    template_extensions: &[String],
    config_root: Option<&ConfigRoot>,
) -> Option<FileExtractor> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "php" => Some(PhpExtractor.into()),
        "js" => Some(ScriptExtractor.into()),
        "yaml" | "yml" => Some(ProjectConfigExtractor::new(config_root.cloned()).into()),
        _ if template_extensions
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&ext)) =>
        {
            Some(TemplateExtractor.into())
        }
        _ => None,
    }
}
