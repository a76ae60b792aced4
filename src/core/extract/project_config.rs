//! Translatable values in Craft project config YAML.
//!
//! Each file below the config root is flattened into dotted paths prefixed by
//! its location: `fields/body--<uid>.yaml` contributes `fields.<uid>.*`, while
//! the root marker file contributes its keys unprefixed. Values are picked by
//! path rules, in document order.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::core::extract::{ExtractionContext, Extractor, TemplateExtractor};
use crate::core::parsers::yaml::{FlatYaml, parse_yaml_source};
use crate::core::{CatalogSet, ExtractError, MergeStrategy};

pub const DEFAULT_CONFIG_MARKER: &str = "project.yaml";

/// How deep below the scan base the marker file is searched for.
const MARKER_SEARCH_DEPTH: usize = 3;

const UID_PATTERN: &str = "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";

static UID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(UID_PATTERN).unwrap());

fn rule(pattern: &str) -> Regex {
    Regex::new(&pattern.replace("{uid}", UID_PATTERN)).unwrap()
}

/// Paths whose value is a message as-is.
static PLAIN_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(?:fields|sections|entryTypes|fieldGroups|volumes|categoryGroups|tagGroups|globalSets|sites|siteGroups|users\.groups)\.{uid}\.name$",
        r"^fields\.{uid}\.instructions$",
        r"^(?:.+\.)?fieldLayouts\.{uid}\.tabs\.\d+\.name$",
        r"^(?:.+\.)?fieldLayouts\.{uid}\.tabs\.\d+\.(?:elements|fields)\.\d+\.(?:label|instructions|tip|warning)$",
    ]
    .into_iter()
    .map(rule)
    .collect()
});

/// Option lists stored as `[key, value]` pairs; the value is a message when
/// the key is one of `keys`.
struct PairRule {
    path: Regex,
    keys: &'static [&'static str],
}

static PAIR_RULES: LazyLock<Vec<PairRule>> = LazyLock::new(|| {
    vec![PairRule {
        path: rule(r"^fields\.{uid}\.settings\.options\.\d+\.(?:__assoc__\.)?\d+\.0$"),
        keys: &["label"],
    }]
});

/// Paths whose value is Twig source to extract from.
static TEMPLATE_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| vec![rule(r"^entryTypes\.{uid}\.titleFormat$")]);

/// The directory holding the project config, found by its marker file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot {
    pub dir: PathBuf,
    /// Absolute path of the marker file itself.
    pub marker: PathBuf,
}

/// Look for `marker_name` below `base`, preferring the shallowest hit.
pub fn find_config_root(base: &Path, marker_name: &str) -> Option<ConfigRoot> {
    let found = WalkDir::new(base)
        .max_depth(MARKER_SEARCH_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == marker_name)
        .min_by_key(|e| e.depth())?;

    let marker = found.into_path();
    let dir = marker.parent()?.to_path_buf();
    tracing::debug!(root = %dir.display(), "found project config root");
    Some(ConfigRoot { dir, marker })
}

/// Look for `marker_name` in `dir` and the directories above it, nearest first.
pub fn find_enclosing_config_root(dir: &Path, marker_name: &str) -> Option<ConfigRoot> {
    dir.ancestors()
        .take(MARKER_SEARCH_DEPTH + 1)
        .map(|d| (d, d.join(marker_name)))
        .find(|(_, marker)| marker.is_file())
        .map(|(d, marker)| {
            tracing::debug!(root = %d.display(), "found enclosing project config root");
            ConfigRoot {
                dir: d.to_path_buf(),
                marker,
            }
        })
}

#[derive(Debug, Clone, Default)]
pub struct ProjectConfigExtractor {
    config_root: Option<ConfigRoot>,
}

impl ProjectConfigExtractor {
    pub fn new(config_root: Option<ConfigRoot>) -> Self {
        Self { config_root }
    }

    /// Dotted prefix for a file, or `None` when it is outside the config root.
    fn key_prefix(&self, path: &Path) -> Option<String> {
        let root = self.config_root.as_ref()?;
        if path == root.marker {
            return Some(String::new());
        }
        let relative = path.strip_prefix(&root.dir).ok()?;

        let mut segments: Vec<String> = relative
            .parent()
            .into_iter()
            .flat_map(|p| p.components())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        segments.push(relative.file_stem()?.to_string_lossy().into_owned());

        let segments: Vec<&str> = segments
            .iter()
            .map(|s| UID_REGEX.find(s).map_or(s.as_str(), |m| m.as_str()))
            .collect();
        Some(segments.join("."))
    }
}

impl Extractor for ProjectConfigExtractor {
    fn extract(&self, ctx: &ExtractionContext<'_>) -> Result<CatalogSet, ExtractError> {
        let Some(prefix) = self.key_prefix(ctx.path) else {
            tracing::debug!(file = ctx.file_path, "outside project config, skipped");
            return Ok(CatalogSet::new());
        };

        let flat = parse_yaml_source(ctx.content, ctx.file_path)?;
        let flat: FlatYaml = if prefix.is_empty() {
            flat
        } else {
            flat.into_iter()
                .map(|(key, value)| (format!("{}.{}", prefix, key), value))
                .collect()
        };

        let mut result = CatalogSet::new();
        let Some(category) = ctx.accept(None) else {
            return Ok(result);
        };

        for (path, value) in &flat {
            if PLAIN_RULES.iter().any(|r| r.is_match(path)) {
                if !value.is_empty() {
                    result.add_reference(category, value, ctx.reference(None));
                }
                continue;
            }

            if let Some(pair) = PAIR_RULES.iter().find(|r| r.path.is_match(path)) {
                if pair.keys.contains(&value.as_str())
                    && let Some(sibling) = path.strip_suffix(".0").map(|p| format!("{}.1", p))
                    && let Some(message) = flat.get(&sibling)
                    && !message.is_empty()
                {
                    result.add_reference(category, message, ctx.reference(None));
                }
                continue;
            }

            if TEMPLATE_RULES.iter().any(|r| r.is_match(path)) {
                let inline = ExtractionContext {
                    content: value.as_str(),
                    ..*ctx
                };
                let found = TemplateExtractor.extract_inline(&inline)?;
                result.merge_with(found, MergeStrategy::Additive);
            }
        }

        Ok(result)
    }
}
