//! Reading and writing translation catalogs.
//!
//! The format is picked from the file extension. Loaded catalogs take their
//! domain from the file stem and their language from the file itself (PO
//! header) or else from the parent directory, as in Craft's
//! `translations/<language>/<category>.php` layout. Disabled entries are never
//! written back.

pub mod csv;
pub mod json;
pub mod php;
pub mod po;

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;

use crate::core::TranslationCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// gettext PO
    Po,
    /// Flat JSON object
    Json,
    /// Two-column CSV without header
    Csv,
    /// PHP file returning an array
    Php,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "po" | "pot" => Some(Self::Po),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "php" => Some(Self::Php),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Po => "po",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Php => "php",
        }
    }

    pub fn parse(self, content: &str, file_path: &str) -> Result<TranslationCatalog> {
        match self {
            Self::Po => po::parse(content),
            Self::Json => json::parse(content),
            Self::Csv => csv::parse(content),
            Self::Php => php::parse(content, file_path),
        }
    }

    pub fn generate(self, catalog: &TranslationCatalog) -> Result<String> {
        match self {
            Self::Po => Ok(po::generate(catalog)),
            Self::Json => json::generate(catalog),
            Self::Csv => csv::generate(catalog),
            Self::Php => Ok(php::generate(catalog)),
        }
    }
}

fn format_for(path: &Path) -> Result<Format> {
    match Format::from_path(path) {
        Some(format) => Ok(format),
        None => bail!(
            "Unsupported catalog format: {}\n\
             Hint: use a .po, .json, .csv or .php file.",
            path.display()
        ),
    }
}

/// Language implied by the location of a catalog file.
fn language_from_path(path: &Path) -> Option<String> {
    let mut dir = path.parent()?;
    // locale/<lang>/LC_MESSAGES/<domain>.po
    if dir.file_name().is_some_and(|n| n == "LC_MESSAGES") {
        dir = dir.parent()?;
    }
    let name = dir.file_name()?.to_str()?;
    (!name.is_empty()).then(|| name.to_string())
}

/// An empty catalog for a file that does not exist yet, named after its path.
pub fn blank(path: &Path) -> Result<TranslationCatalog> {
    format_for(path)?;
    let mut catalog = TranslationCatalog::new();
    catalog.domain = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    catalog.language = language_from_path(path);
    Ok(catalog)
}

pub fn load(path: &Path) -> Result<TranslationCatalog> {
    let format = format_for(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let mut catalog = format
        .parse(&content, &path.to_string_lossy())
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

    let blank = blank(path)?;
    if catalog.domain.is_none() {
        catalog.domain = blank.domain;
    }
    if catalog.language.is_none() {
        catalog.language = blank.language;
    }
    tracing::debug!(path = %path.display(), messages = catalog.len(), "loaded catalog");
    Ok(catalog)
}

pub fn save(catalog: &TranslationCatalog, path: &Path) -> Result<()> {
    let format = format_for(path)?;
    let content = format.generate(catalog)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
    tracing::debug!(path = %path.display(), messages = catalog.len(), "saved catalog");
    Ok(())
}
