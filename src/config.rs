use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::extract::project_config::DEFAULT_CONFIG_MARKER;
use crate::core::ignore::DEFAULT_IGNORE_FILE;
use crate::core::scanner::{DEFAULT_CATEGORY, ScanOptions};

pub const CONFIG_FILE_NAME: &str = ".msgharvestrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
    #[serde(default = "default_project_config_marker")]
    pub project_config_marker: String,
    #[serde(default = "default_template_extensions")]
    pub template_extensions: Vec<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

fn default_project_config_marker() -> String {
    DEFAULT_CONFIG_MARKER.to_string()
}

fn default_template_extensions() -> Vec<String> {
    ["twig", "html"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            ignore_file: default_ignore_file(),
            project_config_marker: default_project_config_marker(),
            template_extensions: default_template_extensions(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.default_category.trim().is_empty() {
            bail!("'defaultCategory' must not be empty");
        }
        for (field, value) in [
            ("ignoreFile", &self.ignore_file),
            ("projectConfigMarker", &self.project_config_marker),
        ] {
            if value.is_empty() || value.contains(['/', '\\']) {
                bail!("'{}' must be a plain file name, got \"{}\"", field, value);
            }
        }
        for ext in &self.template_extensions {
            if ext.is_empty() || ext.starts_with('.') {
                bail!(
                    "Invalid extension in 'templateExtensions': \"{}\" (write it without the dot)",
                    ext
                );
            }
        }
        Ok(())
    }

    /// Scan options for this configuration, without a category filter.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            category: None,
            default_category: self.default_category.clone(),
            ignore_file: self.ignore_file.clone(),
            config_marker: self.project_config_marker.clone(),
            template_extensions: self.template_extensions.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load the nearest config file above `start_dir`, or the defaults when
/// there is none.
pub fn load_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}
