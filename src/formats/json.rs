//! Flat JSON catalogs: `{ "original": "translated", ... }`.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::core::{Translation, TranslationCatalog};

pub fn parse(content: &str) -> Result<TranslationCatalog> {
    let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
    let Value::Object(map) = value else {
        bail!("expected a JSON object at the top level");
    };

    let mut catalog = TranslationCatalog::new();
    for (original, translated) in map {
        let Value::String(translated) = translated else {
            bail!("value of \"{}\" is not a string", original);
        };
        catalog.add(Translation::with_translated(original, translated));
    }
    Ok(catalog)
}

pub fn generate(catalog: &TranslationCatalog) -> Result<String> {
    let map: Map<String, Value> = catalog
        .iter()
        .filter(|t| !t.disabled)
        .map(|t| (t.original.clone(), Value::String(t.translated.clone())))
        .collect();
    let mut out = serde_json::to_string_pretty(&Value::Object(map))
        .context("Failed to serialize catalog as JSON")?;
    out.push('\n');
    Ok(out)
}
