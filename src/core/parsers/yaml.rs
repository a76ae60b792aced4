use indexmap::IndexMap;
use serde_yaml_ng::Value;

use crate::core::ExtractError;

/// A YAML document flattened into dotted paths, in document order.
///
/// Mapping keys become path segments, sequence items use their index, nulls
/// are dropped and every other scalar is stored as a string.
pub type FlatYaml = IndexMap<String, String>;

pub fn parse_yaml_source(code: &str, file_path: &str) -> Result<FlatYaml, ExtractError> {
    let value: Value = serde_yaml_ng::from_str(code).map_err(|e| {
        ExtractError::parse(file_path, e.location().map(|l| l.line()), e.to_string())
    })?;

    let mut result = FlatYaml::new();
    flatten_yaml(&value, String::new(), &mut result);
    Ok(result)
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flatten_yaml(value: &Value, prefix: String, result: &mut FlatYaml) {
    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                // Complex keys have no dotted form.
                let Some(key) = scalar_to_string(key) else {
                    continue;
                };
                flatten_yaml(val, join(&prefix, &key), result);
            }
        }
        Value::Sequence(items) => {
            for (index, val) in items.iter().enumerate() {
                flatten_yaml(val, join(&prefix, &index.to_string()), result);
            }
        }
        Value::Tagged(tagged) => flatten_yaml(&tagged.value, prefix, result),
        Value::Null => {}
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                result.insert(prefix, text);
            }
        }
    }
}
