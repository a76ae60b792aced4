//! PHP translation files: `<?php return ['original' => 'translated'];`.
//!
//! Files are read with the PHP grammar and only literal string pairs are
//! accepted; nothing is ever executed.

use anyhow::{Result, bail};
use tree_sitter::Node;

use crate::core::parsers::php::{parse_php_source, resolve_string};
use crate::core::{Translation, TranslationCatalog};

fn find_returned_array(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    let statement = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "return_statement")?;
    let mut cursor = statement.walk();
    let value = statement.named_children(&mut cursor).next()?;
    (value.kind() == "array_creation_expression").then_some(value)
}

pub fn parse(content: &str, file_path: &str) -> Result<TranslationCatalog> {
    let parsed = parse_php_source(content, file_path)?;
    let Some(array) = find_returned_array(parsed.root()) else {
        bail!("expected the file to return an array literal");
    };

    let mut catalog = TranslationCatalog::new();
    let mut cursor = array.walk();
    for element in array.named_children(&mut cursor) {
        if element.kind() != "array_element_initializer" {
            continue;
        }
        let line = element.start_position().row + 1;
        let (Some(key), Some(value)) = (element.named_child(0), element.named_child(1)) else {
            bail!("line {}: array entries need a string key", line);
        };
        let (Some(original), Some(translated)) = (
            resolve_string(key, parsed.source),
            resolve_string(value, parsed.source),
        ) else {
            bail!("line {}: only string literals are supported", line);
        };
        catalog.add(Translation::with_translated(original, translated));
    }
    Ok(catalog)
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

pub fn generate(catalog: &TranslationCatalog) -> String {
    let mut out = String::from("<?php\n\nreturn [\n");
    for translation in catalog.iter().filter(|t| !t.disabled) {
        out.push_str(&format!(
            "    {} => {},\n",
            quote(&translation.original),
            quote(&translation.translated)
        ));
    }
    out.push_str("];\n");
    out
}
