//! `Craft::t()` style calls in PHP sources.

use tree_sitter::Node;

use crate::core::extract::{ExtractionContext, Extractor};
use crate::core::parsers::php::{ParsedPhp, parse_php_source, resolve_string};
use crate::core::{CatalogSet, ExtractError};

/// A static call recognized as a translation marker.
struct CallMarker {
    class: &'static str,
    method: &'static str,
    /// Position of the category argument; `None` means the default category.
    category_arg: Option<usize>,
    message_arg: usize,
}

const MARKERS: &[CallMarker] = &[
    CallMarker {
        class: "Craft",
        method: "t",
        category_arg: Some(0),
        message_arg: 1,
    },
    CallMarker {
        class: "Yii",
        method: "t",
        category_arg: Some(0),
        message_arg: 1,
    },
    CallMarker {
        class: "Translate",
        method: "t",
        category_arg: None,
        message_arg: 0,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PhpExtractor;

impl Extractor for PhpExtractor {
    fn extract(&self, ctx: &ExtractionContext<'_>) -> Result<CatalogSet, ExtractError> {
        let parsed = parse_php_source(ctx.content, ctx.file_path)?;
        let mut result = CatalogSet::new();

        // Depth-first, children pushed in reverse so calls come out in source order.
        let mut stack = vec![parsed.root()];
        while let Some(node) = stack.pop() {
            if node.kind() == "scoped_call_expression" {
                collect_call(&parsed, node, ctx, &mut result);
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        Ok(result)
    }
}

fn find_marker(parsed: &ParsedPhp<'_>, call: Node<'_>) -> Option<&'static CallMarker> {
    let scope = parsed.text(call.child_by_field_name("scope")?);
    let class = scope.trim_start_matches('\\');
    let method = parsed.text(call.child_by_field_name("name")?);
    // Class and method names are case-insensitive in PHP.
    MARKERS.iter().find(|m| {
        m.class.eq_ignore_ascii_case(class) && m.method.eq_ignore_ascii_case(method)
    })
}

/// Argument expressions in order; spread arguments end the list.
fn call_arguments<'t>(call: Node<'t>, parsed: &ParsedPhp<'_>) -> Vec<Node<'t>> {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = arguments.walk();
    let mut result = Vec::new();
    for argument in arguments.named_children(&mut cursor) {
        if argument.kind() != "argument" || parsed.text(argument).starts_with("...") {
            break;
        }
        let count = argument.named_child_count();
        if let Some(value) = count.checked_sub(1).and_then(|i| argument.named_child(i)) {
            result.push(value);
        }
    }
    result
}

fn collect_call(
    parsed: &ParsedPhp<'_>,
    call: Node<'_>,
    ctx: &ExtractionContext<'_>,
    result: &mut CatalogSet,
) {
    let Some(marker) = find_marker(parsed, call) else {
        return;
    };
    let args = call_arguments(call, parsed);

    let Some(message) = args
        .get(marker.message_arg)
        .and_then(|&arg| resolve_string(arg, parsed.source))
    else {
        return;
    };

    let explicit = match marker.category_arg {
        Some(index) => {
            let Some(category) = args
                .get(index)
                .and_then(|&arg| resolve_string(arg, parsed.source))
            else {
                return;
            };
            Some(category)
        }
        None => None,
    };

    let Some(category) = ctx.accept(explicit.as_deref()) else {
        return;
    };

    let line = call.start_position().row + 1;
    result.add_reference(category, &message, ctx.reference(Some(line)));
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::Reference;

    fn extract(code: &str, category: Option<&str>) -> Result<CatalogSet, ExtractError> {
        let ctx = ExtractionContext {
            path: Path::new("/site/src/Plugin.php"),
            file_path: "src/Plugin.php",
            content: code,
            category,
            default_category: "site",
        };
        PhpExtractor.extract(&ctx)
    }

    fn messages(set: &CatalogSet, category: &str) -> Vec<String> {
        set.get(category)
            .map(|c| c.iter().map(|t| t.original.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_concatenated_message() {
        let set = extract("<?php\necho Craft::t('app', 'foo' . 'bar');\n", None).unwrap();
        assert_eq!(messages(&set, "app"), vec!["foobar"]);
        let translation = set.get("app").unwrap().find("foobar").unwrap();
        assert_eq!(
            translation.references,
            vec![Reference::with_line("src/Plugin.php", 2)]
        );
    }

    #[test]
    fn test_all_markers() {
        let code = r#"<?php
Craft::t('app', 'Save');
\Craft::t("plugin", "Cancel");
Yii::t('yii', 'Close');
Translate::t('Hello');
"#;
        let set = extract(code, None).unwrap();
        assert_eq!(messages(&set, "app"), vec!["Save"]);
        assert_eq!(messages(&set, "plugin"), vec!["Cancel"]);
        assert_eq!(messages(&set, "yii"), vec!["Close"]);
        assert_eq!(messages(&set, "site"), vec!["Hello"]);
    }

    #[test]
    fn test_unresolvable_arguments_are_skipped() {
        let code = r#"<?php
Craft::t('app', $message);
Craft::t($category, 'Dynamic category');
Craft::t('app', "Hello {$name}");
Craft::t('app');
Other::t('app', 'Not a marker');
Craft::translate('app', 'Wrong method');
"#;
        let set = extract(code, None).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_category_filter() {
        let code = "<?php\nCraft::t('app', 'One');\nCraft::t('site', 'Two');\nTranslate::t('Three');\n";
        let set = extract(code, Some("site")).unwrap();
        assert_eq!(set.categories().collect::<Vec<_>>(), vec!["site"]);
        assert_eq!(messages(&set, "site"), vec!["Two", "Three"]);
    }

    #[test]
    fn test_repeated_calls_accumulate_references() {
        let code = "<?php\nCraft::t('app', 'Save');\n\nCraft::t('app', 'Save');\nCraft::t('app', 'Save');\n";
        let set = extract(code, None).unwrap();
        let catalog = set.get("app").unwrap();
        assert_eq!(catalog.len(), 1);
        let lines: Vec<_> = catalog
            .find("Save")
            .unwrap()
            .references
            .iter()
            .map(|r| r.line)
            .collect();
        assert_eq!(lines, vec![Some(2), Some(4), Some(5)]);
    }

    #[test]
    fn test_nested_calls_are_found() {
        let code = "<?php\nclass A {\n  function f() {\n    return ['x' => Craft::t('app', 'Nested')];\n  }\n}\n";
        let set = extract(code, None).unwrap();
        assert_eq!(messages(&set, "app"), vec!["Nested"]);
    }

    #[test]
    fn test_syntax_error() {
        let err = extract("<?php\nCraft::t('app', 'x'\n", None).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let code = "<?php\nCraft::t('app', 'A');\nYii::t('app', 'B');\n";
        let first = extract(code, None).unwrap();
        let second = extract(code, None).unwrap();
        assert_eq!(first, second);
    }
}
