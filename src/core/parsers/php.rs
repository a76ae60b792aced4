//! PHP parsing on top of tree-sitter.
//!
//! Besides producing the syntax tree this module knows how to read the few
//! literal shapes we care about: quoted strings and `.` concatenations of them.
//! Anything else (variables, interpolation, constants, heredocs) is treated as
//! unresolvable.

use tree_sitter::{Node, Parser, Tree};

use crate::core::ExtractError;

pub struct ParsedPhp<'s> {
    pub tree: Tree,
    pub source: &'s str,
}

impl<'s> ParsedPhp<'s> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }
}

pub fn parse_php_source<'s>(code: &'s str, file_path: &str) -> Result<ParsedPhp<'s>, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
        .map_err(|e| ExtractError::parse(file_path, None, e.to_string()))?;

    let tree = parser
        .parse(code, None)
        .ok_or_else(|| ExtractError::parse(file_path, None, "parser returned no tree"))?;

    if let Some(bad) = first_error_node(tree.root_node()) {
        let message = if bad.is_missing() {
            format!("missing `{}`", bad.kind())
        } else {
            "syntax error".to_string()
        };
        return Err(ExtractError::parse(
            file_path,
            Some(bad.start_position().row + 1),
            message,
        ));
    }

    Ok(ParsedPhp { tree, source: code })
}

fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}

/// Resolve an expression node to a string if it is built only from literals.
pub fn resolve_string(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "string" => {
            let text = &source[node.byte_range()];
            let body = strip_quotes(text, '\'')?;
            Some(unescape_single_quoted(body))
        }
        "encapsed_string" => {
            let mut cursor = node.walk();
            let literal_only = node
                .named_children(&mut cursor)
                .all(|child| {
                    matches!(
                        child.kind(),
                        "string_content" | "string_value" | "escape_sequence"
                    )
                });
            if !literal_only {
                return None;
            }
            let text = &source[node.byte_range()];
            let body = strip_quotes(text, '"')?;
            Some(unescape_double_quoted(body))
        }
        "binary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            if operator.kind() != "." {
                return None;
            }
            let left = resolve_string(node.child_by_field_name("left")?, source)?;
            let right = resolve_string(node.child_by_field_name("right")?, source)?;
            Some(left + right.as_str())
        }
        "parenthesized_expression" => resolve_string(node.named_child(0)?, source),
        _ => None,
    }
}

/// Strip the delimiters (and an optional `b` binary prefix) from a literal.
fn strip_quotes(text: &str, quote: char) -> Option<&str> {
    let text = text
        .strip_prefix('b')
        .or_else(|| text.strip_prefix('B'))
        .unwrap_or(text);
    text.strip_prefix(quote)?.strip_suffix(quote)
}

fn unescape_single_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && (next == '\'' || next == '\\')
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

fn unescape_double_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push(c);
            break;
        };
        let decoded = match next {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'v' => Some('\u{0B}'),
            'e' => Some('\u{1B}'),
            'f' => Some('\u{0C}'),
            '\\' => Some('\\'),
            '$' => Some('$'),
            '"' => Some('"'),
            _ => None,
        };
        match decoded {
            Some(decoded) => {
                out.push(decoded);
                chars.next();
            }
            // Unknown escapes are kept verbatim, backslash included.
            None => out.push(c),
        }
    }
    out
}
