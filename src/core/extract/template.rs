//! Translatable strings in Twig templates.
//!
//! Two idioms are recognized:
//! - `view.registerTranslations('category', ['One', 'Two'])`, found on the
//!   token stream so each string keeps its own line;
//! - `'Message'|t`, `'Message'|translate('category')` and
//!   `Craft.t('category', 'Message')`, matched on the raw text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::extract::{ExtractionContext, Extractor};
use crate::core::parsers::twig::{SpannedToken, Token, tokenize};
use crate::core::{CatalogSet, ExtractError};
use crate::utils::{LineIndex, unescape_quoted};

const REGISTER_FUNCTION: &str = "registerTranslations";

/// `'Message'|t` or `"Message"|translate`, with an optional quoted category
/// as the first filter argument.
static FILTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")\s*\|\s*(?:translate|t)\b(?:\s*\(\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"))?"#,
    )
    .unwrap()
});

/// `Craft.t('category', 'Message')` written as template expression text.
static CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\bCraft\.t\(\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")\s*,\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExtractor;

impl Extractor for TemplateExtractor {
    fn extract(&self, ctx: &ExtractionContext<'_>) -> Result<CatalogSet, ExtractError> {
        extract_messages(ctx, true)
    }
}

impl TemplateExtractor {
    /// Extract from template source embedded in another file, such as a
    /// config value. References carry no line number.
    pub fn extract_inline(&self, ctx: &ExtractionContext<'_>) -> Result<CatalogSet, ExtractError> {
        extract_messages(ctx, false)
    }
}

fn extract_messages(ctx: &ExtractionContext<'_>, track_lines: bool) -> Result<CatalogSet, ExtractError> {
    let mut result = CatalogSet::new();

    let tokens = tokenize(ctx.content, ctx.file_path)?;
    collect_registered(&tokens, ctx, track_lines, &mut result)?;

    let lines = LineIndex::new(ctx.content);
    let line_at = |offset: usize| track_lines.then(|| lines.line_of(offset));

    for caps in FILTER_REGEX.captures_iter(ctx.content) {
        let Some(message) = quoted_group(&caps, 1, 2) else {
            continue;
        };
        let category = quoted_group(&caps, 3, 4);
        if let Some(category) = ctx.accept(category.as_deref()) {
            let offset = caps.get(0).map_or(0, |m| m.start());
            result.add_reference(category, &message, ctx.reference(line_at(offset)));
        }
    }

    for caps in CALL_REGEX.captures_iter(ctx.content) {
        let (Some(category), Some(message)) = (quoted_group(&caps, 1, 2), quoted_group(&caps, 3, 4))
        else {
            continue;
        };
        if let Some(category) = ctx.accept(Some(category.as_str())) {
            let offset = caps.get(0).map_or(0, |m| m.start());
            result.add_reference(category, &message, ctx.reference(line_at(offset)));
        }
    }

    Ok(result)
}

/// The unescaped body of whichever of the single/double quoted groups matched.
fn quoted_group(caps: &Captures<'_>, single: usize, double: usize) -> Option<String> {
    caps.get(single)
        .or_else(|| caps.get(double))
        .map(|m| unescape_quoted(m.as_str()))
}

/// Collect the strings of every `registerTranslations(category, [...])` call.
fn collect_registered(
    tokens: &[SpannedToken],
    ctx: &ExtractionContext<'_>,
    track_lines: bool,
    result: &mut CatalogSet,
) -> Result<(), ExtractError> {
    let mut i = 0;
    while i < tokens.len() {
        let is_call = matches!(&tokens[i].token, Token::Name(name) if name == REGISTER_FUNCTION)
            && matches!(tokens.get(i + 1).map(|t| &t.token), Some(Token::Punctuation('(')));
        if !is_call {
            i += 1;
            continue;
        }

        let Some(
            [
                SpannedToken { token: Token::String(category), .. },
                SpannedToken { token: Token::Punctuation(','), .. },
                SpannedToken { token: Token::Punctuation('['), line: open_line },
            ],
        ) = tokens.get(i + 2..i + 5)
        else {
            // Not a literal category followed by an inline array.
            i += 2;
            continue;
        };

        let accepted = ctx.accept(Some(category.as_str()));
        let mut j = i + 5;
        let mut expect_string = true;
        loop {
            match tokens.get(j).map(|t| &t.token) {
                Some(Token::Punctuation(']')) => break,
                Some(Token::String(message)) if expect_string => {
                    if let Some(category) = accepted {
                        let line = track_lines.then_some(tokens[j].line);
                        result.add_reference(category, message, ctx.reference(line));
                    }
                    expect_string = false;
                }
                Some(Token::Punctuation(',')) if !expect_string => expect_string = true,
                other => {
                    let line = match other {
                        Some(_) => tokens[j].line,
                        None => *open_line,
                    };
                    return Err(ExtractError::parse(
                        ctx.file_path,
                        Some(line),
                        format!("unclosed array in `{}` call", REGISTER_FUNCTION),
                    ));
                }
            }
            j += 1;
        }
        i = j + 1;
    }
    Ok(())
}
