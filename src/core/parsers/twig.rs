//! Twig tokenizer.
//!
//! Template text is lexed in two modes, mirroring Twig's own lexer: the data
//! mode skips over raw text and comments until a `{{` or `{%` opener, and the
//! expression mode produces names, strings, numbers and punctuation until the
//! matching closer. `{% verbatim %}` / `{% raw %}` bodies are skipped as data.

use std::sync::LazyLock;

use logos::Logos;
use regex::Regex;

use crate::core::ExtractError;
use crate::utils::{LineIndex, unescape_quoted};

/// Raw tokens outside of tags.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum DataToken {
    #[regex(r"\{\{[-~]?")]
    VariableOpen,
    #[regex(r"\{%[-~]?")]
    BlockOpen,
    #[regex(r"\{#([^#]|#+[^#}])*#+\}")]
    Comment,
    #[regex(r"[^{]+")]
    Text,
    #[token("{")]
    Brace,
}

/// Raw tokens inside `{{ }}` and `{% %}`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ExprToken {
    #[regex(r"[-~]?\}\}")]
    VariableClose,
    #[regex(r"[-~]?%\}")]
    BlockClose,
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,
    #[regex(r"[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}]*")]
    Name,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r"[-+*/%=<>!?:.,|()\[\]{}~]")]
    Punctuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Variable,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Name(String),
    /// A string literal with its quotes removed and escapes decoded.
    String(String),
    Number(String),
    Punctuation(char),
    /// The closer of a `{{ }}` or `{% %}` tag.
    TagEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    /// Line number (1-indexed).
    pub line: usize,
}

static END_VERBATIM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%[-~]?\s*end(?:verbatim|raw)\s*[-~]?%\}").unwrap()
});

fn push_punctuation(tokens: &mut Vec<SpannedToken>, depth: &mut usize, c: char, line: usize) {
    match c {
        '(' | '[' | '{' => *depth += 1,
        ')' | ']' | '}' => *depth = depth.saturating_sub(1),
        _ => {}
    }
    tokens.push(SpannedToken {
        token: Token::Punctuation(c),
        line,
    });
}

/// Tokenize the tag contents of a Twig template.
///
/// Fails on unclosed tags, mismatched closers and characters Twig does not
/// accept inside expressions.
pub fn tokenize(content: &str, file_path: &str) -> Result<Vec<SpannedToken>, ExtractError> {
    let lines = LineIndex::new(content);
    let mut tokens = Vec::new();
    let mut data = DataToken::lexer(content);

    while let Some(result) = data.next() {
        let opener = match result {
            Ok(DataToken::VariableOpen) => TagKind::Variable,
            Ok(DataToken::BlockOpen) => TagKind::Block,
            _ => continue,
        };
        let open_line = lines.line_of(data.span().start);
        let tag_start = tokens.len();

        let mut expr = data.morph::<ExprToken>();
        let mut closer = None;
        // Open `(`, `[` and `{` inside the tag; a closer only counts at depth 0.
        let mut depth = 0usize;
        'tag: while let Some(result) = expr.next() {
            let line = lines.line_of(expr.span().start);
            let slice = expr.slice();
            let token = match result {
                Ok(ExprToken::VariableClose) if depth == 0 => {
                    closer = Some((TagKind::Variable, line));
                    break;
                }
                Ok(ExprToken::BlockClose) if depth == 0 => {
                    closer = Some((TagKind::Block, line));
                    break;
                }
                Ok(ExprToken::VariableClose | ExprToken::BlockClose) => {
                    // `}}` ending a nested hash, or `%}` as modulo then `}`.
                    for c in slice.chars() {
                        if c == '}' && depth == 0 {
                            // `{a: 1}}}`: this brace starts the tag closer.
                            if expr.remainder().starts_with('}') {
                                expr.bump(1);
                                closer = Some((TagKind::Variable, line));
                                break 'tag;
                            }
                        }
                        push_punctuation(&mut tokens, &mut depth, c, line);
                    }
                    continue;
                }
                Ok(ExprToken::Whitespace) => continue,
                Ok(ExprToken::DoubleQuoted | ExprToken::SingleQuoted) => {
                    Token::String(unescape_quoted(&slice[1..slice.len() - 1]))
                }
                Ok(ExprToken::Name) => Token::Name(slice.to_string()),
                Ok(ExprToken::Number) => Token::Number(slice.to_string()),
                Ok(ExprToken::Punctuation) => {
                    for c in slice.chars() {
                        push_punctuation(&mut tokens, &mut depth, c, line);
                    }
                    continue;
                }
                Err(()) => {
                    return Err(ExtractError::parse(
                        file_path,
                        Some(line),
                        format!("unexpected character `{}`", slice),
                    ));
                }
            };
            tokens.push(SpannedToken { token, line });
        }

        match closer {
            None => {
                let what = match opener {
                    TagKind::Variable => "unclosed variable tag",
                    TagKind::Block => "unclosed block tag",
                };
                return Err(ExtractError::parse(file_path, Some(open_line), what));
            }
            Some((kind, line)) if kind != opener => {
                return Err(ExtractError::parse(
                    file_path,
                    Some(line),
                    "tag closed with the wrong delimiter",
                ));
            }
            Some((_, line)) => tokens.push(SpannedToken {
                token: Token::TagEnd,
                line,
            }),
        }

        data = expr.morph();

        let starts_verbatim = opener == TagKind::Block
            && matches!(
                tokens.get(tag_start).map(|t| &t.token),
                Some(Token::Name(name)) if name == "verbatim" || name == "raw"
            );
        if starts_verbatim {
            let Some(end) = END_VERBATIM_REGEX.find(data.remainder()) else {
                return Err(ExtractError::parse(
                    file_path,
                    Some(open_line),
                    "unclosed verbatim block",
                ));
            };
            data.bump(end.end());
        }
    }

    Ok(tokens)
}
