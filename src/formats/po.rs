//! gettext PO catalogs.
//!
//! Supports the subset translation tools exchange: the header entry,
//! `#:` reference comments, `msgid`/`msgstr` with C escapes and continuation
//! lines, and obsolete `#~` entries (loaded as disabled). Plural entries keep
//! their first form. `msgctxt` is read but not kept.

use anyhow::{Result, bail};

use crate::core::{Reference, Translation, TranslationCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str,
    /// `msgstr[N]` with N > 0; read and discarded.
    OtherPlural,
}

#[derive(Debug, Default)]
struct PendingEntry {
    references: Vec<Reference>,
    id: Option<String>,
    translated: String,
    obsolete: bool,
    last: Option<Field>,
}

impl PendingEntry {
    fn has_content(&self) -> bool {
        self.id.is_some()
    }

    fn append(&mut self, field: Field, text: &str) {
        match field {
            Field::Id => self.id.get_or_insert_with(String::new).push_str(text),
            Field::Str => self.translated.push_str(text),
            Field::Context | Field::IdPlural | Field::OtherPlural => {}
        }
    }
}

fn header_language(header: &str) -> Option<String> {
    header.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        let value = value.trim();
        (name.trim().eq_ignore_ascii_case("Language") && !value.is_empty())
            .then(|| value.to_string())
    })
}

fn flush(entry: &mut PendingEntry, catalog: &mut TranslationCatalog) {
    let entry = std::mem::take(entry);
    let Some(id) = entry.id else {
        return;
    };
    if id.is_empty() {
        if catalog.language.is_none() {
            catalog.language = header_language(&entry.translated);
        }
        return;
    }
    let mut translation = Translation::with_translated(id, entry.translated);
    translation.references = entry.references;
    translation.disabled = entry.obsolete;
    catalog.add(translation);
}

/// Decode the body of a quoted PO string.
fn unquote(text: &str, line_no: usize) -> Result<String> {
    let Some(body) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        bail!("line {}: expected a quoted string, got `{}`", line_no, text);
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('v') => out.push('\u{0B}'),
            Some(other) => out.push(other),
            None => bail!("line {}: dangling backslash", line_no),
        }
    }
    Ok(out)
}

fn split_keyword(line: &str) -> Option<(Field, &str)> {
    let (keyword, rest) = line.split_once(char::is_whitespace)?;
    let field = match keyword {
        "msgctxt" => Field::Context,
        "msgid" => Field::Id,
        "msgid_plural" => Field::IdPlural,
        "msgstr" | "msgstr[0]" => Field::Str,
        k if k.starts_with("msgstr[") => Field::OtherPlural,
        _ => return None,
    };
    Some((field, rest.trim()))
}

pub fn parse(content: &str) -> Result<TranslationCatalog> {
    let mut catalog = TranslationCatalog::new();
    let mut entry = PendingEntry::default();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let mut line = raw.trim();

        if line.is_empty() {
            flush(&mut entry, &mut catalog);
            continue;
        }

        let mut obsolete = false;
        if let Some(rest) = line.strip_prefix("#~") {
            obsolete = true;
            line = rest.trim();
        } else if let Some(refs) = line.strip_prefix("#:") {
            if entry.last.is_some() {
                flush(&mut entry, &mut catalog);
            }
            entry
                .references
                .extend(refs.split_whitespace().map(Reference::parse));
            continue;
        } else if line.starts_with('#') {
            continue;
        }

        if line.starts_with('"') {
            let Some(field) = entry.last else {
                bail!("line {}: string without a keyword", line_no);
            };
            let text = unquote(line, line_no)?;
            entry.append(field, &text);
            continue;
        }

        let Some((field, rest)) = split_keyword(line) else {
            bail!("line {}: unexpected `{}`", line_no, line);
        };
        // A new entry starts without a blank line in between.
        if matches!(field, Field::Context | Field::Id)
            && matches!(entry.last, Some(Field::Str | Field::OtherPlural))
        {
            flush(&mut entry, &mut catalog);
        }
        if field == Field::Id && entry.has_content() {
            bail!("line {}: duplicate msgid", line_no);
        }

        let text = unquote(rest, line_no)?;
        if field == Field::Id {
            entry.id = Some(String::new());
        }
        entry.append(field, &text);
        entry.last = Some(field);
        entry.obsolete |= obsolete;
    }
    flush(&mut entry, &mut catalog);

    Ok(catalog)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn write_field(out: &mut String, keyword: &str, value: &str) {
    let inner_newline = value.trim_end_matches('\n').contains('\n');
    if !inner_newline {
        out.push_str(&format!("{} \"{}\"\n", keyword, escape(value)));
        return;
    }
    out.push_str(&format!("{} \"\"\n", keyword));
    for part in value.split_inclusive('\n') {
        out.push_str(&format!("\"{}\"\n", escape(part)));
    }
}

pub fn generate(catalog: &TranslationCatalog) -> String {
    let mut out = String::new();

    out.push_str("msgid \"\"\nmsgstr \"\"\n");
    out.push_str("\"Content-Type: text/plain; charset=UTF-8\\n\"\n");
    if let Some(language) = &catalog.language {
        out.push_str(&format!("\"Language: {}\\n\"\n", escape(language)));
    }

    for translation in catalog.iter().filter(|t| !t.disabled) {
        out.push('\n');
        for reference in &translation.references {
            out.push_str(&format!("#: {}\n", reference));
        }
        write_field(&mut out, "msgid", &translation.original);
        write_field(&mut out, "msgstr", &translation.translated);
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"# Translation of site
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Language: de\n"

#: templates/index.twig:3
#: src/Plugin.php:12 templates/_nav.twig
#, fuzzy
msgid "Hello"
msgstr "Hallo"

msgid ""
"First line\n"
"second line"
msgstr "Erste Zeile\nzweite Zeile"

msgid "Say \"hi\""
msgstr ""

#~ msgid "Gone"
#~ msgstr "Weg"
"#;

    #[test]
    fn test_parse_sample() {
        let catalog = parse(SAMPLE).unwrap();

        assert_eq!(catalog.language.as_deref(), Some("de"));
        assert_eq!(catalog.len(), 4);

        let hello = catalog.find("Hello").unwrap();
        assert_eq!(hello.translated, "Hallo");
        assert_eq!(
            hello.references,
            vec![
                Reference::with_line("templates/index.twig", 3),
                Reference::with_line("src/Plugin.php", 12),
                Reference::without_line("templates/_nav.twig"),
            ]
        );

        let multiline = catalog.find("First line\nsecond line").unwrap();
        assert_eq!(multiline.translated, "Erste Zeile\nzweite Zeile");

        assert!(!catalog.find("Say \"hi\"").unwrap().is_translated());

        let gone = catalog.find("Gone").unwrap();
        assert!(gone.disabled);
        assert_eq!(gone.translated, "Weg");
    }

    #[test]
    fn test_entries_without_blank_lines() {
        let catalog = parse("msgid \"A\"\nmsgstr \"1\"\nmsgid \"B\"\nmsgstr \"2\"\n").unwrap();
        let pairs: Vec<_> = catalog
            .iter()
            .map(|t| (t.original.as_str(), t.translated.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn test_plural_keeps_first_form() {
        let content = "msgid \"file\"\nmsgid_plural \"files\"\nmsgstr[0] \"Datei\"\nmsgstr[1] \"Dateien\"\n";
        let catalog = parse(content).unwrap();
        assert_eq!(catalog.find("file").unwrap().translated, "Datei");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("msgid Hello\n").is_err());
        assert!(parse("\"orphan\"\n").is_err());
        assert!(parse("bogus \"x\"\n").is_err());
    }

    #[test]
    fn test_generate() {
        let mut catalog = TranslationCatalog::with_domain("site");
        catalog.language = Some("de".to_string());
        catalog.add_reference("Hello", Reference::with_line("templates/index.twig", 3));
        catalog.add_reference("Hello", Reference::without_line("config/project/project.yaml"));
        catalog.add(Translation::with_translated("Two\nlines", "Zwei\nZeilen"));
        let mut gone = Translation::with_translated("Gone", "Weg");
        gone.disabled = true;
        catalog.add(gone);

        let expected = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Language: de\n"

#: templates/index.twig:3
#: config/project/project.yaml
msgid "Hello"
msgstr ""

msgid ""
"Two\n"
"lines"
msgstr ""
"Zwei\n"
"Zeilen"
"#;
        assert_eq!(generate(&catalog), expected);
    }

    #[test]
    fn test_generated_output_parses_back() {
        let mut catalog = TranslationCatalog::new();
        catalog.add(Translation::with_translated("Tab\there \\ \"q\"", "ok"));
        let parsed = parse(&generate(&catalog)).unwrap();
        assert_eq!(parsed.find("Tab\there \\ \"q\"").unwrap().translated, "ok");
    }
}
