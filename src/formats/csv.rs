//! Two-column CSV catalogs (`original,translated`) without a header row.

use anyhow::{Context, Result};

use crate::core::{Translation, TranslationCatalog};

pub fn parse(content: &str) -> Result<TranslationCatalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(content.as_bytes());

    let mut catalog = TranslationCatalog::new();
    for record in reader.deserialize::<(String, String)>() {
        let (original, translated) = record.context("Invalid CSV record")?;
        catalog.add(Translation::with_translated(original, translated));
    }
    Ok(catalog)
}

pub fn generate(catalog: &TranslationCatalog) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for translation in catalog.iter().filter(|t| !t.disabled) {
        writer
            .serialize((&translation.original, &translation.translated))
            .context("Failed to write CSV record")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse() {
        let catalog = parse("Save,Speichern\n\"Hello, world\",\"Hallo, Welt\"\nEmpty,\n").unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find("Hello, world").unwrap().translated, "Hallo, Welt");
        assert!(!catalog.find("Empty").unwrap().is_translated());
    }

    #[test]
    fn test_parse_rejects_wrong_column_count() {
        assert!(parse("only-one-column\n").is_err());
    }

    #[test]
    fn test_generate_quotes_when_needed() {
        let mut catalog = TranslationCatalog::new();
        catalog.add(Translation::with_translated("Save", "Speichern"));
        catalog.add(Translation::new("Say \"hi\", please"));
        let mut gone = Translation::with_translated("Gone", "Weg");
        gone.disabled = true;
        catalog.add(gone);

        assert_eq!(
            generate(&catalog).unwrap(),
            "Save,Speichern\n\"Say \"\"hi\"\", please\",\n"
        );
    }
}
