use indexmap::IndexMap;
use indexmap::map::Entry;

use super::Reference;

/// One distinct message string within one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// The source text. Identity key inside a catalog.
    pub original: String,
    /// Translated text; empty for freshly extracted messages.
    pub translated: String,
    /// Where the message was found, in discovery order, without duplicates.
    pub references: Vec<Reference>,
    /// Only ever set by catalogs loaded from disk (e.g. obsolete PO entries).
    pub disabled: bool,
}

impl Translation {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            ..Default::default()
        }
    }

    pub fn with_translated(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
            ..Default::default()
        }
    }

    /// Append a reference unless it is already recorded.
    pub fn add_reference(&mut self, reference: Reference) {
        if !self.references.contains(&reference) {
            self.references.push(reference);
        }
    }

    pub fn is_translated(&self) -> bool {
        !self.translated.is_empty()
    }
}

/// How [`TranslationCatalog::merge_with`] reconciles entries present on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Fold two extraction results: references accumulate, the receiver's
    /// translated text wins when it has one, argument-only keys are appended.
    Additive,
    /// Reconcile a fresh extraction (receiver) with an existing catalog
    /// (argument): translated text and the disabled flag come from the
    /// existing entry, references stay the fresh ones, and keys that only the
    /// existing catalog knows are dropped.
    Override,
}

/// An ordered, de-duplicated collection of translations keyed by original text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationCatalog {
    /// Category the messages belong to (e.g. `site`, `app`).
    pub domain: Option<String>,
    /// Target language of the translated texts, when known.
    pub language: Option<String>,
    entries: IndexMap<String, Translation>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Default::default()
        }
    }

    pub fn find(&self, original: &str) -> Option<&Translation> {
        self.entries.get(original)
    }

    /// Look up a translation, creating an empty one at the end if missing.
    pub fn find_or_insert(&mut self, original: &str) -> &mut Translation {
        self.entries
            .entry(original.to_string())
            .or_insert_with(|| Translation::new(original))
    }

    /// Insert a translation. Returns `false` (and changes nothing) when a
    /// translation with the same original text already exists.
    pub fn add(&mut self, translation: Translation) -> bool {
        match self.entries.entry(translation.original.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(translation);
                true
            }
        }
    }

    /// Record that `original` occurs at `reference`.
    pub fn add_reference(&mut self, original: &str, reference: Reference) {
        self.find_or_insert(original).add_reference(reference);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Translation> {
        self.entries.values()
    }

    pub fn merge_with(&mut self, other: TranslationCatalog, strategy: MergeStrategy) {
        if self.domain.is_none() {
            self.domain = other.domain;
        }
        if self.language.is_none() {
            self.language = other.language;
        }

        match strategy {
            MergeStrategy::Additive => {
                for (original, incoming) in other.entries {
                    match self.entries.entry(original) {
                        Entry::Occupied(mut slot) => {
                            let existing = slot.get_mut();
                            for reference in incoming.references {
                                existing.add_reference(reference);
                            }
                            if existing.translated.is_empty() {
                                existing.translated = incoming.translated;
                            }
                            existing.disabled |= incoming.disabled;
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(incoming);
                        }
                    }
                }
            }
            MergeStrategy::Override => {
                let mut previous = other.entries;
                for translation in self.entries.values_mut() {
                    if let Some(old) = previous.swap_remove(&translation.original) {
                        translation.translated = old.translated;
                        translation.disabled = old.disabled;
                    }
                }
            }
        }
    }

    /// Reorder entries by case-insensitive original text.
    ///
    /// Equal keys keep their relative order. This is for output only; merging
    /// does not depend on entry order.
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, _, b, _| a.to_lowercase().cmp(&b.to_lowercase()));
    }
}

impl<'a> IntoIterator for &'a TranslationCatalog {
    type Item = &'a Translation;
    type IntoIter = indexmap::map::Values<'a, String, Translation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl FromIterator<Translation> for TranslationCatalog {
    fn from_iter<I: IntoIterator<Item = Translation>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for translation in iter {
            catalog.add(translation);
        }
        catalog
    }
}

/// Extraction output: one catalog per category, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSet {
    catalogs: IndexMap<String, TranslationCatalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> Option<&TranslationCatalog> {
        self.catalogs.get(category)
    }

    /// The catalog for `category`, created empty if missing.
    pub fn catalog_mut(&mut self, category: &str) -> &mut TranslationCatalog {
        self.catalogs
            .entry(category.to_string())
            .or_insert_with(|| TranslationCatalog::with_domain(category))
    }

    pub fn add_reference(&mut self, category: &str, original: &str, reference: Reference) {
        self.catalog_mut(category).add_reference(original, reference);
    }

    pub fn take(&mut self, category: &str) -> Option<TranslationCatalog> {
        self.catalogs.shift_remove(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationCatalog)> {
        self.catalogs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.values().all(TranslationCatalog::is_empty)
    }

    /// Total number of messages across all categories.
    pub fn message_count(&self) -> usize {
        self.catalogs.values().map(TranslationCatalog::len).sum()
    }

    pub fn merge_with(&mut self, other: CatalogSet, strategy: MergeStrategy) {
        for (category, catalog) in other.catalogs {
            match self.catalogs.entry(category) {
                Entry::Occupied(mut slot) => slot.get_mut().merge_with(catalog, strategy),
                Entry::Vacant(slot) => {
                    slot.insert(catalog);
                }
            }
        }
    }

    /// Sort categories by name and every catalog by original text.
    pub fn sort(&mut self) {
        self.catalogs.sort_keys();
        for catalog in self.catalogs.values_mut() {
            catalog.sort();
        }
    }
}

impl IntoIterator for CatalogSet {
    type Item = (String, TranslationCatalog);
    type IntoIter = indexmap::map::IntoIter<String, TranslationCatalog>;

    fn into_iter(self) -> Self::IntoIter {
        self.catalogs.into_iter()
    }
}
