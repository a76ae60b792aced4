//! Core data types shared by extractors, the scanner and catalog formats.
//!
//! ## Module Structure
//!
//! - `catalog`: Translation, TranslationCatalog, CatalogSet and merge strategies
//! - `reference`: Reference (file and optional line where a message was found)

pub mod catalog;
pub mod reference;

pub use catalog::{CatalogSet, MergeStrategy, Translation, TranslationCatalog};
pub use reference::Reference;
