//! Extraction engine.
//!
//! ## Module Structure
//!
//! - `data`: catalogs, translations and references
//! - `error`: typed errors raised while scanning
//! - `ignore`: layered `.translateignore` evaluation
//! - `parsers`: PHP, JavaScript, Twig and YAML parsing
//! - `extract`: per-file extractors, one per grammar
//! - `scanner`: walks a root, dispatches files and merges the results

pub mod data;
pub mod error;
pub mod extract;
pub mod ignore;
pub mod parsers;
pub mod scanner;

pub use data::{CatalogSet, MergeStrategy, Reference, Translation, TranslationCatalog};
pub use error::{ExtractError, FileFailure};
pub use ignore::IgnoreFilter;
pub use scanner::{ScanOptions, ScanOutcome, scan};
