//! msgharvest - translatable string extraction for Craft CMS projects
//!
//! msgharvest scans a project for messages passed to the translation helpers
//! (`Craft::t()` in PHP, `Craft.t()` in JavaScript, the `|t` filter in Twig) and
//! for user-facing labels in the YAML project config, and gathers them into
//! per-category translation catalogs.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (ignore filter, parsers, extractors, scanner)
//! - `formats`: Reading and writing PO, JSON, CSV and PHP catalogs
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod formats;
pub mod utils;
