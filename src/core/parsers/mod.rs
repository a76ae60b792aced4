//! Parsers for the source file types we extract from.
//!
//! - `php`: PHP sources (tree-sitter)
//! - `script`: JavaScript sources (swc)
//! - `twig`: Twig templates (logos tokenizer)
//! - `yaml`: project config files, flattened to dotted paths

pub mod php;
pub mod script;
pub mod twig;
pub mod yaml;
