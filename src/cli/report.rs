//! Report formatting and printing utilities.
//!
//! Kept apart from the core so msgharvest can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, UpdateSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{CatalogSet, FileFailure};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of references to display per message.
const MAX_REFERENCES_DISPLAY: usize = 3;

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Extract(summary) => {
            print_extract_to(summary, result.files_scanned, verbose, &mut stdout)
        }
        CommandSummary::Update(summary) => print_update_to(summary, &mut stdout),
        CommandSummary::Init(summary) => print_init_to(summary, &mut stdout),
    }

    print_failures_to(&result.failures, &mut io::stderr().lock());
}

/// Print the per-category summary of an extraction.
pub fn print_extract_to<W: Write>(
    summary: &ExtractSummary,
    files_scanned: usize,
    verbose: bool,
    writer: &mut W,
) {
    let catalogs = &summary.catalogs;
    let width = catalogs
        .categories()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);

    for (category, catalog) in catalogs.iter() {
        let padding = width - category.width();
        let _ = writeln!(
            writer,
            "{}{}  {}",
            category.bold(),
            " ".repeat(padding),
            plural(catalog.len(), "message", "messages")
        );
    }

    if verbose {
        print_messages_to(catalogs, writer);
    }

    for path in &summary.written {
        let _ = writeln!(writer, "{} Wrote {}", SUCCESS_MARK.green(), path.display());
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} in {} from {}",
            plural(catalogs.message_count(), "message", "messages"),
            plural(catalogs.categories().count(), "category", "categories"),
            plural(files_scanned, "file", "files")
        )
        .green()
    );
}

fn print_messages_to<W: Write>(catalogs: &CatalogSet, writer: &mut W) {
    for (category, catalog) in catalogs.iter() {
        let _ = writeln!(writer, "\n{}", format!("[{}]", category).cyan());
        for translation in catalog {
            let mut references: Vec<String> = translation
                .references
                .iter()
                .take(MAX_REFERENCES_DISPLAY)
                .map(ToString::to_string)
                .collect();
            let hidden = translation.references.len().saturating_sub(MAX_REFERENCES_DISPLAY);
            if hidden > 0 {
                references.push(format!("(+{} more)", hidden));
            }
            let _ = writeln!(
                writer,
                "  \"{}\"  {}",
                translation.original.escape_debug(),
                references.join(", ").dimmed()
            );
        }
    }
    let _ = writeln!(writer);
}

pub fn print_update_to<W: Write>(summary: &UpdateSummary, writer: &mut W) {
    let kept = if summary.kept > 0 {
        format!(", {} kept", summary.kept)
    } else {
        String::new()
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Updated {}: {} added, {} removed{}, {} total",
            summary.catalog.display(),
            summary.added,
            summary.removed,
            kept,
            plural(summary.total, "message", "messages")
        )
        .green()
    );
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

/// Print files that could not be extracted.
pub fn print_failures_to<W: Write>(failures: &[FileFailure], writer: &mut W) {
    if failures.is_empty() {
        return;
    }
    for failure in failures {
        let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), failure.error);
    }
    let _ = writeln!(
        writer,
        "\n{} {} could not be extracted",
        FAILURE_MARK.red(),
        plural(failures.len(), "file", "files")
    );
}
