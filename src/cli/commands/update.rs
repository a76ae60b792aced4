use anyhow::{Result, bail};

use super::{CommandResult, CommandSummary, UpdateSummary, helper};
use crate::cli::args::UpdateCommand;
use crate::core::{MergeStrategy, Translation, TranslationCatalog, scan};
use crate::formats;

pub fn update(cmd: UpdateCommand) -> Result<CommandResult> {
    let existing = if cmd.catalog.exists() {
        formats::load(&cmd.catalog)?
    } else {
        formats::blank(&cmd.catalog)?
    };
    let Some(domain) = existing.domain.clone() else {
        bail!(
            "Cannot tell the category of {}: the file has no name",
            cmd.catalog.display()
        );
    };

    let mut options = helper::scan_options(&cmd.common)?;
    options.category = Some(domain.clone());
    let mut outcome = scan(&cmd.common.path, &options)?;

    let mut fresh = outcome
        .catalogs
        .take(&domain)
        .unwrap_or_else(|| TranslationCatalog::with_domain(&domain));

    let added = fresh
        .iter()
        .filter(|t| existing.find(&t.original).is_none())
        .count();
    let unseen: Vec<Translation> = existing
        .iter()
        .filter(|t| fresh.find(&t.original).is_none())
        .cloned()
        .collect();

    // A file that failed to parse may still use messages the scan did not see.
    let (removed, kept) = if outcome.failures.is_empty() {
        (unseen.len(), 0)
    } else {
        (0, unseen.len())
    };

    fresh.merge_with(existing, MergeStrategy::Override);
    if kept > 0 {
        tracing::warn!(
            catalog = %cmd.catalog.display(),
            kept,
            "some files could not be extracted, keeping messages they may use"
        );
        for translation in unseen {
            fresh.add(translation);
        }
    }
    fresh.sort();
    formats::save(&fresh, &cmd.catalog)?;

    tracing::debug!(catalog = %cmd.catalog.display(), added, removed, "updated catalog");

    Ok(helper::finish(
        CommandSummary::Update(UpdateSummary {
            catalog: cmd.catalog,
            added,
            removed,
            kept,
            total: fresh.len(),
        }),
        outcome.failures,
        outcome.files_scanned,
        cmd.common.strict,
    ))
}
