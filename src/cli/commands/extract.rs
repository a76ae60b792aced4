use anyhow::Result;

use super::{CommandResult, CommandSummary, ExtractSummary, helper};
use crate::cli::args::ExtractCommand;
use crate::core::{ScanOutcome, scan};
use crate::formats;

/// Whether a category can be used as a catalog file name.
fn is_file_name(category: &str) -> bool {
    !category.is_empty()
        && category != "."
        && category != ".."
        && !category.contains(['/', '\\'])
}

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let mut options = helper::scan_options(&cmd.common)?;
    options.category = cmd.category.clone();

    let ScanOutcome {
        mut catalogs,
        failures,
        files_scanned,
    } = scan(&cmd.common.path, &options)?;
    catalogs.sort();

    let mut written = Vec::new();
    if let Some(output_dir) = &cmd.output_dir {
        for (category, catalog) in catalogs.iter() {
            if !is_file_name(category) {
                tracing::warn!(category, "category is not a valid file name, not written");
                continue;
            }
            let mut catalog = catalog.clone();
            if let Some(language) = &cmd.language {
                catalog.language = Some(language.clone());
            }
            let path = output_dir.join(format!("{}.{}", category, cmd.format.extension()));
            formats::save(&catalog, &path)?;
            written.push(path);
        }
    }

    Ok(helper::finish(
        CommandSummary::Extract(ExtractSummary { catalogs, written }),
        failures,
        files_scanned,
        cmd.common.strict,
    ))
}
