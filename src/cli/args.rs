//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Collect translatable messages and report or write catalogs
//! - `update`: Refresh an existing catalog from the sources, keeping translations
//! - `init`: Initialize msgharvest configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::formats::Format;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Update(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the scanning commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory or single file to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Category used when a call does not name one (overrides config file)
    #[arg(long)]
    pub default_category: Option<String>,

    /// Name of the per-directory ignore file (overrides config file)
    #[arg(long)]
    pub ignore_file: Option<String>,

    /// Exit with status 1 when some files could not be extracted
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only keep messages of this category
    #[arg(long)]
    pub category: Option<String>,

    /// Write one catalog per category into this directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Catalog format used with --output-dir
    #[arg(long, value_enum, default_value_t = Format::Po)]
    pub format: Format,

    /// Language recorded in written catalogs
    #[arg(long)]
    pub language: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Catalog to update; its file name (without extension) is the category
    #[arg(long)]
    pub catalog: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable messages from PHP, JavaScript, template and project config files
    Extract(ExtractCommand),
    /// Add new messages to a catalog and drop the ones no longer used
    Update(UpdateCommand),
    /// Initialize a new .msgharvestrc.json configuration file
    Init,
}
