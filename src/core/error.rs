use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scanning a source tree.
///
/// `Parse` and `Io` on a single source file are file-scoped: during a folder
/// scan they are recorded as [`FileFailure`]s and the scan continues. The other
/// variants abort the whole run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("scan root does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("cannot read ignore file {}: {reason}", path.display())]
    IgnoreFile { path: PathBuf, reason: String },

    #[error("unsupported file type: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", format_parse_error(path, *line, message))]
    Parse {
        path: String,
        line: Option<usize>,
        message: String,
    },
}

fn format_parse_error(path: &str, line: Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("failed to parse {}:{}: {}", path, line, message),
        None => format!("failed to parse {}: {}", path, message),
    }
}

impl ExtractError {
    pub fn parse(path: impl Into<String>, line: Option<usize>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Whether this error only affects the file it was raised for.
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Io { .. })
    }
}

/// A source file that could not be extracted.
#[derive(Debug)]
pub struct FileFailure {
    /// Path relative to the scan base.
    pub file_path: String,
    pub error: ExtractError,
}
