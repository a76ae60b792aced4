use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, every file was extracted
/// - `Failure` (1): Some files could not be extracted and `--strict` was given
/// - `Error` (2): Command failed (missing root, bad config, unwritable catalog, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_result(result: &CommandResult) -> Self {
        if result.exit_on_failures && !result.failures.is_empty() {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CommandSummary, InitSummary};
    use crate::core::{ExtractError, FileFailure};

    fn result_with(failures: usize, exit_on_failures: bool) -> CommandResult {
        CommandResult {
            summary: CommandSummary::Init(InitSummary { created: false }),
            failures: (0..failures)
                .map(|i| FileFailure {
                    file_path: format!("f{}.twig", i),
                    error: ExtractError::parse(format!("f{}.twig", i), None, "bad"),
                })
                .collect(),
            files_scanned: failures,
            exit_on_failures,
        }
    }

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn failures_only_fail_when_strict() {
        assert_eq!(ExitStatus::from_result(&result_with(0, true)), ExitStatus::Success);
        assert_eq!(ExitStatus::from_result(&result_with(2, false)), ExitStatus::Success);
        assert_eq!(ExitStatus::from_result(&result_with(2, true)), ExitStatus::Failure);
    }
}
