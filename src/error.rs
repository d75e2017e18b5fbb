use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use fixtest_config::ConfigError;
use fixtest_selectors::GlobError;
use fixtest_testcase::TestCaseError;

use crate::exit_codes::ExitCode;

/// Library-level error type.
///
/// Library code returns `FixtestError` and never calls `std::process::exit()`;
/// the CLI maps it with [`to_exit_code()`](Self::to_exit_code) and prints
/// [`display_for_user()`](Self::display_for_user).
#[derive(Error, Debug)]
pub enum FixtestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fixture selection error: {0}")]
    Selector(#[from] GlobError),

    #[error("Test case error: {0}")]
    TestCase(#[from] TestCaseError),

    #[error("No fixtures selected by roots {roots:?}")]
    NoFixtures { roots: Vec<String> },

    #[error("Failed to write report to {path}: {reason}")]
    ReportWriteFailed { path: PathBuf, reason: String },

    #[error("Failed to change directory to {path}: {reason}")]
    WorkdirFailed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    fn user_message(&self) -> String;

    fn context(&self) -> Option<String>;

    fn suggestions(&self) -> Vec<String>;

    fn category(&self) -> ErrorCategory;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Discovery,
    TestExecution,
    FileSystem,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Discovery => write!(f, "Discovery"),
            Self::TestExecution => write!(f, "Test Execution"),
            Self::FileSystem => write!(f, "File System"),
        }
    }
}

impl FixtestError {
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_)
            | Self::Selector(_)
            | Self::NoFixtures { .. }
            | Self::WorkdirFailed { .. } => ExitCode::CLI_ARGS,
            Self::TestCase(err) if err.is_fatal() => ExitCode::STOP_EXECUTION,
            Self::TestCase(_) => ExitCode::TEST_FAILURE,
            Self::ReportWriteFailed { .. } | Self::Io(_) => ExitCode::INTERNAL,
        }
    }

    /// Message, context and suggestions formatted for a terminal.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut out = format!("error [{}]: {}", self.category(), self.user_message());
        if let Some(context) = self.context() {
            out.push_str(&format!("\n  context: {context}"));
        }
        for suggestion in self.suggestions() {
            out.push_str(&format!("\n  help: {suggestion}"));
        }
        out
    }
}

impl UserFriendlyError for FixtestError {
    fn user_message(&self) -> String {
        match self {
            Self::TestCase(TestCaseError::StopExecution { reason }) => {
                format!("Test run aborted: {reason}")
            }
            Self::NoFixtures { .. } => "No fixture files matched the selector".to_string(),
            other => other.to_string(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::TestCase(TestCaseError::StopExecution { .. }) => Some(
                "Executable discovery requires exactly one matching binary in the build tree"
                    .to_string(),
            ),
            Self::NoFixtures { roots } => Some(format!("Searched roots: {}", roots.join(", "))),
            Self::Config(ConfigError::Parse { path, .. }) => {
                Some(format!("While reading {}", path.display()))
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TestCase(TestCaseError::StopExecution { .. }) => vec![
                "Build the conformance test binary before running the suite".to_string(),
                "Remove stale or duplicate build directories so only one binary matches"
                    .to_string(),
            ],
            Self::NoFixtures { .. } => vec![
                "Check [selector] roots in .fixtest/config.toml".to_string(),
                "Pass fixture files explicitly on the command line".to_string(),
            ],
            Self::Config(_) => vec!["Check .fixtest/config.toml or the --config path".to_string()],
            _ => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) | Self::WorkdirFailed { .. } => ErrorCategory::Configuration,
            Self::Selector(_) | Self::NoFixtures { .. } => ErrorCategory::Discovery,
            Self::TestCase(err) if err.is_fatal() => ErrorCategory::Discovery,
            Self::TestCase(_) => ErrorCategory::TestExecution,
            Self::ReportWriteFailed { .. } | Self::Io(_) => ErrorCategory::FileSystem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_execution_maps_to_its_own_exit_code() {
        let err = FixtestError::from(TestCaseError::StopExecution {
            reason: "There must be a single sdam_json_test binary in []".to_string(),
        });
        assert_eq!(err.to_exit_code(), ExitCode::STOP_EXECUTION);
        assert_eq!(err.category(), ErrorCategory::Discovery);

        let shown = err.display_for_user();
        assert!(shown.contains("There must be a single sdam_json_test binary"));
        assert!(shown.contains("help:"));
    }

    #[test]
    fn test_test_failure_maps_to_failure_exit_code() {
        let err = FixtestError::from(TestCaseError::TestFailure {
            test_name: "a.json".to_string(),
            reason: "exit code 1".to_string(),
            exit_code: Some(1),
        });
        assert_eq!(err.to_exit_code(), ExitCode::TEST_FAILURE);
    }

    #[test]
    fn test_config_errors_map_to_cli_args() {
        let err = FixtestError::from(ConfigError::InvalidValue {
            key: "timeout_secs".to_string(),
            value: "0".to_string(),
        });
        assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_runner_errors_arrive_through_test_case() {
        let err = FixtestError::from(TestCaseError::from(
            fixtest_runner::RunnerError::Timeout {
                timeout: std::time::Duration::from_millis(200),
            },
        ));
        assert_eq!(err.to_exit_code(), ExitCode::TEST_FAILURE);
        assert_eq!(err.category(), ErrorCategory::TestExecution);
        assert!(err.display_for_user().contains("200ms"));
    }
}
