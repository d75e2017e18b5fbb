use fixtest_runner::RunnerError;
use std::path::PathBuf;
use thiserror::Error;

/// How an error affects the surrounding suite run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The whole run must stop; the environment or build is unusable.
    Fatal,
    /// Only this test case failed.
    Failure,
}

/// Errors produced while constructing or running a test case
#[derive(Error, Debug)]
pub enum TestCaseError {
    /// Aborts the entire run. Never retried: rediscovery would see the same tree.
    #[error("Stop execution: {reason}")]
    StopExecution { reason: String },

    #[error("{test_name} failed: {reason}")]
    TestFailure {
        test_name: String,
        reason: String,
        exit_code: Option<i32>,
    },

    /// Spawn, wait or timeout failure reported by the process runner.
    #[error("Process error: {0}")]
    Process(#[from] RunnerError),
}

impl TestCaseError {
    /// Discovery found zero or several candidate executables.
    #[must_use]
    pub fn ambiguous_executable(binary: &str, candidates: &[PathBuf]) -> Self {
        let listed = candidates
            .iter()
            .map(|p| format!("'{}'", p.display()))
            .collect::<Vec<_>>()
            .join(", ");
        Self::StopExecution {
            reason: format!("There must be a single {binary} binary in [{listed}]"),
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::StopExecution { .. } => Severity::Fatal,
            Self::TestFailure { .. } | Self::Process(_) => Severity::Failure,
        }
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
