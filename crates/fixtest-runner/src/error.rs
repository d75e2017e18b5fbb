//! Error types for the runner crate

use std::time::Duration;
use thiserror::Error;

/// Failures raised while spawning or supervising a child process.
///
/// A non-zero exit code is NOT an error at this layer; it is reported through
/// [`ProcessOutput::exit_code`](crate::ProcessOutput::exit_code).
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to spawn process '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("Failed to wait for process '{program}': {reason}")]
    WaitFailed { program: String, reason: String },

    #[error("Process monitoring thread terminated unexpectedly")]
    MonitorLost,

    #[error("Execution timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}
