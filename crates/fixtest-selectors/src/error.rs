use thiserror::Error;

/// Errors raised while compiling or expanding glob patterns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlobError {
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
