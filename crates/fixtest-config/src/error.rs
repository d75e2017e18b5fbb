use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse TOML config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid configuration value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to get current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}
