//! Configuration management for fixtest
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > file > defaults. The TOML file lives at `.fixtest/config.toml` and
//! supports `[defaults]`, `[selector]` and `[program_options]` sections.

mod discovery;
mod error;
mod model;

pub use error::ConfigError;
pub use model::{
    CONFIG_DIR, CONFIG_FILE, CliArgs, Config, ConfigSource, DEFAULT_FIXTURE_ROOTS,
    DEFAULT_TIMEOUT_SECS, Defaults,
};
