use fixtest_selectors::FixtureSelector;
use fixtest_testcase::ProgramOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Directory searched for the configuration file
pub const CONFIG_DIR: &str = ".fixtest";
pub const CONFIG_FILE: &str = "config.toml";

/// Default per-test timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Fixture roots used when neither the CLI nor the config file name any
pub const DEFAULT_FIXTURE_ROOTS: &[&str] = &["src/mongo/client/sdam/json_tests/**/*.json"];

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value loaded from configuration file.
    Config,
    /// Built-in default value (lowest precedence).
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Config => write!(f, "config"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// `[defaults]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    pub verbose: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub continue_on_failure: Option<bool>,
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub verbose: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub continue_on_failure: Option<bool>,
}

/// Resolved configuration.
///
/// Built by [`Config::discover`] / [`Config::discover_from`]. Every resolved
/// key is recorded in `source_attribution`.
#[derive(Debug, Clone)]
pub struct Config {
    pub defaults: Defaults,
    pub selector: FixtureSelector,
    pub program_options: ProgramOptions,
    pub config_path: Option<PathBuf>,
    pub source_attribution: HashMap<String, ConfigSource>,
}

impl Default for Config {
    fn default() -> Self {
        let mut source_attribution = HashMap::new();
        for key in [
            "verbose",
            "timeout_secs",
            "continue_on_failure",
            "selector_roots",
            "selector_exclude_files",
        ] {
            source_attribution.insert(key.to_string(), ConfigSource::Default);
        }

        Self {
            defaults: Defaults {
                verbose: Some(false),
                timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
                continue_on_failure: Some(false),
            },
            selector: FixtureSelector::new(
                DEFAULT_FIXTURE_ROOTS.iter().map(|s| (*s).to_string()).collect(),
                Vec::new(),
            ),
            program_options: ProgramOptions::default(),
            config_path: None,
            source_attribution,
        }
    }
}

impl Config {
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.defaults.verbose.unwrap_or(false)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.defaults.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn continue_on_failure(&self) -> bool {
        self.defaults.continue_on_failure.unwrap_or(false)
    }

    #[must_use]
    pub fn source_of(&self, key: &str) -> Option<&ConfigSource> {
        self.source_attribution.get(key)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                value: "timeout must be at least 1 second".to_string(),
            });
        }

        self.selector
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "selector".to_string(),
                value: e.to_string(),
            })
    }
}
