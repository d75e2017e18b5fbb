use fixtest_selectors::FixtureSelector;
use fixtest_testcase::ProgramOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;
use crate::model::{CONFIG_DIR, CONFIG_FILE, CliArgs, Config, ConfigSource, Defaults};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    defaults: Option<Defaults>,
    selector: Option<FixtureSelector>,
    program_options: Option<ProgramOptions>,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let config_path = match &cli_args.config_path {
            Some(explicit) => Some(explicit.clone()),
            None => Self::discover_config_file_from(start_dir),
        };

        if let Some(path) = &config_path {
            let file_config = Self::load_config_file(path)?;
            config.apply_file(file_config);
            config.config_path = Some(path.clone());
            debug!(path = %path.display(), "Loaded config file");
        }

        config.apply_cli(cli_args);
        config.validate()?;
        Ok(config)
    }

    /// Search upward from `start_dir` for `.fixtest/config.toml`, stopping at
    /// the repository root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                return None;
            }

            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => return None,
            }
        }
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
            // Missing config file is OK; defaults apply
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TomlConfig::default()),
            Err(e) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    fn apply_file(&mut self, file_config: TomlConfig) {
        let source = ConfigSource::Config;

        if let Some(file_defaults) = file_config.defaults {
            if file_defaults.verbose.is_some() {
                self.defaults.verbose = file_defaults.verbose;
                self.attribute("verbose", source.clone());
            }
            if file_defaults.timeout_secs.is_some() {
                self.defaults.timeout_secs = file_defaults.timeout_secs;
                self.attribute("timeout_secs", source.clone());
            }
            if file_defaults.continue_on_failure.is_some() {
                self.defaults.continue_on_failure = file_defaults.continue_on_failure;
                self.attribute("continue_on_failure", source.clone());
            }
        }

        if let Some(file_selector) = file_config.selector {
            if !file_selector.roots.is_empty() {
                self.selector.roots = file_selector.roots;
                self.attribute("selector_roots", source.clone());
            }
            if !file_selector.exclude_files.is_empty() {
                self.selector.exclude_files = file_selector.exclude_files;
                self.attribute("selector_exclude_files", source.clone());
            }
        }

        if let Some(options) = file_config.program_options {
            self.program_options = options;
            self.attribute("program_options", source);
        }
    }

    fn apply_cli(&mut self, cli_args: &CliArgs) {
        if cli_args.verbose.is_some() {
            self.defaults.verbose = cli_args.verbose;
            self.attribute("verbose", ConfigSource::Cli);
        }
        if cli_args.timeout_secs.is_some() {
            self.defaults.timeout_secs = cli_args.timeout_secs;
            self.attribute("timeout_secs", ConfigSource::Cli);
        }
        if cli_args.continue_on_failure.is_some() {
            self.defaults.continue_on_failure = cli_args.continue_on_failure;
            self.attribute("continue_on_failure", ConfigSource::Cli);
        }
    }

    fn attribute(&mut self, key: &str, source: ConfigSource) {
        self.source_attribution.insert(key.to_string(), source);
    }
}
