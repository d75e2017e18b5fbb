//! CLI argument definitions and parsing structures

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};
use fixtest_testcase::TestKind;
use std::path::PathBuf;

/// fixtest - run JSON-fixture conformance binaries as test cases
#[derive(Parser, Debug)]
#[command(name = "fixtest")]
#[command(about = "Runs JSON-fixture conformance test binaries as process-based test cases")]
#[command(long_about = r#"
fixtest locates a native conformance test binary in the build tree and runs
it once per JSON fixture file, reporting each fixture as a test case.

EXAMPLES:
  # Run every fixture selected by the configured roots
  fixtest run

  # Run two fixtures explicitly
  fixtest run src/mongo/client/sdam/json_tests/rs/primary.json \
              src/mongo/client/sdam/json_tests/single/standalone.json

  # Show the command line each fixture would run with
  fixtest list

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  Config file is discovered by searching upward from CWD for .fixtest/config.toml
  Use --config to specify an explicit config file path
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Change to this directory before doing anything else
    #[arg(short = 'C', long, global = true)]
    pub workdir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run fixtures through the conformance binary
    Run {
        /// Registered test kind
        #[arg(long, default_value_t = TestKind::SdamJsonTest, value_parser = test_kind_parser())]
        kind: TestKind,

        /// Per-test timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Keep running after a test fails
        #[arg(long)]
        continue_on_failure: bool,

        /// Write a JSON report to this path
        #[arg(long)]
        report_json: Option<PathBuf>,

        /// Fixture files (defaults to the configured selector)
        fixtures: Vec<PathBuf>,
    },

    /// Print the command line each selected fixture would run with
    List {
        /// Registered test kind
        #[arg(long, default_value_t = TestKind::SdamJsonTest, value_parser = test_kind_parser())]
        kind: TestKind,

        /// Fixture files (defaults to the configured selector)
        fixtures: Vec<PathBuf>,
    },

    /// List registered test kinds
    Kinds,
}

/// Accepts registered kind names only; `--help` lists them.
fn test_kind_parser() -> impl TypedValueParser<Value = TestKind> {
    PossibleValuesParser::new(TestKind::all().iter().map(|kind| kind.registered_name()))
        .try_map(|name| name.parse::<TestKind>())
}
