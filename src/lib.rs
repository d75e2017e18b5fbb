//! fixtest - run JSON-fixture conformance binaries as test cases
//!
//! The heavy lifting lives in the workspace crates:
//!
//! - [`fixtest_testcase`]: test-case adapters and the [`ProcessTestCase`] contract
//! - [`fixtest_runner`]: argv-only process execution with timeouts
//! - [`fixtest_selectors`]: glob expansion and fixture selection
//! - [`fixtest_config`]: configuration discovery
//!
//! This crate adds the CLI, logging setup, error reporting, and the suite
//! executor that ties them together.

pub mod cli;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod suite;

pub use error::{ErrorCategory, FixtestError, UserFriendlyError};
pub use exit_codes::ExitCode;
pub use suite::{Suite, SuiteOptions, SuiteReport, TestRecord, TestStatus};

pub use fixtest_config::{CliArgs, Config};
pub use fixtest_runner::{CommandSpec, NativeRunner, ProcessOutput, ProcessRunner, RunnerError};
pub use fixtest_selectors::{FixtureSelector, FsGlob, PathGlob};
pub use fixtest_testcase::{
    JsonFixtureTestCase, ProcessTestCase, ProgramOptions, TestCase, TestCaseError, TestKind,
    TestLogger,
};
