//! Process-based test cases
//!
//! A test case here is a thin adapter: it knows which native binary to run
//! and how to build its command line for one fixture file. Spawning,
//! output capture and timeouts belong to [`fixtest_runner`].
//!
//! Construction resolves everything a case needs up front, so an invalid
//! build tree surfaces as a fatal [`TestCaseError::StopExecution`] before any
//! test runs.

pub mod error;
pub mod interface;
pub mod kinds;
pub mod logger;
pub mod options;
pub mod programs;

pub use error::{Severity, TestCaseError};
pub use interface::{ProcessTestCase, TestOutcome};
pub use kinds::{TestCase, TestKind, UnknownTestKind};
pub use logger::TestLogger;
pub use options::ProgramOptions;
pub use programs::{Process, make_process};
pub use sdam_json_test::JsonFixtureTestCase;
