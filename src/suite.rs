//! Suite execution
//!
//! Builds one test case per fixture, then runs them in order. Construction
//! happens for every case before anything runs, so a fatal discovery error
//! aborts the run with nothing executed.

use chrono::{DateTime, Utc};
use fixtest_runner::ProcessRunner;
use fixtest_selectors::PathGlob;
use fixtest_testcase::{
    ProcessTestCase, ProgramOptions, TestCase, TestCaseError, TestKind, TestLogger,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::error::FixtestError;

#[derive(Debug, Clone)]
pub struct SuiteOptions {
    pub kind: TestKind,
    pub timeout: Duration,
    pub continue_on_failure: bool,
    pub program_options: ProgramOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    /// The binary ran and reported failure
    Failed,
    /// The binary could not be run to completion (spawn failure, timeout)
    Errored,
    /// Not run because an earlier test failed
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_name: String,
    pub short_name: String,
    pub status: TestStatus,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub kind: TestKind,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
    pub tests: Vec<TestRecord>,
}

impl SuiteReport {
    #[must_use]
    pub fn success(&self) -> bool {
        self.failed == 0 && self.errored == 0 && self.skipped == 0
    }

    pub fn write_json(&self, path: &Path) -> Result<(), FixtestError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            FixtestError::ReportWriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        std::fs::write(path, json).map_err(|e| FixtestError::ReportWriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// A fully constructed suite, ready to run
#[derive(Debug)]
pub struct Suite {
    cases: Vec<TestCase>,
    options: SuiteOptions,
}

impl Suite {
    /// Construct one case per fixture. The first fatal error aborts.
    pub fn build(
        fixtures: &[PathBuf],
        options: SuiteOptions,
        glob: &impl PathGlob,
    ) -> Result<Self, TestCaseError> {
        let cases = fixtures
            .iter()
            .map(|fixture| {
                let logger = TestLogger::new(fixture.to_string_lossy());
                TestCase::build_with_glob(
                    options.kind,
                    logger,
                    fixture,
                    Some(&options.program_options),
                    glob,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { cases, options })
    }

    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Run every case in order.
    ///
    /// Returns `Err` only for a fatal error; ordinary failures are recorded in
    /// the report.
    pub fn run(&self, runner: &dyn ProcessRunner) -> Result<SuiteReport, TestCaseError> {
        let started_at = Utc::now();
        let suite_started = Instant::now();
        let mut tests = Vec::with_capacity(self.cases.len());
        let mut stopped = false;

        for case in &self.cases {
            let command = case.as_command();
            if stopped {
                tests.push(record(case, TestStatus::Skipped, None, Duration::ZERO, command, None));
                continue;
            }

            let case_started = Instant::now();
            let entry = match case.run_test(runner, self.options.timeout) {
                Ok(outcome) => {
                    info!(test = %case.short_name(), "Passed");
                    record(case, TestStatus::Passed, outcome.exit_code, outcome.duration, command, None)
                }
                Err(err) if err.is_fatal() => {
                    error!(test = %case.short_name(), error = %err, "Aborting run");
                    return Err(err);
                }
                Err(err) => {
                    let (status, exit_code) = match &err {
                        TestCaseError::TestFailure { exit_code, .. } => {
                            (TestStatus::Failed, *exit_code)
                        }
                        _ => (TestStatus::Errored, None),
                    };
                    warn!(test = %case.short_name(), error = %err, "Test did not pass");
                    record(
                        case,
                        status,
                        exit_code,
                        case_started.elapsed(),
                        command,
                        Some(err.to_string()),
                    )
                }
            };

            if entry.status != TestStatus::Passed && !self.options.continue_on_failure {
                stopped = true;
            }
            tests.push(entry);
        }

        let count = |status: TestStatus| tests.iter().filter(|t| t.status == status).count();
        let report = SuiteReport {
            kind: self.options.kind,
            started_at,
            duration_ms: suite_started.elapsed().as_millis() as u64,
            passed: count(TestStatus::Passed),
            failed: count(TestStatus::Failed),
            errored: count(TestStatus::Errored),
            skipped: count(TestStatus::Skipped),
            tests,
        };

        info!(
            passed = report.passed,
            failed = report.failed,
            errored = report.errored,
            skipped = report.skipped,
            "Suite finished"
        );
        Ok(report)
    }
}

fn record(
    case: &TestCase,
    status: TestStatus,
    exit_code: Option<i32>,
    duration: Duration,
    command: String,
    message: Option<String>,
) -> TestRecord {
    TestRecord {
        test_name: case.test_name().to_string(),
        short_name: case.short_name(),
        status,
        exit_code,
        duration_ms: duration.as_millis() as u64,
        command,
        message,
    }
}
