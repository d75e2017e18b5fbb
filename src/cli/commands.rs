//! CLI command implementations

use std::io::Write;
use std::path::{Path, PathBuf};

use fixtest_config::Config;
use fixtest_runner::NativeRunner;
use fixtest_selectors::FsGlob;
use fixtest_testcase::{ProcessTestCase, TestKind};
use tracing::info;

use crate::error::FixtestError;
use crate::exit_codes::ExitCode;
use crate::suite::{Suite, SuiteOptions, SuiteReport, TestStatus};

// ============================================================================
// Run Command
// ============================================================================

pub fn execute_run(
    config: &Config,
    kind: TestKind,
    fixtures: &[PathBuf],
    report_json: Option<&Path>,
) -> Result<ExitCode, FixtestError> {
    let suite = build_suite(config, kind, fixtures)?;
    info!(tests = suite.cases().len(), "Running suite");

    let report = suite.run(&NativeRunner::new())?;

    if let Some(path) = report_json {
        report.write_json(path)?;
    }
    print_summary(&report)?;

    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::TEST_FAILURE
    })
}

// ============================================================================
// List Command
// ============================================================================

pub fn execute_list(
    config: &Config,
    kind: TestKind,
    fixtures: &[PathBuf],
) -> Result<ExitCode, FixtestError> {
    let suite = build_suite(config, kind, fixtures)?;

    let mut out = std::io::stdout().lock();
    for case in suite.cases() {
        writeln!(out, "{}", case.test_name())?;
        writeln!(out, "    {}", case.as_command())?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Kinds Command
// ============================================================================

pub fn execute_kinds() -> Result<ExitCode, FixtestError> {
    let mut out = std::io::stdout().lock();
    for kind in TestKind::all() {
        writeln!(out, "{}\t{}", kind.registered_name(), kind.display_name())?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

fn build_suite(
    config: &Config,
    kind: TestKind,
    fixtures: &[PathBuf],
) -> Result<Suite, FixtestError> {
    let fixtures = select_fixtures(config, fixtures)?;

    let options = SuiteOptions {
        kind,
        timeout: config.timeout(),
        continue_on_failure: config.continue_on_failure(),
        program_options: config.program_options.clone(),
    };
    Ok(Suite::build(&fixtures, options, &FsGlob::new())?)
}

/// Explicit fixtures are used as given; otherwise the configured selector runs.
fn select_fixtures(config: &Config, explicit: &[PathBuf]) -> Result<Vec<PathBuf>, FixtestError> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    let selected = config.selector.select(&FsGlob::new())?;
    if selected.is_empty() {
        return Err(FixtestError::NoFixtures {
            roots: config.selector.roots.clone(),
        });
    }
    Ok(selected)
}

fn print_summary(report: &SuiteReport) -> Result<(), FixtestError> {
    let mut out = std::io::stdout().lock();
    for test in &report.tests {
        if test.status != TestStatus::Passed {
            let status = match test.status {
                TestStatus::Failed => "FAILED",
                TestStatus::Errored => "ERRORED",
                TestStatus::Skipped => "SKIPPED",
                TestStatus::Passed => "PASSED",
            };
            writeln!(out, "{status}: {}", test.test_name)?;
        }
    }
    writeln!(
        out,
        "{} passed, {} failed, {} errored, {} skipped ({} ms)",
        report.passed, report.failed, report.errored, report.skipped, report.duration_ms
    )?;
    Ok(())
}
