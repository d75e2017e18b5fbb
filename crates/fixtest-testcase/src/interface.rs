use fixtest_runner::ProcessRunner;
use std::path::Path;
use std::time::Duration;

use crate::error::TestCaseError;
use crate::logger::TestLogger;
use crate::programs::Process;

/// Result of a test case whose process exited successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub test_name: String,
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

/// A test case executed as a single native process.
///
/// Implementors supply identity and [`make_process`](Self::make_process);
/// running, exit-code checking and command rendering are shared.
pub trait ProcessTestCase {
    /// Human-readable category label, e.g. `"SDAM Json Test"`.
    fn test_kind(&self) -> &str;

    /// The case's defining argument, usually a fixture path.
    fn test_name(&self) -> &str;

    fn logger(&self) -> &TestLogger;

    /// Build the runnable process description from the case's current state.
    fn make_process(&self) -> Process;

    /// Basename of [`test_name`](Self::test_name).
    fn short_name(&self) -> String {
        Path::new(self.test_name())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.test_name().to_string())
    }

    fn as_command(&self) -> String {
        self.make_process().as_command()
    }

    /// Run the process. A non-zero exit becomes [`TestCaseError::TestFailure`];
    /// runner errors pass through unchanged as [`TestCaseError::Process`].
    fn run_test(
        &self,
        runner: &dyn ProcessRunner,
        timeout: Duration,
    ) -> Result<TestOutcome, TestCaseError> {
        let process = self.make_process();
        let output = process.run(runner, timeout)?;

        if output.success() {
            return Ok(TestOutcome {
                test_name: self.test_name().to_string(),
                exit_code: output.exit_code,
                duration: output.duration,
            });
        }

        let reason = match output.exit_code {
            Some(code) => format!("{} exited with code {code}", self.short_name()),
            None => format!("{} was terminated by a signal", self.short_name()),
        };
        Err(TestCaseError::TestFailure {
            test_name: self.test_name().to_string(),
            reason,
            exit_code: output.exit_code,
        })
    }
}
