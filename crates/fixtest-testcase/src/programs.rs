use fixtest_runner::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
use std::ffi::OsString;
use std::time::Duration;
use tracing::info;

use crate::logger::TestLogger;

/// A runnable process description bound to a test's logger.
#[derive(Debug, Clone)]
pub struct Process {
    logger: TestLogger,
    command: CommandSpec,
}

/// Build a [`Process`] from a logger and a full argument vector.
///
/// The first element of `argv` is the executable. An empty vector produces a
/// process with an empty program, which fails at spawn time.
pub fn make_process<I, S>(logger: &TestLogger, argv: I) -> Process
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let command = CommandSpec::from_argv(argv).unwrap_or_else(|| CommandSpec::new(""));
    Process {
        logger: logger.clone(),
        command,
    }
}

impl Process {
    #[must_use]
    pub fn logger(&self) -> &TestLogger {
        &self.logger
    }

    #[must_use]
    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    #[must_use]
    pub fn argv(&self) -> Vec<OsString> {
        self.command.argv()
    }

    /// Render the command line for humans. Arguments containing whitespace
    /// (or empty ones) are double-quoted.
    #[must_use]
    pub fn as_command(&self) -> String {
        self.command
            .argv()
            .iter()
            .map(|arg| {
                let arg = arg.to_string_lossy();
                if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                    format!("\"{arg}\"")
                } else {
                    arg.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion through `runner`, forwarding captured output to the logger.
    pub fn run(
        &self,
        runner: &dyn ProcessRunner,
        timeout: Duration,
    ) -> Result<ProcessOutput, RunnerError> {
        let _entered = self.logger.span().enter();
        info!(command = %self.as_command(), "Starting process");

        let output = runner.run(&self.command, timeout)?;

        for line in output.stdout_string().lines() {
            info!(stream = "stdout", "{line}");
        }
        for line in output.stderr_string().lines() {
            info!(stream = "stderr", "{line}");
        }
        info!(
            exit_code = ?output.exit_code,
            duration_ms = output.duration.as_millis() as u64,
            "Process finished"
        );

        Ok(output)
    }
}
