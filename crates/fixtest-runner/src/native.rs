use crate::error::RunnerError;
use std::process::Stdio;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::{CommandSpec, ProcessOutput, ProcessRunner};

// ============================================================================
// NativeRunner - Native Process Execution
// ============================================================================

/// Native process runner using `std::process::Command`.
///
/// Spawns the program directly (no shell), captures stdout and stderr, and
/// waits on a helper thread so the timeout can be enforced without exposing
/// async in the public API. On timeout the child is killed.
///
/// # Example
///
/// ```rust,no_run
/// use fixtest_runner::{CommandSpec, NativeRunner, ProcessRunner};
/// use std::time::Duration;
///
/// let runner = NativeRunner::new();
/// let cmd = CommandSpec::new("echo").arg("hello");
///
/// let output = runner.run(&cmd, Duration::from_secs(30)).unwrap();
/// assert!(output.success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// How long to wait for the killed process to be reaped before giving up on it.
const REAP_GRACE: Duration = Duration::from_secs(2);

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError> {
        let program = cmd.program.to_string_lossy().into_owned();

        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group, so a timeout kill reaches anything the child forked.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let started = Instant::now();
        let child = command.spawn().map_err(|e| RunnerError::SpawnFailed {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        let child_id = child.id();
        debug!(pid = child_id, program = %program, "Spawned process");

        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        match rx.recv_timeout(timeout) {
            Ok(output_result) => {
                let _ = handle.join();

                let output = output_result.map_err(|e| RunnerError::WaitFailed {
                    program,
                    reason: e.to_string(),
                })?;

                Ok(ProcessOutput::new(
                    output.stdout,
                    output.stderr,
                    output.status.code(),
                    false,
                )
                .with_duration(started.elapsed()))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(
                    pid = child_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "Process exceeded timeout, terminating"
                );
                Self::terminate_process(child_id);

                // A descendant that escaped the group can hold the output pipes
                // open; in that case the waiter thread is left behind.
                match rx.recv_timeout(REAP_GRACE) {
                    Ok(_) => {
                        let _ = handle.join();
                    }
                    Err(_) => {
                        warn!(pid = child_id, "Output pipes still open after kill, detaching waiter");
                    }
                }

                Err(RunnerError::Timeout { timeout })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::MonitorLost),
        }
    }
}

impl NativeRunner {
    /// Terminate a process and, on Unix, its whole process group.
    ///
    /// On Unix, sends SIGKILL to the group led by `pid`.
    /// On Windows, uses TerminateProcess.
    fn terminate_process(pid: u32) {
        #[cfg(unix)]
        {
            unsafe {
                libc::killpg(pid as libc::pid_t, libc::SIGKILL);
            }
        }

        #[cfg(windows)]
        {
            use windows::Win32::Foundation::CloseHandle;
            use windows::Win32::System::Threading::{
                OpenProcess, PROCESS_TERMINATE, TerminateProcess,
            };

            unsafe {
                if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
                    let _ = TerminateProcess(handle, 1);
                    let _ = CloseHandle(handle);
                }
            }
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = pid;
        }
    }
}
