//! Exit code constants for fixtest.
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Every selected test passed |
//! | 1 | `TEST_FAILURE` | At least one test failed or errored |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `STOP_EXECUTION` | Run aborted: the build or environment is unusable |
//! | 70 | `INTERNAL` | Unexpected internal failure |

/// Process exit code.
///
/// Use the named constants, or [`as_i32()`](Self::as_i32) to get the numeric
/// value for `std::process::exit()`.
///
/// ```rust
/// use fixtest::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::STOP_EXECUTION, ExitCode::from_i32(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// One or more tests failed or errored
    pub const TEST_FAILURE: ExitCode = ExitCode(1);

    /// Invalid or missing command-line arguments or configuration
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Fatal discovery error; nothing meaningful could run
    pub const STOP_EXECUTION: ExitCode = ExitCode(3);

    pub const INTERNAL: ExitCode = ExitCode(70);

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
