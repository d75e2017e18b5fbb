//! Process execution for fixture test binaries
//!
//! This crate is the process-runner collaborator used by test cases. It turns
//! a [`CommandSpec`] into a child process, captures its output, and enforces a
//! timeout. It does not interpret exit codes; that is the caller's concern.
//!
//! # Security Model
//!
//! All process execution goes through [`CommandSpec`] to ensure argv-style invocation.
//! Arguments are passed as discrete elements rather than shell strings.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};
