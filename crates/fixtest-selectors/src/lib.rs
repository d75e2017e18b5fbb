//! Filesystem search for fixtest
//!
//! [`PathGlob`] is the search contract test cases resolve executables
//! through; [`FsGlob`] is the real filesystem implementation. [`FixtureSelector`]
//! turns configured root patterns and exclusions into the ordered list of
//! fixture files a suite runs.

pub mod error;
pub mod fixture;
pub mod glob;

pub use error::GlobError;
pub use fixture::FixtureSelector;
pub use glob::{FsGlob, PathGlob, compile_pattern};
