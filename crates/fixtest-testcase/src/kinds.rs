use fixtest_selectors::{FsGlob, PathGlob};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::error::TestCaseError;
use crate::interface::ProcessTestCase;
use crate::logger::TestLogger;
use crate::options::ProgramOptions;
use crate::programs::Process;
use crate::sdam_json_test::JsonFixtureTestCase;

/// Registered test-case kinds, addressed by their registered name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    SdamJsonTest,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown test kind '{name}' (known: {known})")]
pub struct UnknownTestKind {
    pub name: String,
    pub known: String,
}

impl TestKind {
    #[must_use]
    pub const fn all() -> &'static [TestKind] {
        &[TestKind::SdamJsonTest]
    }

    #[must_use]
    pub const fn registered_name(self) -> &'static str {
        match self {
            Self::SdamJsonTest => JsonFixtureTestCase::REGISTERED_NAME,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::SdamJsonTest => JsonFixtureTestCase::TEST_KIND,
        }
    }

    #[must_use]
    pub fn from_registered_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.registered_name() == name)
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registered_name())
    }
}

impl FromStr for TestKind {
    type Err = UnknownTestKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_registered_name(s).ok_or_else(|| UnknownTestKind {
            name: s.to_string(),
            known: Self::all()
                .iter()
                .map(|kind| kind.registered_name())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// A constructed test case of any registered kind
#[derive(Debug, Clone)]
pub enum TestCase {
    SdamJson(JsonFixtureTestCase),
}

impl TestCase {
    /// Construct a case of `kind`, resolving executables relative to the working directory.
    pub fn build(
        kind: TestKind,
        logger: TestLogger,
        test_file: impl Into<PathBuf>,
        program_options: Option<&ProgramOptions>,
    ) -> Result<Self, TestCaseError> {
        Self::build_with_glob(kind, logger, test_file, program_options, &FsGlob::new())
    }

    pub fn build_with_glob(
        kind: TestKind,
        logger: TestLogger,
        test_file: impl Into<PathBuf>,
        program_options: Option<&ProgramOptions>,
        glob: &impl PathGlob,
    ) -> Result<Self, TestCaseError> {
        match kind {
            TestKind::SdamJsonTest => JsonFixtureTestCase::with_glob(
                logger,
                test_file,
                program_options,
                glob,
            )
            .map(Self::SdamJson),
        }
    }

    #[must_use]
    pub fn kind(&self) -> TestKind {
        match self {
            Self::SdamJson(_) => TestKind::SdamJsonTest,
        }
    }
}

impl ProcessTestCase for TestCase {
    fn test_kind(&self) -> &str {
        match self {
            Self::SdamJson(case) => case.test_kind(),
        }
    }

    fn test_name(&self) -> &str {
        match self {
            Self::SdamJson(case) => case.test_name(),
        }
    }

    fn logger(&self) -> &TestLogger {
        match self {
            Self::SdamJson(case) => case.logger(),
        }
    }

    fn make_process(&self) -> Process {
        match self {
            Self::SdamJson(case) => case.make_process(),
        }
    }
}
