use fixtest_selectors::{GlobError, PathGlob};
use fixtest_testcase::{JsonFixtureTestCase, TestLogger};
use proptest::prelude::*;
use std::ffi::OsString;
use std::path::PathBuf;

struct TwoPhaseGlob {
    suffixed: Vec<PathBuf>,
    bare: Vec<PathBuf>,
}

impl PathGlob for TwoPhaseGlob {
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, GlobError> {
        if pattern.ends_with(JsonFixtureTestCase::EXECUTABLE_SUFFIX) {
            Ok(self.suffixed.clone())
        } else {
            Ok(self.bare.clone())
        }
    }
}

fn paths(prefix: &str, n: usize) -> Vec<PathBuf> {
    (0..n)
        .map(|i| PathBuf::from(format!("/build/{prefix}{i}/sdam_json_test")))
        .collect()
}

proptest! {
    /// Resolution succeeds iff the first non-empty phase has exactly one match.
    #[test]
    fn prop_exactly_one_match(suffixed in 0usize..4, bare in 0usize..4) {
        let glob = TwoPhaseGlob {
            suffixed: paths("s", suffixed),
            bare: paths("b", bare),
        };

        let effective = if suffixed > 0 { suffixed } else { bare };
        let result = JsonFixtureTestCase::find_executable(&glob);

        if effective == 1 {
            let expected = if suffixed == 1 { &glob.suffixed[0] } else { &glob.bare[0] };
            prop_assert_eq!(result.unwrap(), expected.clone());
        } else {
            let err = result.unwrap_err();
            prop_assert!(err.is_fatal());
        }
    }

    /// Only the fixture's basename reaches the binary.
    #[test]
    fn prop_command_line_uses_basename(
        dirs in proptest::collection::vec("[a-z_]{1,8}", 0..5),
        stem in "[a-zA-Z0-9_-]{1,12}",
    ) {
        let mut fixture = PathBuf::new();
        for dir in &dirs {
            fixture.push(dir);
        }
        fixture.push(format!("{stem}.json"));

        let glob = TwoPhaseGlob { suffixed: Vec::new(), bare: paths("x", 1) };
        let case = JsonFixtureTestCase::with_glob(TestLogger::new("p"), &fixture, None, &glob).unwrap();

        let expected = vec![
            OsString::from("/build/x0/sdam_json_test"),
            OsString::from("--source-dir"),
            OsString::from(JsonFixtureTestCase::TEST_DIR),
            OsString::from("-f"),
            OsString::from(format!("{stem}.json")),
        ];
        prop_assert_eq!(case.command_line(), expected);
    }
}
