use globset::{GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::GlobError;
use crate::glob::PathGlob;

/// Selects fixture files for a suite run.
///
/// Every `roots` pattern is expanded, anything matching an `exclude_files`
/// pattern is dropped, and the remainder is returned sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSelector {
    #[serde(default)]
    pub roots: Vec<String>,
    #[serde(default)]
    pub exclude_files: Vec<String>,
}

impl FixtureSelector {
    #[must_use]
    pub fn new(roots: Vec<String>, exclude_files: Vec<String>) -> Self {
        Self {
            roots,
            exclude_files,
        }
    }

    /// Check that every root and exclusion pattern compiles.
    pub fn validate(&self) -> Result<(), GlobError> {
        for pattern in &self.roots {
            crate::glob::compile_pattern(pattern)?;
        }
        self.exclusions().map(|_| ())
    }

    /// Expand the roots through `glob` and apply the exclusions.
    pub fn select(&self, glob: &impl PathGlob) -> Result<Vec<PathBuf>, GlobError> {
        let exclusions = self.exclusions()?;

        let mut selected = BTreeSet::new();
        for pattern in &self.roots {
            for path in glob.glob(pattern)? {
                if is_excluded(&exclusions, &path) {
                    debug!(path = %path.display(), "Excluded fixture");
                    continue;
                }
                selected.insert(path);
            }
        }

        Ok(selected.into_iter().collect())
    }

    fn exclusions(&self) -> Result<GlobSet, GlobError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_files {
            let glob = globset::GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| GlobError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| GlobError::InvalidPattern {
            pattern: self.exclude_files.join(", "),
            reason: e.to_string(),
        })
    }
}

fn is_excluded(exclusions: &GlobSet, path: &Path) -> bool {
    let as_str = path.to_string_lossy().replace('\\', "/");
    exclusions.is_match(as_str.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeGlob(HashMap<&'static str, Vec<&'static str>>);

    impl PathGlob for FakeGlob {
        fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, GlobError> {
            Ok(self
                .0
                .get(pattern)
                .map(|paths| paths.iter().map(PathBuf::from).collect())
                .unwrap_or_default())
        }
    }

    #[test]
    fn test_select_merges_roots_sorted_and_deduplicated() {
        let glob = FakeGlob(HashMap::from([
            ("a/*.json", vec!["a/z.json", "a/b.json"]),
            ("a/**/*.json", vec!["a/b.json", "a/sub/c.json"]),
        ]));
        let selector = FixtureSelector::new(
            vec!["a/*.json".to_string(), "a/**/*.json".to_string()],
            Vec::new(),
        );

        let selected = selector.select(&glob).unwrap();
        assert_eq!(
            selected,
            vec![
                PathBuf::from("a/b.json"),
                PathBuf::from("a/sub/c.json"),
                PathBuf::from("a/z.json"),
            ]
        );
    }

    #[test]
    fn test_select_applies_exclusions() {
        let glob = FakeGlob(HashMap::from([(
            "tests/**/*.json",
            vec!["tests/rs/primary.json", "tests/rs/ghost.json"],
        )]));
        let selector = FixtureSelector::new(
            vec!["tests/**/*.json".to_string()],
            vec!["tests/**/ghost.json".to_string()],
        );

        assert_eq!(
            selector.select(&glob).unwrap(),
            vec![PathBuf::from("tests/rs/primary.json")]
        );
    }

    #[test]
    fn test_validate_rejects_bad_exclusion() {
        let selector = FixtureSelector::new(vec!["*.json".to_string()], vec!["[".to_string()]);
        assert!(matches!(
            selector.validate(),
            Err(GlobError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_empty_roots_select_nothing() {
        let glob = FakeGlob(HashMap::new());
        assert!(FixtureSelector::default().select(&glob).unwrap().is_empty());
    }
}
