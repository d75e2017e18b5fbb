use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::error::GlobError;

/// A glob-capable path resolver.
///
/// Given a `/`-separated pattern, returns the matching paths in a stable,
/// sorted order with duplicates removed. Supports `*`, `?`, `[...]`, `{a,b}`
/// and `**` (zero or more directories).
pub trait PathGlob {
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, GlobError>;
}

impl<T: PathGlob + ?Sized> PathGlob for &T {
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, GlobError> {
        (**self).glob(pattern)
    }
}

/// Compile a pattern with separator-aware semantics (`*` never crosses `/`).
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher, GlobError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| GlobError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// Filesystem-backed [`PathGlob`].
///
/// Only the literal directory prefix of a pattern is walked, so
/// `build/**/sdam_json_test` never looks outside `build/`. Relative patterns
/// resolve against `root` when one is set; otherwise against the working
/// directory, and the returned paths stay relative, shaped like the pattern.
/// Symlinked directories are not descended into, so every match is reported
/// under its real directory.
#[derive(Debug, Clone, Default)]
pub struct FsGlob {
    root: Option<PathBuf>,
}

impl FsGlob {
    /// Resolve relative patterns against the process working directory.
    #[must_use]
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolve relative patterns against `root`; results are joined onto it.
    #[must_use]
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn to_output(&self, rel: &Path) -> PathBuf {
        match &self.root {
            Some(root) => root.join(rel),
            None => rel.to_path_buf(),
        }
    }

    fn walk(&self, dir: &Path, rel: &Path, matcher: &GlobMatcher, out: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                trace!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                return;
            }
        };

        for entry in entries.flatten() {
            let rel_path = rel.join(entry.file_name());

            if matcher.is_match(normalize(&rel_path)) {
                out.push(self.to_output(&rel_path));
            }

            // `file_type` does not follow links: symlinked directories are
            // matched by name but never descended into.
            if entry.file_type().is_ok_and(|ft| ft.is_dir()) {
                self.walk(&entry.path(), &rel_path, matcher, out);
            }
        }
    }
}

impl PathGlob for FsGlob {
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, GlobError> {
        let matcher = compile_pattern(pattern)?;

        let mut out = Vec::new();
        match literal_prefix(pattern) {
            Prefix::Literal(rel) => {
                let on_disk = self.to_output(&rel);
                if fs::symlink_metadata(&on_disk).is_ok() {
                    out.push(on_disk);
                }
            }
            Prefix::Dir(rel) => {
                let start = if rel.as_os_str().is_empty() {
                    self.root.clone().unwrap_or_else(|| PathBuf::from("."))
                } else {
                    self.to_output(&rel)
                };
                if start.is_dir() {
                    self.walk(&start, &rel, &matcher, &mut out);
                }
            }
        }

        out.sort();
        out.dedup();
        trace!(pattern, matches = out.len(), "Expanded glob");
        Ok(out)
    }
}

enum Prefix {
    /// Pattern contains no metacharacters at all
    Literal(PathBuf),
    /// Directory components before the first component with a metacharacter
    Dir(PathBuf),
}

fn has_meta(component: &str) -> bool {
    component.contains(['*', '?', '[', ']', '{', '}'])
}

fn literal_prefix(pattern: &str) -> Prefix {
    if !has_meta(pattern) {
        return Prefix::Literal(PathBuf::from(pattern));
    }

    let mut prefix = PathBuf::new();
    for (idx, component) in pattern.split('/').enumerate() {
        if has_meta(component) {
            break;
        }
        if idx == 0 && component.is_empty() {
            prefix.push("/");
        } else if !component.is_empty() {
            prefix.push(component);
        }
    }
    Prefix::Dir(prefix)
}

fn normalize(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.contains('\\') {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}
