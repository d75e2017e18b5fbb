use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

// ============================================================================
// CommandSpec - Argv-only Process Description
// ============================================================================

/// Specification for a command to execute.
///
/// All process execution goes through this type to ensure argv-style invocation.
/// The program and each argument are discrete `OsString` elements; nothing is
/// ever handed to a shell.
///
/// # Example
///
/// ```rust
/// use fixtest_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("build/sdam_json_test")
///     .arg("--source-dir")
///     .arg("src/mongo/client/sdam/json_tests")
///     .args(["-f", "standalone.json"]);
///
/// assert_eq!(cmd.program, OsString::from("build/sdam_json_test"));
/// assert_eq!(cmd.args.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
    /// Optional working directory
    pub cwd: Option<PathBuf>,
    /// Optional environment overrides
    pub env: Option<HashMap<OsString, OsString>>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` with the given program.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: None,
        }
    }

    /// Build a `CommandSpec` from a full argument vector.
    ///
    /// The first element is the program, the rest are its arguments.
    /// Returns `None` for an empty vector.
    ///
    /// ```rust
    /// use fixtest_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::from_argv(["echo", "hello"]).unwrap();
    /// assert_eq!(cmd.args.len(), 1);
    /// assert!(CommandSpec::from_argv(Vec::<String>::new()).is_none());
    /// ```
    #[must_use]
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(Self::new(program).args(iter))
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set an environment variable for the command.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// The full argument vector: program first, then arguments.
    #[must_use]
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Convert this `CommandSpec` into a `std::process::Command`.
    ///
    /// The resulting `Command` uses argv-style argument passing.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        if let Some(ref env) = self.env {
            for (key, value) in env {
                cmd.env(key, value);
            }
        }

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_new() {
        let cmd = CommandSpec::new("sdam_json_test");
        assert_eq!(cmd.program, OsString::from("sdam_json_test"));
        assert!(cmd.args.is_empty());
        assert!(cmd.cwd.is_none());
        assert!(cmd.env.is_none());
    }

    #[test]
    fn test_command_spec_from_argv() {
        let cmd = CommandSpec::from_argv(["/build/sdam_json_test", "-f", "a.json"]).unwrap();
        assert_eq!(cmd.program, OsString::from("/build/sdam_json_test"));
        assert_eq!(cmd.args, vec![OsString::from("-f"), OsString::from("a.json")]);
    }

    #[test]
    fn test_command_spec_argv_round_trips_program_first() {
        let cmd = CommandSpec::new("prog").args(["--source-dir", "dir"]);
        assert_eq!(
            cmd.argv(),
            vec![
                OsString::from("prog"),
                OsString::from("--source-dir"),
                OsString::from("dir"),
            ]
        );
    }

    #[test]
    fn test_command_spec_builder_chain() {
        let cmd = CommandSpec::new("prog")
            .arg("--verbose")
            .args(["-f", "x.json"])
            .cwd("/workspace")
            .env("DEBUG", "1")
            .env("VERBOSE", "true");

        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/workspace")));
        let env = cmd.env.as_ref().unwrap();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get(&OsString::from("DEBUG")), Some(&OsString::from("1")));
    }

    #[test]
    fn test_command_spec_shell_metacharacters_preserved() {
        let cmd = CommandSpec::new("echo")
            .arg("$(whoami)")
            .arg("`id`")
            .arg("a;b|c&d");

        assert_eq!(cmd.args[0], OsString::from("$(whoami)"));
        assert_eq!(cmd.args[1], OsString::from("`id`"));
        assert_eq!(cmd.args[2], OsString::from("a;b|c&d"));
    }
}
