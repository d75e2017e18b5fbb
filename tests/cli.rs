//! Integration tests for the fixtest binary
//!
//! Each test builds a throwaway source tree (with a `.git` marker so config
//! discovery stops there) and runs the compiled binary against it with `-C`.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const FIXTURE_DIR: &str = "src/mongo/client/sdam/json_tests";

fn fixtest_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fixtest"));
    cmd.arg("-C").arg(workdir);
    cmd.env_remove("RUST_LOG");
    cmd.stdin(Stdio::null());
    cmd
}

fn source_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    temp
}

fn add_fixture(root: &Path, rel: &str) {
    let path = root.join(FIXTURE_DIR).join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "{}").unwrap();
}

#[cfg(unix)]
fn install_binary(root: &Path, variant: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let dir = root.join("build").join(variant).join("mongo/client/sdam");
    fs::create_dir_all(&dir).unwrap();
    let bin = dir.join("sdam_json_test");
    fs::write(&bin, format!("#!/bin/sh\n{script}\n")).unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn kinds_lists_registered_adapters() {
    let temp = source_tree();
    fixtest_cmd(temp.path())
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("sdam_json_test"))
        .stdout(predicate::str::contains("SDAM Json Test"));
}

#[test]
fn unknown_kind_is_a_usage_error() {
    let temp = source_tree();
    fixtest_cmd(temp.path())
        .args(["run", "--kind", "nope", "a.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"))
        .stderr(predicate::str::contains("sdam_json_test"));
}

#[test]
fn missing_binary_stops_execution() {
    let temp = source_tree();
    add_fixture(temp.path(), "rs/primary.json");

    fixtest_cmd(temp.path())
        .arg("run")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "There must be a single sdam_json_test binary in []",
        ));
}

#[test]
fn no_fixtures_is_a_usage_error() {
    let temp = source_tree();
    fixtest_cmd(temp.path())
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No fixture files matched"));
}

#[test]
fn invalid_config_is_reported() {
    let temp = source_tree();
    fs::create_dir(temp.path().join(".fixtest")).unwrap();
    fs::write(
        temp.path().join(".fixtest/config.toml"),
        "[defaults]\ntimeout_secs = 0\n",
    )
    .unwrap();

    fixtest_cmd(temp.path())
        .args(["run", "a.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout_secs"));
}

#[cfg(unix)]
#[test]
fn two_builds_stop_execution_naming_both() {
    let temp = source_tree();
    add_fixture(temp.path(), "rs/primary.json");
    install_binary(temp.path(), "opt", "exit 0");
    install_binary(temp.path(), "debug", "exit 0");

    fixtest_cmd(temp.path())
        .arg("run")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "'build/debug/mongo/client/sdam/sdam_json_test'",
        ))
        .stderr(predicate::str::contains(
            "'build/opt/mongo/client/sdam/sdam_json_test'",
        ));
}

#[cfg(unix)]
#[test]
fn passing_suite_writes_report() {
    let temp = source_tree();
    add_fixture(temp.path(), "rs/primary.json");
    add_fixture(temp.path(), "single/standalone.json");
    install_binary(
        temp.path(),
        "opt",
        r#"[ "$1" = "--source-dir" ] && [ "$3" = "-f" ] && [ -f "$2/rs/$4" -o -f "$2/single/$4" ]"#,
    );
    let report = temp.path().join("report.json");

    fixtest_cmd(temp.path())
        .arg("run")
        .arg("--report-json")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 passed, 0 failed"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["kind"], "sdam_json_test");
    assert_eq!(json["passed"], 2);
    assert_eq!(json["tests"][0]["status"], "passed");
    assert_eq!(json["tests"][0]["short_name"], "primary.json");
}

#[cfg(unix)]
#[test]
fn failing_test_exits_with_test_failure() {
    let temp = source_tree();
    add_fixture(temp.path(), "rs/primary.json");
    add_fixture(temp.path(), "rs/secondary.json");
    install_binary(temp.path(), "opt", r#"[ "$4" != "primary.json" ]"#);

    fixtest_cmd(temp.path())
        .arg("run")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED: src/mongo/client/sdam/json_tests/rs/primary.json"))
        .stdout(predicate::str::contains("0 passed, 1 failed, 0 errored, 1 skipped"));
}

#[cfg(unix)]
#[test]
fn continue_on_failure_runs_remaining_tests() {
    let temp = source_tree();
    add_fixture(temp.path(), "rs/primary.json");
    add_fixture(temp.path(), "rs/secondary.json");
    install_binary(temp.path(), "opt", r#"[ "$4" != "primary.json" ]"#);

    fixtest_cmd(temp.path())
        .args(["run", "--continue-on-failure"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 passed, 1 failed, 0 errored, 0 skipped"));
}

#[cfg(unix)]
#[test]
fn list_prints_command_lines() {
    let temp = source_tree();
    add_fixture(temp.path(), "rs/primary.json");
    install_binary(temp.path(), "opt", "exit 0");

    fixtest_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "build/opt/mongo/client/sdam/sdam_json_test --source-dir src/mongo/client/sdam/json_tests -f primary.json",
        ));
}
