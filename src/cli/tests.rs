use clap::Parser;
use std::path::PathBuf;

use fixtest_testcase::TestKind;

use super::args::{Cli, Commands};

#[test]
fn test_run_defaults() {
    let cli = Cli::try_parse_from(["fixtest", "run"]).unwrap();
    match cli.command {
        Commands::Run {
            kind,
            timeout,
            continue_on_failure,
            report_json,
            fixtures,
        } => {
            assert_eq!(kind, TestKind::SdamJsonTest);
            assert_eq!(timeout, None);
            assert!(!continue_on_failure);
            assert!(report_json.is_none());
            assert!(fixtures.is_empty());
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn test_run_with_fixtures_and_flags() {
    let cli = Cli::try_parse_from([
        "fixtest",
        "-C",
        "/repo",
        "run",
        "--timeout",
        "30",
        "--continue-on-failure",
        "--report-json",
        "out.json",
        "a.json",
        "b.json",
    ])
    .unwrap();

    assert_eq!(cli.workdir, Some(PathBuf::from("/repo")));
    match cli.command {
        Commands::Run {
            timeout,
            continue_on_failure,
            report_json,
            fixtures,
            ..
        } => {
            assert_eq!(timeout, Some(30));
            assert!(continue_on_failure);
            assert_eq!(report_json, Some(PathBuf::from("out.json")));
            assert_eq!(fixtures, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["fixtest", "list", "--verbose", "--config", "c.toml"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    assert!(matches!(cli.command, Commands::List { .. }));
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["fixtest"]).is_err());
}

#[test]
fn test_kind_is_validated_by_the_parser() {
    let cli = Cli::try_parse_from(["fixtest", "list", "--kind", "sdam_json_test"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::List {
            kind: TestKind::SdamJsonTest,
            ..
        }
    ));

    let err = Cli::try_parse_from(["fixtest", "run", "--kind", "nope"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn test_help_lists_registered_kinds() {
    use clap::CommandFactory;

    let mut cmd = Cli::command();
    let run = cmd.find_subcommand_mut("run").unwrap();
    let help = run.render_help().to_string();
    assert!(help.contains("sdam_json_test"));
}
