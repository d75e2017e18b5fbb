//! CLI entry point and dispatch logic
//!
//! `run()` parses arguments, discovers configuration, initializes logging,
//! dispatches to a command handler, and owns all error output.

use clap::Parser;

use super::args::{Cli, Commands};
use super::commands;

use crate::error::FixtestError;
use crate::exit_codes::ExitCode;
use crate::logging::init_tracing;
use fixtest_config::{CliArgs, Config};

/// Main CLI execution function.
///
/// Prints everything, including errors. On failure returns the exit code;
/// main.rs only calls `std::process::exit`.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.workdir
        && let Err(e) = std::env::set_current_dir(dir)
    {
        return Err(report(&FixtestError::WorkdirFailed {
            path: dir.clone(),
            reason: e.to_string(),
        }));
    }

    let (timeout_secs, continue_on_failure) = match &cli.command {
        Commands::Run {
            timeout,
            continue_on_failure,
            ..
        } => (*timeout, continue_on_failure.then_some(true)),
        _ => (None, None),
    };

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        verbose: cli.verbose.then_some(true),
        timeout_secs,
        continue_on_failure,
    };

    let config = Config::discover(&cli_args).map_err(|e| report(&e.into()))?;

    if let Err(err) = init_tracing(config.verbose()) {
        eprintln!("warning: failed to initialize logging: {err}");
    }

    let result = match cli.command {
        Commands::Run {
            kind,
            report_json,
            fixtures,
            ..
        } => commands::execute_run(&config, kind, &fixtures, report_json.as_deref()),
        Commands::List { kind, fixtures } => commands::execute_list(&config, kind, &fixtures),
        Commands::Kinds => commands::execute_kinds(),
    };

    match result {
        Ok(code) if code == ExitCode::SUCCESS => Ok(()),
        Ok(code) => Err(code),
        Err(err) => Err(report(&err)),
    }
}

fn report(err: &FixtestError) -> ExitCode {
    eprintln!("{}", err.display_for_user());
    err.to_exit_code()
}
