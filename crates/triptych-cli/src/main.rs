#![forbid(unsafe_code)]

//! Triptych CLI
//!
//! Command-line interface for the triptych comment-convention linter.

mod cli;
mod commands;
mod repl;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Check(check) => commands::check(check),
        Command::Rules => commands::rules(),
        Command::Repl(repl) => repl::run(repl),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Initialize tracing once, to stderr so reports own stdout.
///
/// `RUST_LOG` wins when set; `--verbose` raises the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
