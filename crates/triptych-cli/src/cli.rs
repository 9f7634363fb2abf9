//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use triptych::Severity;

/// Triptych - a comment-convention linter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check files or directory trees against the commenting conventions
    Check(CheckArgs),

    /// List the registered rules
    Rules,

    /// Check snippets interactively
    Repl(ReplArgs),
}

/// Arguments for `triptych check`.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (defaults to the current directory)
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./triptych.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the maximum line width
    #[arg(long)]
    pub max_line_length: Option<usize>,

    /// Lowest severity that fails the run (info|warning|error)
    #[arg(long)]
    pub fail_on: Option<Severity>,

    /// Lint files one at a time
    #[arg(long)]
    pub no_parallel: bool,
}

/// Arguments for `triptych repl`.
#[derive(clap::Args, Debug)]
pub struct ReplArgs {
    /// Comment syntax to check snippets under
    #[arg(long, default_value = "nix")]
    pub syntax: String,
}

/// Report output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,

    /// Machine-readable JSON
    Json,
}
