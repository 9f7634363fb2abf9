//! Subcommand implementations

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use triptych::{render_json, render_text, Config, LintContext, Linter, RuleSet};

use crate::cli::{CheckArgs, OutputFormat};

/// Configuration file picked up when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "triptych.json";

/// Run `triptych check`.
///
/// Exit code 0 when the run passes, 1 when findings reach the failure
/// threshold. Usage and IO errors propagate and exit 2.
pub fn check(args: CheckArgs) -> Result<ExitCode> {
    let mut config = load_config(args.config)?;
    if let Some(max) = args.max_line_length {
        config.max_line_length = max;
    }
    if let Some(fail_on) = args.fail_on {
        config.fail_on = fail_on;
    }
    config.validate(&RuleSet::default())?;
    let fail_on = config.fail_on;

    let mut linter = Linter::new(config);
    if args.no_parallel {
        linter = linter.with_context(LintContext::serial());
    }

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };
    let report = linter.check_paths(&paths)?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => render_text(&report, &mut stdout)?,
        OutputFormat::Json => render_json(&report, &mut stdout)?,
    }

    let summary = report.summary();
    info!(
        files = report.files.len(),
        findings = summary.total(),
        "check finished"
    );

    if report.is_pass(fail_on) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Run `triptych rules`: list registered rules with their defaults.
pub fn rules() -> Result<ExitCode> {
    let set = RuleSet::default();
    let mut stdout = std::io::stdout().lock();
    for rule in set.iter() {
        writeln!(
            stdout,
            "{:<20} {:<8} {}",
            rule.id(),
            rule.default_severity(),
            rule.description()
        )?;
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    match explicit {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            Ok(Config::load(path)?)
        }
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                debug!(path = DEFAULT_CONFIG_FILE, "loading configuration");
                Ok(Config::load(default)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}
