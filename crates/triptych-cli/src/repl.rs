//! Interactive snippet checking
//!
//! The REPL accumulates a snippet line by line; `:check` lints what has
//! been entered and clears the buffer. Colon commands follow the usual
//! REPL convention.

use anyhow::{anyhow, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;

use triptych::{CommentSyntax, Config, Linter, SyntaxRegistry};

use crate::cli::ReplArgs;

/// A colon command and its one-line description.
struct ReplCommand {
    name: &'static str,
    description: &'static str,
}

const COMMANDS: &[ReplCommand] = &[
    ReplCommand {
        name: "check",
        description: "lint the entered snippet and clear it",
    },
    ReplCommand {
        name: "clear",
        description: "discard the entered snippet",
    },
    ReplCommand {
        name: "syntax <name>",
        description: "switch the comment syntax",
    },
    ReplCommand {
        name: "rules",
        description: "list the registered rules",
    },
    ReplCommand {
        name: "help",
        description: "show this help",
    },
    ReplCommand {
        name: "quit",
        description: "leave the repl",
    },
];

/// Run `triptych repl`.
pub fn run(args: ReplArgs) -> Result<ExitCode> {
    let registry = SyntaxRegistry::default();
    let mut syntax = registry
        .by_name(&args.syntax)
        .ok_or_else(|| unknown_syntax(&registry, &args.syntax))?;

    let linter = Linter::new(Config::default());
    let mut editor = DefaultEditor::new()?;
    let mut buffer = String::new();

    println!(
        "triptych {} ({} syntax) - :help for commands, :check to lint",
        triptych::VERSION,
        syntax.name()
    );

    loop {
        let prompt = if buffer.is_empty() {
            "triptych> "
        } else {
            "     ...> "
        };

        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let Some(command) = line.trim().strip_prefix(':') else {
            buffer.push_str(&line);
            buffer.push('\n');
            continue;
        };

        editor.add_history_entry(&line)?;
        match command.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["check"] => {
                check_buffer(&linter, syntax.as_ref(), &buffer);
                buffer.clear();
            }
            ["clear"] => buffer.clear(),
            ["syntax", name] => match registry.by_name(name) {
                Some(next) => {
                    syntax = next;
                    println!("switched to {} syntax", syntax.name());
                }
                None => eprintln!("{}", unknown_syntax(&registry, name)),
            },
            ["rules"] => {
                for rule in linter.rules().iter() {
                    println!("{:<20} {}", rule.id(), rule.description());
                }
            }
            ["help"] => {
                for cmd in COMMANDS {
                    println!(":{:<14} {}", cmd.name, cmd.description);
                }
            }
            ["quit"] | ["q"] => break,
            other => eprintln!("unknown command :{} (try :help)", other.join(" ")),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn check_buffer(linter: &Linter, syntax: &dyn CommentSyntax, buffer: &str) {
    if buffer.trim().is_empty() {
        println!("nothing to check");
        return;
    }
    let report = linter.check_source("<repl>", buffer, syntax);
    if report.is_clean() {
        println!("clean");
        return;
    }
    for diag in &report.diagnostics {
        println!("{diag}");
    }
    println!("{} finding(s)", report.diagnostics.len());
}

fn unknown_syntax(registry: &SyntaxRegistry, name: &str) -> anyhow::Error {
    anyhow!(
        "unknown syntax `{}`; available: {}",
        name,
        registry.names().join(", ")
    )
}
