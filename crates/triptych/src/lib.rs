//! # Triptych
//!
//! A comment-convention linter.
//!
//! Triptych checks source files against a small set of commenting
//! conventions: multi-line code blocks are introduced by a three-part
//! What/Does/Why block comment, simple scalar assignments carry trailing
//! inline comments, commented-out alternatives sit beside their live
//! values, and lines stay within a width limit.
//!
//! ## Architecture
//!
//! - **Comment Syntax**: split source lines into code and comment parts
//! - **Scanner**: tag lines by kind and segment them into blocks
//! - **Rules**: walk the tagged file, one convention per rule
//! - **Report**: aggregate diagnostics and render them as text or JSON
//!
//! Nix is the primary syntax; shell scripts are covered behind the
//! default-on `shell` feature.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod report;
pub mod rules;
pub mod scan;
pub mod source;
pub mod syntax;

// Re-export main types
pub use config::{Config, RuleOverride};
pub use context::LintContext;
pub use engine::Linter;
pub use error::{ConfigError, LintError, Result};
pub use report::{
    render_json, render_text, Diagnostic, FileReport, RunReport, Severity, Skipped, Summary,
};
pub use rules::{Rule, RuleId, RuleSet};
pub use scan::Scanner;
pub use source::{Assignment, Block, BlockKind, LineKind, SourceFile, SourceLine, SourceLocation};
pub use syntax::{CommentSyntax, LineState, SplitLine, SyntaxRegistry};

/// Triptych version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
