//! The line-length rule
//!
//! Long lines push comments out of view. Width is counted in characters,
//! not bytes; tabs count as one.

use crate::config::Config;
use crate::report::Diagnostic;
use crate::source::{SourceFile, SourceLocation};

use super::{Rule, RuleId};

/// Rule id for the line-length convention.
pub const ID: RuleId = RuleId("line-length");

/// Checks that no line exceeds the configured maximum width.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineLength;

impl Rule for LineLength {
    fn id(&self) -> RuleId {
        ID
    }

    fn description(&self) -> &'static str {
        "lines stay within the configured maximum width"
    }

    fn check(&self, file: &SourceFile, config: &Config) -> Vec<Diagnostic> {
        let max = config.max_line_length;
        let mut diagnostics = Vec::new();

        for line in &file.lines {
            let width = line.width();
            if width <= max {
                continue;
            }
            diagnostics.push(
                Diagnostic::new(
                    ID,
                    self.default_severity(),
                    format!("line is {width} characters long (limit {max})"),
                )
                .with_location(SourceLocation::new(&file.name, line.number, max + 1)),
            );
        }

        diagnostics
    }
}
