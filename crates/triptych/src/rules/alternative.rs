//! The alternative-setting rule
//!
//! A commented-out assignment is an alternative setting: a variant kept
//! beside the live value for reference. It only earns its keep next to a
//! live assignment of the same key; anywhere else it is dead weight that
//! drifts out of date.

use crate::config::Config;
use crate::report::Diagnostic;
use crate::source::{LineKind, SourceFile, SourceLocation};

use super::{Rule, RuleId};

/// Rule id for the alternative-setting convention.
pub const ID: RuleId = RuleId("alternative-setting");

/// Checks that alternative settings sit beside their live assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alternative;

impl Rule for Alternative {
    fn id(&self) -> RuleId {
        ID
    }

    fn description(&self) -> &'static str {
        "commented-out assignments sit beside a live assignment of the same key"
    }

    fn check(&self, file: &SourceFile, _config: &Config) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for line in &file.lines {
            let alt = match &line.kind {
                LineKind::Comment(c) => match &c.commented_code {
                    Some(alt) => alt,
                    None => continue,
                },
                _ => continue,
            };

            if has_live_partner(file, line.number, &alt.key) {
                continue;
            }

            diagnostics.push(
                Diagnostic::new(
                    ID,
                    self.default_severity(),
                    format!(
                        "alternative setting `{}` has no adjacent live `{}` assignment",
                        alt.key, alt.key
                    ),
                )
                .with_location(SourceLocation::new(
                    &file.name,
                    line.number,
                    line.indent_column(),
                ))
                .with_snippet(line.raw.trim()),
            );
        }

        diagnostics
    }
}

/// Walk outward from the alternative in both directions, skipping over
/// other alternatives, and look for a live assignment of the same key.
///
/// Stacked alternatives above one live value all pass; a prose comment or
/// a blank line between an alternative and the live value breaks
/// adjacency.
fn has_live_partner(file: &SourceFile, number: usize, key: &str) -> bool {
    neighbor_assigns(file, number, key, |n| n.checked_sub(1))
        || neighbor_assigns(file, number, key, |n| n.checked_add(1))
}

fn neighbor_assigns(
    file: &SourceFile,
    start: usize,
    key: &str,
    step: impl Fn(usize) -> Option<usize>,
) -> bool {
    let mut number = start;
    loop {
        number = match step(number) {
            Some(n) => n,
            None => return false,
        };
        let line = match file.line(number) {
            Some(line) => line,
            None => return false,
        };
        match &line.kind {
            // Skip over further alternatives; a run of variants may share
            // one live value.
            LineKind::Comment(c) if c.commented_code.is_some() => continue,
            LineKind::Code(c) => {
                return c.assignment.as_ref().is_some_and(|a| a.key == key);
            }
            _ => return false,
        }
    }
}
