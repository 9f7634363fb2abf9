//! The inline-comment rule
//!
//! A simple scalar assignment carries a trailing inline comment explaining
//! its immediate effect. A scalar flanked by an alternative setting for the
//! same key is already annotated: the retained alternative documents the
//! choice.

use crate::config::Config;
use crate::report::Diagnostic;
use crate::source::{LineKind, SourceFile, SourceLocation};

use super::{Rule, RuleId};

/// Rule id for the inline-comment convention.
pub const ID: RuleId = RuleId("inline-comment");

/// Checks that simple scalar assignments carry inline comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineComment;

impl Rule for InlineComment {
    fn id(&self) -> RuleId {
        ID
    }

    fn description(&self) -> &'static str {
        "simple scalar assignments carry a trailing inline comment"
    }

    fn check(&self, file: &SourceFile, config: &Config) -> Vec<Diagnostic> {
        if !config.require_inline_for_scalars {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();

        for line in &file.lines {
            let code = match &line.kind {
                LineKind::Code(c) => c,
                _ => continue,
            };
            let assignment = match &code.assignment {
                Some(a) if a.is_simple_scalar() => a,
                _ => continue,
            };
            if code.inline_comment.is_some() {
                continue;
            }
            if has_adjacent_alternative(file, line.number, &assignment.key) {
                continue;
            }

            diagnostics.push(
                Diagnostic::new(
                    ID,
                    self.default_severity(),
                    format!(
                        "scalar assignment `{}` has no inline comment",
                        assignment.key
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

/// Whether the line directly above or below comments out the same key.
fn has_adjacent_alternative(file: &SourceFile, number: usize, key: &str) -> bool {
    [number.checked_sub(1), number.checked_add(1)]
        .into_iter()
        .flatten()
        .filter_map(|n| file.line(n))
        .any(|line| match &line.kind {
            LineKind::Comment(c) => c
                .commented_code
                .as_ref()
                .is_some_and(|alt| alt.key == key),
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Scanner;
    use crate::syntax::NixSyntax;

    fn check(source: &str) -> Vec<Diagnostic> {
        let file = Scanner::new(&NixSyntax).scan("test.nix", source);
        InlineComment.check(&file, &Config::default())
    }

    #[test]
    fn test_commented_scalar_passes() {
        assert!(check("port = 8080; # default upstream port\n").is_empty());
    }

    #[test]
    fn test_bare_scalar_fails() {
        let diags = check("port = 8080;\n");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("`port`"));
        assert_eq!(diags[0].location.as_ref().unwrap().line, 1);
    }

    #[test]
    fn test_non_scalar_is_ignored() {
        assert!(check("buildInputs = [ pkgs.zlib ];\n").is_empty());
        assert!(check("settings = {\n").is_empty());
    }

    #[test]
    fn test_adjacent_alternative_exempts() {
        let above = "# port = 8080;\nport = 9090;\n";
        assert!(check(above).is_empty());

        let below = "port = 9090;\n# port = 8080;\n";
        assert!(check(below).is_empty());
    }

    #[test]
    fn test_alternative_for_other_key_does_not_exempt() {
        let diags = check("# host = \"a\";\nport = 9090;\n");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_rule_can_be_disabled() {
        let file = Scanner::new(&NixSyntax).scan("test.nix", "port = 8080;\n");
        let config = Config {
            require_inline_for_scalars: false,
            ..Config::default()
        };
        assert!(InlineComment.check(&file, &config).is_empty());
    }
}
