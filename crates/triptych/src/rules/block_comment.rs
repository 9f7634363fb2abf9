//! The What/Does/Why block-comment rule
//!
//! A multi-line code block is introduced by a block comment carrying three
//! labeled parts in order: `What:` (what the section is), `Does:` (what it
//! does), and `Why:` (why it is there). The comment must touch the code
//! block; a blank line in between detaches it. Commented-out code does not
//! count as an introduction.

use crate::config::Config;
use crate::report::Diagnostic;
use crate::source::{Block, BlockKind, LineKind, SourceFile, SourceLocation};

use super::{Rule, RuleId};

/// Rule id for the block-comment convention.
pub const ID: RuleId = RuleId("block-comment");

/// The three labels, in required order.
const LABELS: [&str; 3] = ["what:", "does:", "why:"];

/// Checks that multi-line code blocks carry a What/Does/Why header.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockComment;

impl Rule for BlockComment {
    fn id(&self) -> RuleId {
        ID
    }

    fn description(&self) -> &'static str {
        "multi-line code blocks are introduced by a What/Does/Why block comment"
    }

    fn check(&self, file: &SourceFile, config: &Config) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for block in file.blocks_of(BlockKind::Code) {
            if file.code_lines_in(block) < config.block_comment_min_lines {
                continue;
            }

            let header = file
                .block_above(block)
                .filter(|b| b.kind == BlockKind::Comment && has_prose(file, b));

            match header {
                None => {
                    let (column, snippet) = file
                        .line(block.start)
                        .map(|l| (l.indent_column(), l.raw.trim().to_string()))
                        .unwrap_or((1, String::new()));
                    diagnostics.push(
                        Diagnostic::new(
                            ID,
                            self.default_severity(),
                            "code block is not introduced by a block comment",
                        )
                        .with_location(SourceLocation::new(&file.name, block.start, column))
                        .with_snippet(snippet),
                    );
                }
                Some(header) => {
                    diagnostics.extend(self.check_labels(file, header));
                }
            }
        }

        diagnostics
    }
}

impl BlockComment {
    fn check_labels(&self, file: &SourceFile, header: &Block) -> Vec<Diagnostic> {
        let mut positions: [Option<usize>; 3] = [None; 3];

        for line in file.lines_in(header) {
            let comment = match &line.kind {
                LineKind::Comment(c) if c.commented_code.is_none() => c,
                _ => continue,
            };
            let text = comment.text.trim().to_ascii_lowercase();
            for (slot, label) in positions.iter_mut().zip(LABELS) {
                if slot.is_none() && text.starts_with(label) {
                    *slot = Some(line.number);
                }
            }
        }

        let location = SourceLocation::new(
            &file.name,
            header.start,
            file.line(header.start)
                .map(|l| l.indent_column())
                .unwrap_or(1),
        );

        let missing: Vec<&str> = positions
            .iter()
            .zip(["What:", "Does:", "Why:"])
            .filter(|(slot, _)| slot.is_none())
            .map(|(_, label)| label)
            .collect();

        if !missing.is_empty() {
            return vec![Diagnostic::new(
                ID,
                self.default_severity(),
                format!("block comment is missing its {} part(s)", join_labels(&missing)),
            )
            .with_location(location)];
        }

        let found: Vec<usize> = positions.iter().copied().flatten().collect();
        if found.windows(2).any(|w| w[0] > w[1]) {
            return vec![Diagnostic::new(
                ID,
                self.default_severity(),
                "block comment parts are out of order (expected What:, Does:, Why:)",
            )
            .with_location(location)];
        }

        Vec::new()
    }
}

/// Whether a comment block contains any prose at all.
fn has_prose(file: &SourceFile, block: &Block) -> bool {
    file.lines_in(block).any(|line| match &line.kind {
        LineKind::Comment(c) => c.is_prose(),
        _ => false,
    })
}

fn join_labels(labels: &[&str]) -> String {
    match labels {
        [only] => format!("`{only}`"),
        [a, b] => format!("`{a}` and `{b}`"),
        _ => {
            let mut out = String::new();
            for (i, label) in labels.iter().enumerate() {
                if i + 1 == labels.len() {
                    out.push_str(&format!("and `{label}`"));
                } else {
                    out.push_str(&format!("`{label}`, "));
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Scanner;
    use crate::syntax::NixSyntax;

    fn check(source: &str) -> Vec<Diagnostic> {
        let file = Scanner::new(&NixSyntax).scan("test.nix", source);
        BlockComment.check(&file, &Config::default())
    }

    const CONFORMING: &str = "\
# What: the reverse proxy vhost
# Does: terminates TLS and forwards to the app
# Why: the app itself only speaks plain HTTP
services.nginx = {
  enable = true;
};
";

    #[test]
    fn test_conforming_header_passes() {
        assert!(check(CONFORMING).is_empty());
    }

    #[test]
    fn test_missing_header() {
        let diags = check("services.nginx = {\n  enable = true;\n};\n");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("not introduced"));
        assert_eq!(diags[0].location.as_ref().unwrap().line, 1);
    }

    #[test]
    fn test_detached_header_does_not_count() {
        let source = "\
# What: a section
# Does: things
# Why: reasons

services.nginx = {
  enable = true;
};
";
        let diags = check(source);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("not introduced"));
    }

    #[test]
    fn test_missing_parts_are_named() {
        let source = "\
# What: the firewall
networking.firewall = {
  enable = true;
};
";
        let diags = check(source);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("`Does:` and `Why:`"));
    }

    #[test]
    fn test_out_of_order_parts() {
        let source = "\
# Why: reasons first
# What: a section
# Does: things
services.nginx = {
  enable = true;
};
";
        let diags = check(source);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("out of order"));
    }

    #[test]
    fn test_single_line_block_is_exempt() {
        assert!(check("enable = true; # the one switch\n").is_empty());
    }

    #[test]
    fn test_alternatives_do_not_introduce() {
        let source = "\
# port = 8080;
port = 9090;
listenAddress = \"0.0.0.0\";
";
        let diags = check(source);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("not introduced"));
    }

    #[test]
    fn test_block_form_header_passes() {
        let source = "\
/* What: the build inputs
   Does: pulls zlib and openssl into the build
   Why: upstream links against both */
buildInputs = [
  pkgs.zlib
  pkgs.openssl
];
";
        assert!(check(source).is_empty());
    }
}
