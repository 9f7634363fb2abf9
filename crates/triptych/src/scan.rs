//! Source scanning
//!
//! The scanner drives a [`CommentSyntax`] over source text, producing a
//! [`SourceFile`] of tagged lines and blocks. Scanning is best-effort: a
//! construct left open at end of input is recorded on the file rather than
//! failing the scan, so the rules can still run over what was read.

use crate::source::{CodeLine, CommentLine, LineKind, SourceFile, SourceLine, Unterminated};
use crate::syntax::{CommentSyntax, LineState};

/// Scans source text into tagged lines.
pub struct Scanner<'a> {
    syntax: &'a dyn CommentSyntax,
}

impl<'a> Scanner<'a> {
    /// Create a scanner for the given syntax.
    pub fn new(syntax: &'a dyn CommentSyntax) -> Self {
        Self { syntax }
    }

    /// Scan `source`, tagging every line.
    ///
    /// `name` identifies the input in diagnostic locations. Input with
    /// CRLF line endings scans the same as LF input.
    pub fn scan(&self, name: &str, source: &str) -> SourceFile {
        if source.is_empty() {
            return SourceFile::new(name, Vec::new(), None);
        }

        let mut lines = Vec::new();
        let mut state = LineState::Normal;
        let mut opened_at = 0usize;

        for (i, raw) in source.split('\n').enumerate() {
            let number = i + 1;
            let raw = raw.strip_suffix('\r').unwrap_or(raw);

            // Interpreter line; only ever the first line of the file.
            if number == 1 && raw.starts_with("#!") {
                lines.push(SourceLine::new(number, raw, LineKind::Shebang));
                continue;
            }

            let carry_in = state;
            let (split, carry_out) = self.syntax.split_line(raw, carry_in);
            if carry_in == LineState::Normal && carry_out != LineState::Normal {
                opened_at = number;
            }
            state = carry_out;

            let kind = self.classify(carry_in, split);
            lines.push(SourceLine::new(number, raw, kind));
        }

        // `split('\n')` yields one empty trailing entry for newline-terminated
        // input; drop it so line counts match the file.
        if source.ends_with('\n') {
            lines.pop();
        }

        let unterminated = match state {
            LineState::Normal => None,
            LineState::BlockComment => Some(Unterminated::BlockComment { line: opened_at }),
            _ => Some(Unterminated::String { line: opened_at }),
        };

        SourceFile::new(name, lines, unterminated)
    }

    fn classify(&self, carry_in: LineState, split: crate::syntax::SplitLine) -> LineKind {
        let code_blank = split.code.trim().is_empty();

        // A line inside a multi-line string is string content, code by
        // definition, even when visually blank.
        if carry_in.in_string() {
            return LineKind::Code(CodeLine {
                code: split.code,
                inline_comment: split.comment,
                assignment: None,
            });
        }

        // A line inside a block comment stays a comment line even when the
        // content is empty.
        if carry_in.in_comment() && code_blank {
            let text = split.comment.unwrap_or_default();
            return LineKind::Comment(self.comment_line(text, true));
        }

        match (code_blank, split.comment) {
            (true, None) => LineKind::Blank,
            (true, Some(text)) => LineKind::Comment(self.comment_line(text, split.comment_is_block)),
            (false, comment) => {
                let assignment = self.syntax.parse_assignment(&split.code);
                LineKind::Code(CodeLine {
                    code: split.code,
                    inline_comment: comment,
                    assignment,
                })
            }
        }
    }

    fn comment_line(&self, text: String, is_block: bool) -> CommentLine {
        // Only a complete assignment counts as commented-out code; prose
        // that happens to contain `=` stays prose.
        let commented_code = self
            .syntax
            .parse_assignment(&text)
            .filter(|a| a.terminated);
        CommentLine {
            text,
            is_block,
            commented_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BlockKind;
    use crate::syntax::NixSyntax;

    fn scan(source: &str) -> SourceFile {
        Scanner::new(&NixSyntax).scan("test.nix", source)
    }

    #[test]
    fn test_empty_input() {
        let file = scan("");
        assert!(file.lines.is_empty());
        assert!(file.blocks.is_empty());
        assert!(file.unterminated.is_none());
    }

    #[test]
    fn test_trailing_newline_does_not_add_a_line() {
        let file = scan("x = 1;\n");
        assert_eq!(file.lines.len(), 1);
    }

    #[test]
    fn test_crlf_matches_lf() {
        let lf = scan("# note\nx = 1;\n");
        let crlf = scan("# note\r\nx = 1;\r\n");
        assert_eq!(lf.lines.len(), crlf.lines.len());
        for (a, b) in lf.lines.iter().zip(&crlf.lines) {
            assert_eq!(a.kind, b.kind);
        }
    }

    #[test]
    fn test_tags_and_blocks() {
        let file = scan("# What: a value\nx = 1; # why not\n\ny = 2;\n");
        assert!(file.lines[0].is_comment());
        assert!(file.lines[1].is_code());
        assert!(file.lines[2].is_blank());
        assert!(file.lines[3].is_code());
        assert_eq!(file.blocks.len(), 3);
        assert_eq!(file.blocks[0].kind, BlockKind::Comment);
        assert_eq!(file.blocks[1].kind, BlockKind::Code);
        assert_eq!(file.blocks[2].kind, BlockKind::Code);
    }

    #[test]
    fn test_shebang_is_not_a_comment_block() {
        let source = "#!/usr/bin/env nix-shell\nx = 1;\n";
        let file = scan(source);
        assert!(matches!(file.lines[0].kind, LineKind::Shebang));
        assert_eq!(file.blocks.len(), 1);
        assert_eq!(file.blocks[0].kind, BlockKind::Code);
    }

    #[test]
    fn test_commented_out_assignment_is_flagged() {
        let file = scan("# port = 8080;\nport = 9090; # pinned\n");
        match &file.lines[0].kind {
            LineKind::Comment(c) => {
                let alt = c.commented_code.as_ref().expect("alternative");
                assert_eq!(alt.key, "port");
            }
            other => panic!("expected comment, got {other:?}"),
        }
    }

    #[test]
    fn test_prose_with_equals_is_not_commented_code() {
        let file = scan("# the default = fine for dev\n");
        match &file.lines[0].kind {
            LineKind::Comment(c) => assert!(c.commented_code.is_none()),
            other => panic!("expected comment, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_line_string_lines_are_code() {
        let source = "script = ''\n  # inside the string\n'';\n";
        let file = scan(source);
        assert!(file.lines[1].is_code());
        assert_eq!(file.blocks.len(), 1);
        assert!(file.unterminated.is_none());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let file = scan("/* What: never closed\nx = 1;\n");
        assert_eq!(
            file.unterminated,
            Some(Unterminated::BlockComment { line: 1 })
        );
    }

    #[test]
    fn test_unterminated_string() {
        let file = scan("motd = \"open\nforever\n");
        assert_eq!(file.unterminated, Some(Unterminated::String { line: 1 }));
    }

    #[test]
    fn test_block_comment_interior_lines_are_comments() {
        let source = "/* What: a section\n   Does: things\n   Why: reasons */\nx = 1;\n";
        let file = scan(source);
        assert!(file.lines[0].is_comment());
        assert!(file.lines[1].is_comment());
        assert!(file.lines[2].is_comment());
        assert!(file.lines[3].is_code());
        assert_eq!(file.blocks.len(), 2);
    }
}
