//! Tagged source lines
//!
//! The scanner turns each physical line of input into a [`SourceLine`]
//! carrying a [`LineKind`]. Everything downstream (block segmentation and
//! the rules) works on these tags and never re-reads raw text, except for
//! width checks.

/// One physical line of a scanned source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line number (1-indexed)
    pub number: usize,

    /// Raw line text, without the trailing newline
    pub raw: String,

    /// What kind of line this is
    pub kind: LineKind,
}

impl SourceLine {
    /// Create a new tagged line.
    pub fn new(number: usize, raw: impl Into<String>, kind: LineKind) -> Self {
        Self {
            number,
            raw: raw.into(),
            kind,
        }
    }

    /// Whether this line carries code (including multi-line string content).
    pub fn is_code(&self) -> bool {
        matches!(self.kind, LineKind::Code(_))
    }

    /// Whether this line is a comment with no code on it.
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, LineKind::Comment(_))
    }

    /// Whether this line is blank.
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }

    /// Column of the first non-whitespace character (1-indexed).
    ///
    /// Blank lines report column 1.
    pub fn indent_column(&self) -> usize {
        self.raw
            .chars()
            .position(|c| !c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(1)
    }

    /// Width of the line in characters.
    pub fn width(&self) -> usize {
        self.raw.chars().count()
    }
}

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line
    Blank,

    /// A `#!` interpreter line at the top of the file
    Shebang,

    /// A line holding only a comment
    Comment(CommentLine),

    /// A line holding code (possibly with a trailing comment)
    Code(CodeLine),
}

/// A comment-only line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    /// Comment content with markers stripped and trimmed
    pub text: String,

    /// Whether the comment uses the block form (`/* ... */`)
    pub is_block: bool,

    /// Set when the comment content parses as an assignment: this line is
    /// an alternative-setting candidate rather than prose.
    pub commented_code: Option<Assignment>,
}

impl CommentLine {
    /// Whether this comment is prose rather than commented-out code.
    pub fn is_prose(&self) -> bool {
        self.commented_code.is_none() && !self.text.is_empty()
    }
}

/// A code-bearing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// The code portion of the line, comment text removed
    pub code: String,

    /// Trailing comment content on the same line, markers stripped
    pub inline_comment: Option<String>,

    /// The assignment this line opens, when it parses as one
    pub assignment: Option<Assignment>,
}

/// An assignment recognized by a comment syntax.
///
/// The rules only ever compare keys and ask whether the right-hand side is
/// a scalar literal; the value text is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The assigned key (dotted path for Nix, variable name for shell)
    pub key: String,

    /// Right-hand side text, trimmed, without the terminator
    pub value: String,

    /// Whether the right-hand side is a scalar literal
    pub scalar: bool,

    /// Whether the assignment is complete on this line
    pub terminated: bool,
}

impl Assignment {
    /// A simple scalar assignment: literal right-hand side, complete on
    /// one line. These are the lines the inline-comment convention covers.
    pub fn is_simple_scalar(&self) -> bool {
        self.scalar && self.terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_column() {
        let line = SourceLine::new(1, "  port = 80;", LineKind::Blank);
        assert_eq!(line.indent_column(), 3);

        let blank = SourceLine::new(2, "   ", LineKind::Blank);
        assert_eq!(blank.indent_column(), 1);
    }

    #[test]
    fn test_width_counts_chars() {
        let line = SourceLine::new(1, "état = 1;", LineKind::Blank);
        assert_eq!(line.width(), 9);
    }

    #[test]
    fn test_comment_line_prose() {
        let prose = CommentLine {
            text: "What: the web server".into(),
            is_block: false,
            commented_code: None,
        };
        assert!(prose.is_prose());

        let empty = CommentLine {
            text: String::new(),
            is_block: false,
            commented_code: None,
        };
        assert!(!empty.is_prose());
    }
}
