//! Comment syntaxes for Triptych
//!
//! This module defines the `CommentSyntax` trait that allows multiple
//! languages to target the Triptych checker. Any language whose comment and
//! assignment forms can be described here can be linted against the same
//! conventions.
//!
//! # Architecture
//!
//! The syntax trait establishes a clean separation:
//!
//! ```text
//! Source Text → [Syntax] → tagged lines → [Rules] → Diagnostics
//! ```
//!
//! Syntaxes are responsible for:
//! - Splitting a physical line into code and comment parts
//! - Threading multi-line state (strings, block comments) across lines
//! - Recognizing the language's assignment form
//!
//! The checker core is responsible for:
//! - Tagging lines and segmenting blocks
//! - Walking the tagged file with convention rules
//! - Aggregating and rendering diagnostics

use std::path::Path;
use std::sync::Arc;

use crate::source::Assignment;

pub mod nix;

#[cfg(feature = "shell")]
pub mod shell;

pub use nix::NixSyntax;

#[cfg(feature = "shell")]
pub use shell::ShellSyntax;

// ═══════════════════════════════════════════════════════════════════════
// LINE STATE
// ═══════════════════════════════════════════════════════════════════════

/// Scanner state carried from one line to the next.
///
/// Multi-line constructs (block comments and strings that span lines) are
/// the only state a comment scanner needs. Each syntax uses the subset of
/// variants its language has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    /// Plain code
    #[default]
    Normal,

    /// Inside a block comment (`/* ... */`)
    BlockComment,

    /// Inside a double-quoted string
    DoubleQuote,

    /// Inside an indented string (Nix `''...''`)
    IndentString,

    /// Inside a single-quoted string (shell)
    SingleQuote,
}

impl LineState {
    /// Whether the state is inside any string form.
    pub fn in_string(&self) -> bool {
        matches!(
            self,
            LineState::DoubleQuote | LineState::IndentString | LineState::SingleQuote
        )
    }

    /// Whether the state is inside a block comment.
    pub fn in_comment(&self) -> bool {
        matches!(self, LineState::BlockComment)
    }
}

/// One physical line split into its code and comment parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitLine {
    /// Code text with comment content removed (string interiors kept)
    pub code: String,

    /// Comment content on this line, markers stripped and trimmed
    pub comment: Option<String>,

    /// Whether the comment uses the block form
    pub comment_is_block: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// COMMENT SYNTAX TRAIT
// ═══════════════════════════════════════════════════════════════════════

/// Comment syntax interface for Triptych.
///
/// This trait defines the boundary between language-specific lexing and the
/// language-agnostic convention checker. Implementations describe how one
/// language writes comments, strings, and assignments; the checker never
/// inspects raw text itself.
pub trait CommentSyntax: Send + Sync {
    /// Return the name of this syntax.
    ///
    /// Examples: "nix", "shell"
    fn name(&self) -> &'static str;

    /// Return the file extensions this syntax claims.
    ///
    /// Extensions are matched case-insensitively, without the dot.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Split one physical line into code and comment parts.
    ///
    /// `state` is the carry-in from the previous line; the carry-out is
    /// returned alongside the split so multi-line strings and block
    /// comments survive line boundaries. A comment marker inside a string
    /// must not open a comment.
    fn split_line(&self, raw: &str, state: LineState) -> (SplitLine, LineState);

    /// Recognize the language's assignment form in a piece of code text.
    ///
    /// Returns `None` when the text is not an assignment. The same method
    /// runs over comment content to spot commented-out assignments
    /// (alternative settings).
    fn parse_assignment(&self, code: &str) -> Option<Assignment>;
}

// ═══════════════════════════════════════════════════════════════════════
// SYNTAX REGISTRY
// ═══════════════════════════════════════════════════════════════════════

/// Ordered registry of comment syntaxes, looked up by name or extension.
#[derive(Clone)]
pub struct SyntaxRegistry {
    syntaxes: Vec<Arc<dyn CommentSyntax>>,
}

impl SyntaxRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            syntaxes: Vec::new(),
        }
    }

    /// Register a syntax. Earlier registrations win extension conflicts.
    pub fn register(&mut self, syntax: Arc<dyn CommentSyntax>) {
        self.syntaxes.push(syntax);
    }

    /// Look up a syntax by name.
    pub fn by_name(&self, name: &str) -> Option<Arc<dyn CommentSyntax>> {
        self.syntaxes
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Look up the syntax claiming a path's extension.
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn CommentSyntax>> {
        let ext = path.extension()?.to_str()?;
        self.syntaxes
            .iter()
            .find(|s| {
                s.file_extensions()
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(ext))
            })
            .cloned()
    }

    /// Whether any registered syntax claims the path.
    pub fn supports(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }

    /// Names of all registered syntaxes, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.syntaxes.iter().map(|s| s.name()).collect()
    }

    /// Number of registered syntaxes.
    pub fn len(&self) -> usize {
        self.syntaxes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.syntaxes.is_empty()
    }
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(NixSyntax));

        #[cfg(feature = "shell")]
        registry.register(Arc::new(ShellSyntax));

        registry
    }
}

impl std::fmt::Debug for SyntaxRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxRegistry")
            .field("syntaxes", &self.names())
            .finish()
    }
}
