//! Source model: tagged lines, blocks, and scanned files

mod block;
mod line;
mod location;

pub use block::{segment, Block, BlockKind};
pub use line::{Assignment, CodeLine, CommentLine, LineKind, SourceLine};
pub use location::SourceLocation;

/// A construct still open at end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unterminated {
    /// A block comment was opened and never closed
    BlockComment {
        /// Line where the comment opened
        line: usize,
    },

    /// A string was opened and never closed
    String {
        /// Line where the string opened
        line: usize,
    },
}

/// A scanned source file: tagged lines plus their block structure.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name or identifier (used in diagnostic locations)
    pub name: String,

    /// All physical lines, tagged
    pub lines: Vec<SourceLine>,

    /// Blank-separated blocks over the lines
    pub blocks: Vec<Block>,

    /// A construct left open at end of input, if any
    pub unterminated: Option<Unterminated>,
}

impl SourceFile {
    /// Build a source file from tagged lines, segmenting blocks.
    pub fn new(
        name: impl Into<String>,
        lines: Vec<SourceLine>,
        unterminated: Option<Unterminated>,
    ) -> Self {
        let blocks = segment(&lines);
        Self {
            name: name.into(),
            lines,
            blocks,
            unterminated,
        }
    }

    /// Look up a line by its 1-indexed number.
    pub fn line(&self, number: usize) -> Option<&SourceLine> {
        if number == 0 {
            return None;
        }
        self.lines.get(number - 1)
    }

    /// Iterate the blocks of a given kind.
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| b.kind == kind)
    }

    /// The block ending on the line directly above `block`, if any.
    ///
    /// Only a touching block counts: a blank line in between detaches a
    /// comment from the code below it.
    pub fn block_above(&self, block: &Block) -> Option<&Block> {
        self.blocks.iter().find(|b| block.touches_below(b))
    }

    /// The block containing the given line number, if any.
    pub fn block_containing(&self, number: usize) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.start <= number && number <= b.end)
    }

    /// Count the code-bearing lines inside a block.
    pub fn code_lines_in(&self, block: &Block) -> usize {
        self.lines[block.start - 1..block.end]
            .iter()
            .filter(|l| l.is_code())
            .count()
    }

    /// Iterate lines inside a block.
    pub fn lines_in<'a>(&'a self, block: &Block) -> impl Iterator<Item = &'a SourceLine> {
        self.lines[block.start - 1..block.end].iter()
    }

    /// Whether the file has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(raws: &[(&str, LineKind)]) -> Vec<SourceLine> {
        raws.iter()
            .enumerate()
            .map(|(i, (raw, kind))| SourceLine::new(i + 1, *raw, kind.clone()))
            .collect()
    }

    fn comment_kind() -> LineKind {
        LineKind::Comment(CommentLine {
            text: "note".into(),
            is_block: false,
            commented_code: None,
        })
    }

    fn code_kind() -> LineKind {
        LineKind::Code(CodeLine {
            code: "x = 1;".into(),
            inline_comment: None,
            assignment: None,
        })
    }

    #[test]
    fn test_block_above_requires_touching() {
        let attached = SourceFile::new(
            "a.nix",
            tagged(&[("# note", comment_kind()), ("x = 1;", code_kind())]),
            None,
        );
        let code = attached.blocks_of(BlockKind::Code).next().unwrap();
        assert!(attached.block_above(code).is_some());

        let detached = SourceFile::new(
            "b.nix",
            tagged(&[
                ("# note", comment_kind()),
                ("", LineKind::Blank),
                ("x = 1;", code_kind()),
            ]),
            None,
        );
        let code = detached.blocks_of(BlockKind::Code).next().unwrap();
        assert!(detached.block_above(code).is_none());
    }

    #[test]
    fn test_line_lookup_is_one_indexed() {
        let file = SourceFile::new("a.nix", tagged(&[("x = 1;", code_kind())]), None);
        assert!(file.line(0).is_none());
        assert_eq!(file.line(1).unwrap().raw, "x = 1;");
        assert!(file.line(2).is_none());
    }
}
