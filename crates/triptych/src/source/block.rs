//! Block segmentation
//!
//! Contiguous non-blank lines group into blocks: runs of prose comment
//! lines form comment blocks, runs containing code form code blocks.
//! Blank lines and the shebang separate blocks. A comment block directly
//! above a code block (no blank between) is that block's header candidate.
//!
//! A commented-out assignment is code-shaped, not prose: it joins the
//! surrounding code block, so an alternative setting kept beside its live
//! value never splits the block it annotates.

use super::line::{LineKind, SourceLine};

/// What a block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A run of comment-only lines
    Comment,

    /// A run of code-bearing lines (trailing comments included)
    Code,
}

/// A maximal run of contiguous lines of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block's phase
    pub kind: BlockKind,

    /// First line number (1-indexed, inclusive)
    pub start: usize,

    /// Last line number (1-indexed, inclusive)
    pub end: usize,
}

impl Block {
    /// Number of lines in the block.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Blocks are never empty, but the conventional pair is kept.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `other` ends on the line directly above this block.
    pub fn touches_below(&self, other: &Block) -> bool {
        other.end + 1 == self.start
    }
}

/// Segment tagged lines into blocks.
///
/// Every `Comment` and `Code` line lands in exactly one block; `Blank` and
/// `Shebang` lines belong to none. Comment lines holding commented-out
/// assignments count as code phase.
pub fn segment(lines: &[SourceLine]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open: Option<Block> = None;

    for line in lines {
        let phase = match &line.kind {
            LineKind::Blank | LineKind::Shebang => {
                if let Some(block) = open.take() {
                    blocks.push(block);
                }
                continue;
            }
            LineKind::Comment(c) if c.commented_code.is_none() => BlockKind::Comment,
            LineKind::Comment(_) | LineKind::Code(_) => BlockKind::Code,
        };

        match open.as_mut() {
            Some(block) if block.kind == phase => block.end = line.number,
            _ => {
                if let Some(block) = open.take() {
                    blocks.push(block);
                }
                open = Some(Block {
                    kind: phase,
                    start: line.number,
                    end: line.number,
                });
            }
        }
    }

    if let Some(block) = open {
        blocks.push(block);
    }

    blocks
}
