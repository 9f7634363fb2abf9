use pretty_assertions::assert_eq;

use triptych::syntax::NixSyntax;
use triptych::{BlockKind, LineKind, Scanner, SourceFile};

// Helper to scan a nix snippet
fn scan(source: &str) -> SourceFile {
    Scanner::new(&NixSyntax).scan("scan.nix", source)
}

fn kinds(file: &SourceFile) -> Vec<&'static str> {
    file.lines
        .iter()
        .map(|l| match &l.kind {
            LineKind::Blank => "blank",
            LineKind::Shebang => "shebang",
            LineKind::Comment(_) => "comment",
            LineKind::Code(_) => "code",
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Line Tagging
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_mixed_file_tags() {
    let source = "\
# What: a section
# Does: things
# Why: reasons
top = {
  enable = true; # on

  inner = [
    1
  ];
};
";
    let file = scan(source);
    assert_eq!(
        kinds(&file),
        vec![
            "comment", "comment", "comment", "code", "code", "blank", "code", "code", "code",
            "code",
        ]
    );
    assert!(file.unterminated.is_none());
}

#[test]
fn test_inline_comment_is_attached_to_the_code_line() {
    let file = scan("port = 8080; # upstream default\n");
    match &file.lines[0].kind {
        LineKind::Code(code) => {
            assert_eq!(code.inline_comment.as_deref(), Some("upstream default"));
            let a = code.assignment.as_ref().expect("assignment");
            assert_eq!(a.key, "port");
            assert!(a.scalar);
        }
        other => panic!("expected code, got {other:?}"),
    }
}

#[test]
fn test_comment_markers_inside_strings_stay_code() {
    let source = "\
one = \"a # b\";
two = ''
  # still string content
'';
";
    let file = scan(source);
    assert_eq!(kinds(&file), vec!["code", "code", "code", "code"]);
}

#[test]
fn test_block_comment_state_carries_across_lines() {
    let source = "\
/* What: spans
   Does: several
   Why: lines */
x = 1;
";
    let file = scan(source);
    assert_eq!(kinds(&file), vec!["comment", "comment", "comment", "code"]);
    match &file.lines[1].kind {
        LineKind::Comment(c) => {
            assert!(c.is_block);
            assert_eq!(c.text, "Does: several");
        }
        other => panic!("expected comment, got {other:?}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Block Structure
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_blocks_split_on_blank_lines() {
    let file = scan("a = x;\n\nb = y;\n");
    let blocks: Vec<_> = file.blocks.iter().map(|b| (b.kind, b.start, b.end)).collect();
    assert_eq!(
        blocks,
        vec![(BlockKind::Code, 1, 1), (BlockKind::Code, 3, 3)]
    );
}

#[test]
fn test_alternative_joins_the_code_block() {
    let source = "\
port = 9090; # pinned
# port = 8080;
host = \"a\"; # bind address
";
    let file = scan(source);
    assert_eq!(file.blocks.len(), 1);
    assert_eq!(file.blocks[0].kind, BlockKind::Code);
    assert_eq!(file.code_lines_in(&file.blocks[0]), 2);
}

#[test]
fn test_prose_comment_is_its_own_block() {
    let source = "# just a note\nx = 1;\n";
    let file = scan(source);
    assert_eq!(file.blocks.len(), 2);
    assert_eq!(file.blocks[0].kind, BlockKind::Comment);
    let code = &file.blocks[1];
    assert!(file.block_above(code).is_some());
}

// ═══════════════════════════════════════════════════════════════════════
// Input Shapes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_empty_and_blank_only_input() {
    assert!(scan("").is_empty());

    let file = scan("\n  \n\n");
    assert!(file.blocks.is_empty());
    assert!(file.lines.iter().all(|l| l.is_blank()));
}

#[test]
fn test_crlf_input_scans_like_lf() {
    let lf = scan("# note\nx = 1; # set\n");
    let crlf = scan("# note\r\nx = 1; # set\r\n");
    assert_eq!(kinds(&lf), kinds(&crlf));
    assert_eq!(lf.blocks, crlf.blocks);
}

#[test]
fn test_unterminated_constructs_are_recorded() {
    let comment = scan("x = 1;\n/* open\n");
    assert!(matches!(
        comment.unterminated,
        Some(triptych::source::Unterminated::BlockComment { line: 2 })
    ));

    let string = scan("x = ''\nnever closed\n");
    assert!(matches!(
        string.unterminated,
        Some(triptych::source::Unterminated::String { line: 1 })
    ));
}
