//! Shell comment syntax
//!
//! Shell scripts have `#` line comments and no block form. A `#` only
//! opens a comment at the start of a word; both quote forms may span
//! lines, and single-quoted strings have no escapes.

use crate::source::Assignment;

use super::{CommentSyntax, LineState, SplitLine};

/// Comment syntax for shell scripts (`.sh`, `.bash`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSyntax;

impl CommentSyntax for ShellSyntax {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["sh", "bash"]
    }

    fn split_line(&self, raw: &str, state: LineState) -> (SplitLine, LineState) {
        split(raw, state)
    }

    fn parse_assignment(&self, code: &str) -> Option<Assignment> {
        parse_assignment(code)
    }
}

fn split(raw: &str, carry_in: LineState) -> (SplitLine, LineState) {
    let chars: Vec<char> = raw.chars().collect();
    let mut code = String::new();
    let mut comment = None;
    let mut state = carry_in;
    let mut i = 0;

    while i < chars.len() {
        match state {
            LineState::SingleQuote => {
                let c = chars[i];
                code.push(c);
                if c == '\'' {
                    state = LineState::Normal;
                }
                i += 1;
            }

            LineState::DoubleQuote => {
                let c = chars[i];
                if c == '\\' {
                    code.push(c);
                    if let Some(&next) = chars.get(i + 1) {
                        code.push(next);
                    }
                    i += 2;
                } else {
                    code.push(c);
                    if c == '"' {
                        state = LineState::Normal;
                    }
                    i += 1;
                }
            }

            // Shell has no block comments or indent strings.
            LineState::Normal | LineState::BlockComment | LineState::IndentString => {
                let c = chars[i];
                if c == '\\' {
                    code.push(c);
                    if let Some(&next) = chars.get(i + 1) {
                        code.push(next);
                    }
                    i += 2;
                } else if c == '#' && starts_word(&chars, i) {
                    let text: String = chars[i + 1..].iter().collect();
                    comment = Some(text.trim().to_string());
                    i = chars.len();
                } else if c == '\'' {
                    code.push(c);
                    state = LineState::SingleQuote;
                    i += 1;
                } else if c == '"' {
                    code.push(c);
                    state = LineState::DoubleQuote;
                    i += 1;
                } else {
                    code.push(c);
                    i += 1;
                }
            }
        }
    }

    (
        SplitLine {
            code,
            comment,
            comment_is_block: false,
        },
        state,
    )
}

/// A `#` opens a comment only at the start of a word (`foo#bar` and `$#`
/// are code).
fn starts_word(chars: &[char], i: usize) -> bool {
    match i.checked_sub(1).and_then(|p| chars.get(p)) {
        None => true,
        Some(prev) => prev.is_whitespace() || matches!(prev, ';' | '(' | '&' | '|'),
    }
}

/// Recognize `NAME=value`, optionally prefixed by a declaration keyword.
fn parse_assignment(code: &str) -> Option<Assignment> {
    let trimmed = code.trim();
    let trimmed = ["export ", "local ", "readonly ", "declare "]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(str::trim_start)
        .unwrap_or(trimmed);

    let eq = trimmed.find('=')?;
    let key = &trimmed[..eq];
    if !is_valid_name(key) {
        return None;
    }

    let value = trimmed[eq + 1..].trim_end();
    // A space after `=` would make this a command, not an assignment.
    if value.starts_with(char::is_whitespace) {
        return None;
    }

    Some(Assignment {
        key: key.to_string(),
        value: value.to_string(),
        scalar: is_scalar_value(value),
        terminated: true,
    })
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Scalar values carry no substitution and no word break.
fn is_scalar_value(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    let quoted = (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
        || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2);

    let interior = if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    };

    if interior.contains('$') || interior.contains('`') || interior.contains('(') {
        return false;
    }

    quoted || !value.contains(char::is_whitespace)
}
