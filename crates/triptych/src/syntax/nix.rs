//! Nix comment syntax
//!
//! Nix has `#` line comments, `/* ... */` block comments, double-quoted
//! strings (which may span lines), and indented strings (`''...''`) where
//! `'''` escapes the closing pair and `''$` escapes interpolation. A `#`
//! or `/*` inside any string form is string content, not a comment.

use crate::source::Assignment;

use super::{CommentSyntax, LineState, SplitLine};

/// Comment syntax for Nix sources (`.nix`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NixSyntax;

impl CommentSyntax for NixSyntax {
    fn name(&self) -> &'static str {
        "nix"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["nix"]
    }

    fn split_line(&self, raw: &str, state: LineState) -> (SplitLine, LineState) {
        split(raw, state)
    }

    fn parse_assignment(&self, code: &str) -> Option<Assignment> {
        parse_assignment(code)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// LINE SPLITTING
// ═══════════════════════════════════════════════════════════════════════

fn split(raw: &str, carry_in: LineState) -> (SplitLine, LineState) {
    let chars: Vec<char> = raw.chars().collect();
    let mut code = String::new();
    let mut comments: Vec<String> = Vec::new();
    let mut comment_is_block = false;
    let mut state = carry_in;
    let mut i = 0;

    while i < chars.len() {
        match state {
            LineState::BlockComment => {
                // Consume until the closer; the rest of the line is comment
                // content if it never arrives.
                match find_close(&chars, i) {
                    Some(j) => {
                        push_comment(&mut comments, &chars[i..j]);
                        comment_is_block = true;
                        state = LineState::Normal;
                        i = j + 2;
                    }
                    None => {
                        push_comment(&mut comments, &chars[i..]);
                        comment_is_block = true;
                        i = chars.len();
                    }
                }
            }

            LineState::DoubleQuote => {
                let c = chars[i];
                if c == '\\' {
                    code.push(c);
                    if let Some(&next) = chars.get(i + 1) {
                        code.push(next);
                    }
                    i += 2;
                } else if c == '$' && chars.get(i + 1) == Some(&'{') {
                    i = consume_interpolation(&chars, i, &mut code);
                } else if c == '"' {
                    code.push(c);
                    state = LineState::Normal;
                    i += 1;
                } else {
                    code.push(c);
                    i += 1;
                }
            }

            LineState::IndentString => {
                let c = chars[i];
                if c == '\'' && chars.get(i + 1) == Some(&'\'') {
                    match chars.get(i + 2) {
                        // `'''` is a literal quote pair, `''$` a literal
                        // interpolation; neither closes the string.
                        Some('\'') | Some('$') => {
                            code.push(c);
                            code.push('\'');
                            code.push(*chars.get(i + 2).unwrap_or(&' '));
                            i += 3;
                        }
                        _ => {
                            code.push_str("''");
                            state = LineState::Normal;
                            i += 2;
                        }
                    }
                } else if c == '$' && chars.get(i + 1) == Some(&'{') {
                    i = consume_interpolation(&chars, i, &mut code);
                } else {
                    code.push(c);
                    i += 1;
                }
            }

            // Nix has no single-quoted strings; treat like plain code.
            LineState::Normal | LineState::SingleQuote => {
                let c = chars[i];
                if c == '#' {
                    push_comment(&mut comments, &chars[i + 1..]);
                    i = chars.len();
                } else if c == '/' && chars.get(i + 1) == Some(&'*') {
                    match find_close(&chars, i + 2) {
                        Some(j) => {
                            push_comment(&mut comments, &chars[i + 2..j]);
                            comment_is_block = true;
                            i = j + 2;
                        }
                        None => {
                            push_comment(&mut comments, &chars[i + 2..]);
                            comment_is_block = true;
                            state = LineState::BlockComment;
                            i = chars.len();
                        }
                    }
                } else if c == '"' {
                    code.push(c);
                    state = LineState::DoubleQuote;
                    i += 1;
                } else if c == '\'' && chars.get(i + 1) == Some(&'\'') {
                    code.push_str("''");
                    state = LineState::IndentString;
                    i += 2;
                } else {
                    code.push(c);
                    i += 1;
                }
            }
        }
    }

    let comment = if comments.is_empty() {
        None
    } else {
        Some(comments.join(" "))
    };

    (
        SplitLine {
            code,
            comment,
            comment_is_block,
        },
        state,
    )
}

/// Find the index of `*/` at or after `from`.
fn find_close(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == '*' && chars[j + 1] == '/')
}

/// Consume a `${...}` interpolation as opaque string content.
///
/// Interpolations may nest braces; an interpolation left open at end of
/// line keeps the surrounding string state, which is close enough for
/// comment scanning.
fn consume_interpolation(chars: &[char], start: usize, code: &mut String) -> usize {
    code.push('$');
    code.push('{');
    let mut depth = 1usize;
    let mut i = start + 2;
    while i < chars.len() && depth > 0 {
        match chars[i] {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        code.push(chars[i]);
        i += 1;
    }
    i
}

fn push_comment(comments: &mut Vec<String>, content: &[char]) {
    comments.push(content.iter().collect::<String>().trim().to_string());
}

// ═══════════════════════════════════════════════════════════════════════
// ASSIGNMENT RECOGNITION
// ═══════════════════════════════════════════════════════════════════════

/// Recognize `key = value;` with an optional dotted key.
///
/// Only a top-level `=` counts: one outside every bracket pair and string,
/// and not part of `==`, `!=`, `<=`, or `>=`.
fn parse_assignment(code: &str) -> Option<Assignment> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return None;
    }

    let eq = find_top_level_eq(trimmed)?;
    let key = trimmed[..eq].trim();
    if !is_valid_key(key) {
        return None;
    }

    let rest = trimmed[eq + 1..].trim();
    if rest.is_empty() {
        return None;
    }

    let (value, terminated) = match rest.strip_suffix(';') {
        Some(v) => (v.trim_end(), true),
        None => (rest, false),
    };
    if value.is_empty() {
        return None;
    }

    Some(Assignment {
        key: key.to_string(),
        value: value.to_string(),
        scalar: is_scalar_literal(value),
        terminated,
    })
}

fn find_top_level_eq(text: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut depth = 0usize;
    let mut in_dquote = false;
    let mut k = 0;

    while k < chars.len() {
        let (idx, c) = chars[k];
        if in_dquote {
            match c {
                '\\' => k += 1,
                '"' => in_dquote = false,
                _ => {}
            }
        } else {
            match c {
                '"' => in_dquote = true,
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                '=' if depth == 0 => {
                    let prev = if k > 0 { Some(chars[k - 1].1) } else { None };
                    let next = chars.get(k + 1).map(|&(_, c)| c);
                    let comparison = matches!(prev, Some('=') | Some('!') | Some('<') | Some('>'))
                        || next == Some('=');
                    if !comparison {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }
        k += 1;
    }

    None
}

/// A key is a dotted path of identifiers or quoted components.
///
/// Quoted components may contain dots themselves, so the key is walked
/// segment by segment instead of split on `.`.
fn is_valid_key(key: &str) -> bool {
    let mut rest = key.trim();
    if rest.is_empty() {
        return false;
    }

    loop {
        let segment_len = if let Some(interior) = rest.strip_prefix('"') {
            match interior.find('"') {
                Some(j) => j + 2,
                None => return false,
            }
        } else {
            let mut len = 0;
            for (i, c) in rest.char_indices() {
                let ok = if i == 0 {
                    c.is_ascii_alphabetic() || c == '_'
                } else {
                    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '\''
                };
                if !ok {
                    break;
                }
                len = i + c.len_utf8();
            }
            if len == 0 {
                return false;
            }
            len
        };

        rest = &rest[segment_len..];
        if rest.is_empty() {
            return true;
        }
        match rest.strip_prefix('.') {
            Some(r) if !r.is_empty() => rest = r,
            _ => return false,
        }
    }
}

/// Scalar literals: booleans, `null`, numbers, interpolation-free strings,
/// and path tokens.
fn is_scalar_literal(value: &str) -> bool {
    match value {
        "true" | "false" | "null" => return true,
        _ => {}
    }

    if is_number(value) {
        return true;
    }

    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return string_interior_is_plain(&value[1..value.len() - 1]);
    }

    if value.len() >= 2 && value.starts_with('<') && value.ends_with('>') {
        return !value.contains(char::is_whitespace);
    }

    if !value.contains(char::is_whitespace)
        && (value.starts_with("./") || value.starts_with("../") || value.starts_with('/'))
    {
        return true;
    }

    false
}

fn is_number(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() {
        return false;
    }
    let mut dots = 0;
    for c in digits.chars() {
        match c {
            '0'..='9' => {}
            '.' => dots += 1,
            _ => return false,
        }
    }
    dots <= 1 && !digits.starts_with('.') && !digits.ends_with('.')
}

/// A plain string interior has no interpolation and no early closer.
fn string_interior_is_plain(interior: &str) -> bool {
    let chars: Vec<char> = interior.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '"' => return false,
            '$' if chars.get(i + 1) == Some(&'{') => return false,
            _ => {}
        }
        i += 1;
    }
    true
}
