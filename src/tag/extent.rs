//! Textual extent of a function definition.
//!
//! With `end`-terminated bodies the resolver runs a balanced keyword skip;
//! without them a definition runs to the next header. Structural failures
//! never propagate: an unbalanced body resolves to end-of-text and the scan
//! keeps moving.

use crate::tag::header;

/// Block-opening keywords. Each is closed by a matching `end`.
const BLOCK_OPENERS: &[&str] = &["function", "if", "for", "while", "switch", "try", "parfor"];

/// Resolve the end offset for the function whose header starts at
/// `header_start`.
pub fn resolve(text: &str, header_start: usize, functions_have_end: bool) -> usize {
    if header_start >= text.len() {
        return text.len();
    }
    if functions_have_end {
        balanced_skip(text, header_start).unwrap_or(text.len())
    } else {
        end_of_defun(text, header_start)
    }
}

/// Without explicit terminators a definition runs to the start of the next
/// header line, or to end of text.
fn end_of_defun(text: &str, header_start: usize) -> usize {
    let bytes = text.as_bytes();
    let line_end = memchr::memchr(b'\n', &bytes[header_start..])
        .map_or(text.len(), |i| header_start + i + 1);
    match header::next_header(text, line_end) {
        Some(next) => next.start,
        None => text.len(),
    }
}

/// Balanced `end` skip. Returns the offset just past the `end` keyword that
/// brings the block depth back to zero, or `None` when the text runs out
/// first (unbalanced input).
fn balanced_skip(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut in_block_comment = false;
    let mut pos = start;
    while pos < text.len() {
        let line_end = memchr::memchr(b'\n', &bytes[pos..]).map_or(text.len(), |i| pos + i);
        let line = &text[pos..line_end];
        let trimmed = line.trim();
        if in_block_comment {
            if trimmed == "%}" {
                in_block_comment = false;
            }
        } else if trimmed == "%{" {
            in_block_comment = true;
        } else if let Some(offset) = scan_line(line, &mut depth) {
            return Some(pos + offset);
        }
        pos = line_end + 1;
    }
    None
}

/// Scan one line's tokens, updating block depth. Returns the in-line offset
/// just past the `end` keyword that zeroes the depth, if any.
///
/// `%` comments and quoted strings are skipped; `end` inside parens,
/// brackets, or braces is an array subscript; a word after `.` is a struct
/// field. `arguments` only opens a block as the first word of a line.
fn scan_line(line: &str, depth: &mut i32) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut group: i32 = 0;
    let mut prev: u8 = b' '; // last significant byte seen
    let mut first_word = true;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b'%' => break,
            b'\'' if !is_value_end(prev) => {
                // string literal; '' is an escaped quote
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == b'\'' {
                        if bytes.get(i + 1) == Some(&b'\'') {
                            i += 2;
                            continue;
                        }
                        break;
                    }
                    i += 1;
                }
                i += 1;
                prev = b'\'';
                continue;
            }
            b'"' => {
                // string literal; "" is an escaped quote
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == b'"' {
                        if bytes.get(i + 1) == Some(&b'"') {
                            i += 2;
                            continue;
                        }
                        break;
                    }
                    i += 1;
                }
                i += 1;
                prev = b'"';
                continue;
            }
            b'(' | b'[' | b'{' => {
                group += 1;
                prev = c;
                first_word = false;
                i += 1;
                continue;
            }
            b')' | b']' | b'}' => {
                group -= 1;
                prev = c;
                first_word = false;
                i += 1;
                continue;
            }
            _ => {}
        }
        if c == b'_' || c.is_ascii_alphabetic() {
            let word_start = i;
            while i < bytes.len() && (bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric()) {
                i += 1;
            }
            let word = &line[word_start..i];
            let is_field = prev == b'.';
            if !is_field {
                if word == "end" {
                    if group == 0 {
                        *depth -= 1;
                        if *depth == 0 {
                            return Some(i);
                        }
                    }
                } else if BLOCK_OPENERS.contains(&word) || (word == "arguments" && first_word) {
                    *depth += 1;
                }
            }
            prev = bytes[i - 1];
            first_word = false;
            continue;
        }
        if !c.is_ascii_whitespace() {
            prev = c;
            first_word = false;
        }
        i += 1;
    }
    None
}

/// Bytes that end a value. A quote right after one is the transpose
/// operator, not a string opener.
fn is_value_end(prev: u8) -> bool {
    prev == b')' || prev == b']' || prev == b'}' || prev == b'.' || prev == b'_'
        || prev.is_ascii_alphanumeric()
}
