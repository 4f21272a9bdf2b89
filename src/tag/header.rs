//! Header and doc-comment matching. All pattern work lives here: the
//! `function` header regex, the builtin doc-header recognizer, the clause
//! tokenizer, and the three-tier docstring heuristics.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::RawRecord;

/// A `function` header. The return clause is optional and either a single
/// identifier or a bracketed list; `...` continuations mean dots and
/// newlines count as inter-token filler.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*function\b[ \t\r\n.]*(?:(\[[^\]]*\]|[A-Za-z_][A-Za-z0-9_]*)[ \t\r\n.]*=[ \t\r\n.]*)?([A-Za-z_][A-Za-z0-9_]*)",
    )
    .unwrap()
});

/// Uppercase-tag doc comment: `%NAME description`.
static TAG_DOC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*%([A-Z][A-Z0-9_]*)[ \t]+(\S.*)").unwrap());

/// Plain doc comment, whitespace between marker and text: `%  description`.
static PLAIN_DOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*%[ \t]+(\S.*)").unwrap());

/// A matched function header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Offset of the start of the header's line.
    pub start: usize,
    /// Offset just past the header's logical line, continuations included.
    pub line_end: usize,
    /// Raw text of the output-variable clause; empty when absent.
    pub return_clause: String,
    /// Function name as declared.
    pub name: String,
    /// Raw text between the name and the end of the logical line.
    pub arg_clause: String,
}

/// Find the next `function` header at or after `from`.
///
/// `from` must sit on a line boundary; the scanner only ever resumes at the
/// start of the line following a previous match.
pub fn next_header(text: &str, from: usize) -> Option<HeaderMatch> {
    let hay = text.get(from..)?;
    let caps = HEADER_RE.captures(hay)?;
    let whole = caps.get(0)?;
    let name = caps.get(2)?;
    let (line_end, arg_clause) = logical_line_rest(text, from + name.end());
    Some(HeaderMatch {
        start: from + whole.start(),
        line_end,
        return_clause: caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        name: name.as_str().to_string(),
        arg_clause,
    })
}

/// Collect the remainder of a logical line starting at `from`. Trailing `%`
/// comments are cut, and a `...` marker discards the rest of its physical
/// line and folds the next one in. Returns the offset just past the logical
/// line and the collected text.
fn logical_line_rest(text: &str, from: usize) -> (usize, String) {
    let bytes = text.as_bytes();
    let mut clause = String::new();
    let mut pos = from;
    loop {
        let nl = memchr::memchr(b'\n', &bytes[pos..]);
        let line_end = nl.map_or(text.len(), |i| pos + i);
        let mut line = &text[pos..line_end];
        if let Some(i) = line.find('%') {
            line = &line[..i];
        }
        match line.find("...") {
            Some(i) => {
                clause.push_str(&line[..i]);
                clause.push(' ');
            }
            None => {
                clause.push_str(line);
                let end = match nl {
                    Some(_) => line_end + 1,
                    None => text.len(),
                };
                return (end, clause);
            }
        }
        match nl {
            Some(_) => pos = line_end + 1,
            None => return (text.len(), clause),
        }
    }
}

/// Split a raw return/argument clause into identifier tokens. Brackets,
/// parens, braces, commas, equals signs, dots, semicolons, tildes, and
/// whitespace all separate; empty tokens are dropped.
pub fn identifiers(clause: &str) -> Vec<String> {
    clause
        .split(|c: char| {
            c.is_whitespace()
                || matches!(
                    c,
                    '[' | ']' | '(' | ')' | '{' | '}' | ',' | '=' | '.' | ';' | '~'
                )
        })
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract a one-line docstring from the text following a header line.
///
/// Three heuristics, first match wins:
/// 1. an uppercase-tag comment on the next line: `%NAME description`
/// 2. a plain comment with space after the marker: `%  description`
/// 3. skip blank lines; if the first non-blank line is a comment, take it
pub fn docstring(text: &str, from: usize) -> Option<String> {
    let rest = text.get(from..)?;
    let mut lines = rest.lines();
    let first = lines.next()?;

    if let Some(caps) = TAG_DOC_RE.captures(first) {
        return non_empty(caps[2].trim());
    }
    if let Some(caps) = PLAIN_DOC_RE.captures(first) {
        return non_empty(caps[1].trim());
    }

    for line in std::iter::once(first).chain(lines) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        return match trimmed.strip_prefix('%') {
            Some(comment) => non_empty(comment.trim_start_matches('%').trim()),
            None => None,
        };
    }
    None
}

/// Recognize a doc-only builtin file: it must live under one of the
/// configured system roots, contain no `function` header at all, and open
/// (after blank lines) with an uppercase `%NAME description` header.
///
/// The record carries the sentinel extent `0..0` and a lowercased name.
pub fn builtin_record(text: &str, path: &Path, system_roots: &[PathBuf]) -> Option<RawRecord> {
    if !system_roots.iter().any(|root| path.starts_with(root)) {
        return None;
    }
    if next_header(text, 0).is_some() {
        return None;
    }
    let first = text.lines().find(|line| !line.trim().is_empty())?;
    let caps = TAG_DOC_RE.captures(first)?;
    Some(RawRecord {
        start: 0,
        end: 0,
        return_names: Vec::new(),
        name: caps[1].to_lowercase(),
        arg_names: Vec::new(),
        docstring: non_empty(caps[2].trim()),
        is_builtin: true,
    })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
