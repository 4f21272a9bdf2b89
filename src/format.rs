use std::fmt::Write;
use std::path::Path;

use crate::types::FunctionTag;

/// One-line prototype: `name (args)`, with a builtin marker and
/// "arguments unavailable" when the definition site is doc-only.
pub fn prototype(tag: &FunctionTag) -> String {
    if tag.is_builtin {
        format!("{} [builtin] (arguments unavailable)", tag.name)
    } else {
        format!("{} ({})", tag.name, tag.arg_names.join(", "))
    }
}

/// Render the outline block for one file:
/// `# path (N functions)`, then one line per tag with its 1-based line
/// number, nesting indent, prototype, and docstring.
pub fn render_outline(path: &Path, text: &str, tags: &[FunctionTag]) -> String {
    let total = count_tags(tags);
    let noun = if total == 1 { "function" } else { "functions" };
    let header = format!("# {} ({total} {noun})", path.display());
    if tags.is_empty() {
        return header;
    }
    let mut entries = Vec::new();
    collect_entries(&mut entries, text, tags, 0);
    format!("{header}\n\n{}", entries.join("\n"))
}

fn collect_entries(entries: &mut Vec<String>, text: &str, tags: &[FunctionTag], depth: usize) {
    for tag in tags {
        let line = line_number(text, tag.start);
        let indent = "  ".repeat(depth);
        let mut entry = format!("[{line}] {indent}{}", prototype(tag));
        if let Some(doc) = &tag.docstring {
            let _ = write!(entry, "  % {doc}");
        }
        entries.push(entry);
        collect_entries(entries, text, &tag.children, depth + 1);
    }
}

/// Total number of tags in the forest, subfunctions included.
pub fn count_tags(tags: &[FunctionTag]) -> usize {
    tags.iter().map(|t| 1 + count_tags(&t.children)).sum()
}

/// 1-based line number of a byte offset.
pub fn line_number(text: &str, offset: usize) -> usize {
    let clamped = offset.min(text.len());
    memchr::memchr_iter(b'\n', text[..clamped].as_bytes()).count() + 1
}
