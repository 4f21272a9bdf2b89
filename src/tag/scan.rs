use std::path::Path;

use crate::tag::{extent, header};
use crate::types::{ParseOptions, RawRecord};

/// Produce the flat, start-ordered record list for one source text.
///
/// Matching resumes just after each header's logical line, not after the
/// resolved extent: subfunction headers inside a parent's body are collected
/// here and reconciled into a tree by the nesting builder. The builtin
/// branch short-circuits: a doc-only file yields exactly one record.
pub fn scan(text: &str, path: &Path, options: &ParseOptions) -> Vec<RawRecord> {
    if let Some(builtin) = header::builtin_record(text, path, &options.system_roots) {
        return vec![builtin];
    }

    let mut records = Vec::new();
    let mut pos = 0;
    while let Some(h) = header::next_header(text, pos) {
        let header::HeaderMatch {
            start,
            line_end,
            return_clause,
            name,
            arg_clause,
        } = h;
        let end = extent::resolve(text, start, options.functions_have_end);
        records.push(RawRecord {
            start,
            end,
            return_names: header::identifiers(&return_clause),
            name,
            arg_names: header::identifiers(&arg_clause),
            docstring: header::docstring(text, line_end),
            is_builtin: false,
        });
        pos = line_end;
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scan_default(text: &str) -> Vec<RawRecord> {
        scan(text, Path::new("test.m"), &ParseOptions::default())
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(scan_default("").is_empty());
        assert!(scan_default("x = 1;\n").is_empty());
    }

    #[test]
    fn records_ordered_by_start() {
        let text = "function a()\nend\nfunction b()\nend\nfunction c()\nend\n";
        let records = scan_default(text);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(records.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn subfunction_scanned_independently_of_parent_extent() {
        let text = "function outer()\nfunction inner()\nend\nend\n";
        let records = scan_default(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "outer");
        assert_eq!(records[1].name, "inner");
        assert!(records[1].start < records[0].end);
    }

    #[test]
    fn docstring_attached_to_its_function() {
        let text = "function y = foo(a)\n%FOO Computes foo.\nend\nfunction bar()\nend\n";
        let records = scan_default(text);
        assert_eq!(records[0].docstring.as_deref(), Some("Computes foo."));
        assert_eq!(records[1].docstring, None);
    }

    #[test]
    fn builtin_branch_stops_the_scan() {
        let options = ParseOptions {
            functions_have_end: true,
            system_roots: vec![PathBuf::from("/opt/matlab")],
        };
        let text = "%SIN Sine of argument in radians.\n%   more prose\n";
        let records = scan(text, Path::new("/opt/matlab/toolbox/sin.m"), &options);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_builtin);
        assert_eq!(records[0].name, "sin");
    }

    #[test]
    fn clauses_tokenized() {
        let text = "function [s, e] = span(x, y)\nend\n";
        let records = scan_default(text);
        assert_eq!(records[0].return_names, ["s", "e"]);
        assert_eq!(records[0].arg_names, ["x", "y"]);
    }

    #[test]
    fn unbalanced_body_gets_text_end_extent() {
        let text = "function f(x)\nif x\ny = 1;\n";
        let records = scan_default(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].end, text.len());
    }
}
