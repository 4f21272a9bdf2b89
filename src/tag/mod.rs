//! Function-tag extraction: pattern-matched headers assembled into a
//! positional containment tree. No grammar and no AST, just heuristics over
//! raw text, degrading to wider extents or an empty outline instead of
//! failing.

pub mod extent;
pub mod header;
pub mod nest;
pub mod scan;

use std::path::Path;

use crate::types::{FunctionTag, ParseOptions};

/// Parse one immutable snapshot of MATLAB source text into an ordered list
/// of root tags. Fail-soft: malformed or truncated input produces a
/// best-effort (possibly empty) outline, never an error.
pub fn parse(text: &str, path: &Path, options: &ParseOptions) -> Vec<FunctionTag> {
    let records = scan::scan(text, path, options);
    nest::forest(&records, text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_default(text: &str) -> Vec<FunctionTag> {
        parse(text, Path::new("test.m"), &ParseOptions::default())
    }

    fn check_invariants(tag: &FunctionTag, text_len: usize) {
        if !tag.is_builtin {
            assert!(tag.start < tag.end, "{}: start < end", tag.name);
            assert!(tag.end <= text_len, "{}: end within text", tag.name);
        }
        for child in &tag.children {
            assert!(tag.start <= child.start, "{} contains {}", tag.name, child.name);
            assert!(child.end <= tag.end, "{} contains {}", tag.name, child.name);
            check_invariants(child, text_len);
        }
        for pair in tag.children.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end <= pair[1].start, "siblings do not overlap");
        }
    }

    #[test]
    fn single_function_with_docstring() {
        let text = "function y = foo(a,b)\n%FOO Computes foo.\ny = a + b;\nend\n";
        let tags = parse_default(text);
        assert_eq!(tags.len(), 1);
        let tag = &tags[0];
        assert_eq!(tag.name, "foo");
        assert_eq!(tag.return_names, ["y"]);
        assert_eq!(tag.arg_names, ["a", "b"]);
        assert_eq!(tag.docstring.as_deref(), Some("Computes foo."));
        assert!(!tag.is_builtin);
        assert!(tag.children.is_empty());
        check_invariants(tag, text.len());
    }

    #[test]
    fn builtin_doc_only_file() {
        let options = ParseOptions {
            functions_have_end: true,
            system_roots: vec![PathBuf::from("/opt/matlab")],
        };
        let text = "%BAR Short description\n";
        let tags = parse(text, Path::new("/opt/matlab/toolbox/bar.m"), &options);
        assert_eq!(tags.len(), 1);
        let tag = &tags[0];
        assert_eq!(tag.name, "bar");
        assert!(tag.is_builtin);
        assert_eq!((tag.start, tag.end), (0, 0));
        assert!(tag.arg_names.is_empty());
        assert_eq!(tag.docstring.as_deref(), Some("Short description"));
        assert!(tag.children.is_empty());
    }

    #[test]
    fn subfunction_becomes_child() {
        let text = "function outer()\nx = 1;\nfunction inner(k)\ny = k;\nend\nend\n";
        let tags = parse_default(text);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "outer");
        assert_eq!(tags[0].children.len(), 1);
        let inner = &tags[0].children[0];
        assert_eq!(inner.name, "inner");
        assert!(tags[0].start <= inner.start && inner.end <= tags[0].end);
        check_invariants(&tags[0], text.len());
    }

    #[test]
    fn sibling_functions_stay_roots() {
        let text = "function a()\nx = 1;\nend\nfunction b()\ny = 2;\nend\n";
        let tags = parse_default(text);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "a");
        assert_eq!(tags[1].name, "b");
        assert!(tags.iter().all(|t| t.children.is_empty()));
        for tag in &tags {
            check_invariants(tag, text.len());
        }
    }

    #[test]
    fn unbalanced_body_still_yields_a_tag() {
        let text = "function f(x)\nif x\ny = 1;\n";
        let tags = parse_default(text);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].end, text.len());
    }

    #[test]
    fn reparse_is_idempotent() {
        let text = "function a()\nfunction b()\nend\nend\nfunction c(q)\nend\n";
        let first = parse_default(text);
        let second = parse_default(text);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_and_headerless_text() {
        assert!(parse_default("").is_empty());
        assert!(parse_default("x = 1;\n% comment\n").is_empty());
    }

    #[test]
    fn script_dialect_siblings() {
        let options = ParseOptions {
            functions_have_end: false,
            system_roots: Vec::new(),
        };
        let text = "function a()\nx = 1;\nfunction b()\ny = 2;\n";
        let tags = parse(text, Path::new("test.m"), &options);
        assert_eq!(tags.len(), 2);
        assert!(tags[0].children.is_empty());
        assert_eq!(tags[0].end, text.find("function b").unwrap());
    }
}
