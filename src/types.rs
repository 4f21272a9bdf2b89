use std::path::PathBuf;

use serde::Serialize;

/// A function definition recovered from MATLAB source text.
///
/// `start`/`end` are half-open byte offsets into the scanned text; the
/// reserved sentinel `start == end == 0` marks a builtin tag, which has no
/// real definition site. `children` holds subfunctions by textual
/// containment. MATLAB subfunction scope is flat at runtime, so the tree is
/// an outline convenience, not a scope claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionTag {
    pub name: String,
    pub return_names: Vec<String>,
    pub arg_names: Vec<String>,
    pub docstring: Option<String>,
    pub is_builtin: bool,
    pub start: usize,
    pub end: usize,
    pub children: Vec<FunctionTag>,
}

/// Flat scanner output: one record per matched header, ordered by `start`.
///
/// For builtins `arg_names` is empty because the arguments are unknown, not
/// because the function takes none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub start: usize,
    pub end: usize,
    pub return_names: Vec<String>,
    pub name: String,
    pub arg_names: Vec<String>,
    pub docstring: Option<String>,
    pub is_builtin: bool,
}

impl RawRecord {
    /// Promote a record to a tree node with the given subfunctions.
    pub fn into_tag(self, children: Vec<FunctionTag>) -> FunctionTag {
        FunctionTag {
            name: self.name,
            return_names: self.return_names,
            arg_names: self.arg_names,
            docstring: self.docstring,
            is_builtin: self.is_builtin,
            start: self.start,
            end: self.end,
            children,
        }
    }
}

/// Knobs for a single parse. Injected by the caller; the scanner reads
/// nothing from the environment.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether function bodies are `end`-terminated in this dialect.
    pub functions_have_end: bool,
    /// Directories under which doc-only builtin files are expected to live.
    pub system_roots: Vec<PathBuf>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            functions_have_end: true,
            system_roots: Vec::new(),
        }
    }
}
