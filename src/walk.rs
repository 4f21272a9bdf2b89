//! MATLAB source discovery for directory arguments.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

// Directories never worth descending into: VCS internals and
// MATLAB/Simulink build output.
pub(crate) const SKIP_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "slprj",
    "sfprj",
    "codegen",
    ".SimulinkProject",
    ".buildtool",
    "node_modules",
];

/// Collect `.m` files under `scope`, sorted by path. Hidden files stay
/// visible and .gitignore is not consulted, so locally-relevant sources are
/// found even when ignored.
pub fn matlab_files(scope: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(scope)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .filter_entry(|entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                if let Some(name) = entry.file_name().to_str() {
                    return !SKIP_DIRS.contains(&name);
                }
            }
            true
        })
        .build()
        .filter_map(|entry| {
            let entry = entry.ok()?;
            if !entry.file_type()?.is_file() {
                return None;
            }
            let path = entry.into_path();
            let is_matlab = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("m"));
            is_matlab.then_some(path)
        })
        .collect();
    files.sort();
    files
}
