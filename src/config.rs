//! System-root and dialect configuration. Three sources in decreasing
//! precedence: `--system-root` flags, the `HARROW_MATLAB_PATH` environment
//! variable, and a `harrow.toml` discovered by walking up from the target.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::ParseOptions;

pub const CONFIG_FILE: &str = "harrow.toml";
const ROOTS_ENV: &str = "HARROW_MATLAB_PATH";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    pub system_roots: Vec<PathBuf>,
    pub functions_have_end: Option<bool>,
}

/// Assemble `ParseOptions` for a run targeting `target`.
pub fn resolve(flag_roots: &[PathBuf], no_end_flag: bool, target: &Path) -> ParseOptions {
    let file_config = discover(target).and_then(|p| load(&p)).unwrap_or_default();

    let system_roots = if !flag_roots.is_empty() {
        flag_roots.to_vec()
    } else if let Some(env_roots) = parse_env_roots(std::env::var_os(ROOTS_ENV).as_deref()) {
        env_roots
    } else {
        file_config.system_roots
    };

    let functions_have_end = if no_end_flag {
        false
    } else {
        file_config.functions_have_end.unwrap_or(true)
    };

    ParseOptions {
        functions_have_end,
        system_roots,
    }
}

/// Split a PATH-style variable into root directories.
fn parse_env_roots(raw: Option<&OsStr>) -> Option<Vec<PathBuf>> {
    let raw = raw?;
    let roots: Vec<PathBuf> = std::env::split_paths(raw)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    (!roots.is_empty()).then_some(roots)
}

/// Walk up from `start` (or its parent, for files) looking for the config
/// file. Returns the path of the nearest one.
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_dir() { start } else { start.parent()? };
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Parse a config file. Unreadable or malformed files are ignored.
pub fn load(path: &Path) -> Option<FileConfig> {
    let raw = fs::read_to_string(path).ok()?;
    toml::from_str(&raw).ok()
}
