//! CLI-layer errors. The tag scanner itself is total; only file access can
//! fail, and those failures carry enough context to be actionable.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum HarrowError {
    NotFound {
        path: PathBuf,
        suggestion: Option<String>,
    },
    PermissionDenied {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
}

impl fmt::Display for HarrowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path, suggestion } => {
                write!(f, "not found: {}", path.display())?;
                if let Some(name) = suggestion {
                    write!(f, " (did you mean {name}?)")?;
                }
                Ok(())
            }
            Self::PermissionDenied { path } => {
                write!(f, "permission denied: {}", path.display())
            }
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for HarrowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Map an `io::Error` hit while accessing `path` to the matching variant.
pub fn from_io(path: &Path, err: io::Error) -> HarrowError {
    match err.kind() {
        io::ErrorKind::NotFound => HarrowError::NotFound {
            path: path.to_path_buf(),
            suggestion: suggest_similar(path),
        },
        io::ErrorKind::PermissionDenied => HarrowError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => HarrowError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

/// Did-you-mean: the closest sibling file name within edit distance 2,
/// same-extension candidates preferred.
fn suggest_similar(path: &Path) -> Option<String> {
    let parent = path.parent()?;
    let name = path.file_name()?.to_str()?;
    let ext = path.extension();

    let mut best: Option<(usize, bool, String)> = None;
    for entry in fs::read_dir(parent).ok()?.flatten() {
        let candidate = entry.file_name().to_string_lossy().into_owned();
        if candidate == name {
            continue;
        }
        let dist = edit_distance(name, &candidate);
        if dist > 2 {
            continue;
        }
        let ext_mismatch = Path::new(&candidate).extension() != ext;
        let better = match &best {
            Some((d, m, _)) => (dist, ext_mismatch) < (*d, *m),
            None => true,
        };
        if better {
            best = Some((dist, ext_mismatch, candidate));
        }
    }
    best.map(|(_, _, candidate)| candidate)
}

/// Levenshtein distance, single-row form. Inputs are short file names.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub = diag + usize::from(ca != cb);
            diag = row[j + 1];
            row[j + 1] = sub.min(diag + 1).min(row[j] + 1);
        }
    }
    row[b.len()]
}
