//! Rendered-outline cache for directory mode. Keyed by path, invalidated by
//! mtime; concurrent because directory outlining fans out over rayon.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use dashmap::DashMap;

pub struct OutlineCache {
    entries: DashMap<PathBuf, (SystemTime, String)>,
}

impl Default for OutlineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the cached rendering for `path` if its mtime is unchanged,
    /// otherwise compute, store, and return a fresh one.
    pub fn get_or_compute(
        &self,
        path: &Path,
        mtime: SystemTime,
        compute: impl FnOnce() -> String,
    ) -> String {
        if let Some(entry) = self.entries.get(path) {
            let (stored_mtime, rendered) = entry.value();
            if *stored_mtime == mtime {
                return rendered.clone();
            }
        }
        let rendered = compute();
        self.entries
            .insert(path.to_path_buf(), (mtime, rendered.clone()));
        rendered
    }
}
