//! File loading for the CLI. The core parser works on in-memory text; this
//! is the only place that reads source content from disk.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use memmap2::Mmap;

use crate::error::{self, HarrowError};

/// Read a source file into memory, returning its text and mtime.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_source(path: &Path) -> Result<(String, SystemTime), HarrowError> {
    let meta = fs::metadata(path).map_err(|e| error::from_io(path, e))?;
    let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    // mapping a 0-byte file can fail on some platforms
    if meta.len() == 0 {
        return Ok((String::new(), mtime));
    }

    let file = fs::File::open(path).map_err(|e| error::from_io(path, e))?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| error::from_io(path, e))?;
    Ok((String::from_utf8_lossy(&mmap[..]).into_owned(), mtime))
}
