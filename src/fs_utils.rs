//! Filesystem utilities for writing generated batch files

use std::fs;
use std::io;
use std::path::Path;

/// Write content to a file, creating parent directories if needed.
///
/// An existing file is truncated and overwritten.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, contents)
}
