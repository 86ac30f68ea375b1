// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking file operations on the backing file.
//!
//! These run on tokio's blocking pool, always under the store's lock.

use std::io::Write;
use std::path::Path;

use shelf_core::{Item, ShelfError};
use tempfile::NamedTempFile;
use tracing::error;

use crate::codec;

fn io_err(path: &Path, source: std::io::Error) -> ShelfError {
    ShelfError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Directory the backing file lives in (`.` for a bare file name).
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Create the parent directory and an empty collection if the file is missing.
///
/// Returns `true` if the file was created. An existing file is never touched.
pub(crate) fn ensure_initialized(path: &Path) -> Result<bool, ShelfError> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    if path.try_exists().map_err(|e| io_err(path, e))? {
        return Ok(false);
    }
    write_items(path, &[])?;
    Ok(true)
}

/// Read and decode the full collection.
pub(crate) fn read_items(path: &Path) -> Result<Vec<Item>, ShelfError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    codec::decode(&bytes).map_err(|e| {
        error!(path = %path.display(), error = %e, "item store file is corrupt");
        ShelfError::Corruption {
            path: path.to_path_buf(),
            source: Box::new(e),
        }
    })
}

/// Encode the full collection and atomically replace the file with it.
pub(crate) fn write_items(path: &Path, items: &[Item]) -> Result<(), ShelfError> {
    let bytes = codec::encode(items)
        .map_err(|e| ShelfError::Internal(format!("failed to encode item collection: {e}")))?;
    write_atomic(path, &bytes)
}

/// Write to a temp file in the target's directory, fsync it, then rename it
/// over the target. On failure the temp file is removed and the target is
/// left as it was.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ShelfError> {
    let dir = parent_dir(path);
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_err(dir, e))?;
    tmp.write_all(bytes).map_err(|e| io_err(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| io_err(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| io_err(path, e.error))?;

    // Make the rename itself durable.
    #[cfg(unix)]
    std::fs::File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| io_err(dir, e))?;

    Ok(())
}
