//! Locked file I/O
//!
//! Shim files are shared between every plugin and version that exposes the
//! same executable name, so updates go through [`update_locked`], which holds
//! an exclusive advisory lock across the whole read-modify-write.

use std::fs::{self, OpenOptions, Permissions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Read-modify-write a file under an exclusive lock.
///
/// The file is created with `mode` if missing (an empty string is passed to
/// `update` in that case). When `update` returns `Some`, the file is
/// truncated and rewritten in place, and `mode` is applied again. When it
/// returns `None` the file is left untouched, including its mtime.
///
/// The lock is taken on the target file itself and the content is written
/// through the same handle, so every writer serialises on one inode.
///
/// Returns `true` if the file was written. Errors from `update` are passed
/// through unchanged; I/O and lock failures are converted into `E`.
pub fn update_locked<F, E>(path: &Path, mode: u32, update: F) -> std::result::Result<bool, E>
where
    F: FnOnce(&str) -> std::result::Result<Option<String>, E>,
    E: From<Error>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .mode(mode)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.lock_exclusive()
        .map_err(|_| Error::LockFailed { path: path.to_path_buf() })?;

    // Read through the locked handle to avoid a TOCTOU race
    let mut current = String::new();
    file.read_to_string(&mut current)
        .map_err(|e| Error::io(path, e))?;

    let written = match update(&current)? {
        Some(content) if content != current => {
            file.seek(SeekFrom::Start(0))
                .map_err(|e| Error::io(path, e))?;
            file.set_len(0).map_err(|e| Error::io(path, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| Error::io(path, e))?;
            file.sync_all().map_err(|e| Error::io(path, e))?;
            file.set_permissions(Permissions::from_mode(mode))
                .map_err(|e| Error::io(path, e))?;
            true
        }
        _ => false,
    };

    file.unlock()
        .map_err(|_| Error::LockFailed { path: path.to_path_buf() })?;

    Ok(written)
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Whether any execute bit is set on a regular file at `path`.
pub fn is_executable_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
