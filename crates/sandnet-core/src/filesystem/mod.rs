//! Filesystem primitives for sandbox artifacts.
//!
//! Three operations with fixed permission bits: idempotent directory
//! creation, truncate-and-write, and read-all-then-write copy. None of them
//! rename atomically; a rerun simply overwrites in place.

use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::Path;

/// Creates `path` and any missing ancestors with `mode`.
///
/// Succeeds if the directory already exists.
///
/// # Errors
///
/// Returns the underlying I/O error if creation fails.
pub fn ensure_dir(path: &Path, mode: u32) -> std::io::Result<()> {
    DirBuilder::new().recursive(true).mode(mode).create(path)?;
    tracing::debug!(path = %path.display(), mode = format!("{mode:o}"), "directory ready");
    Ok(())
}

/// Writes `contents` to `path`, truncating any existing file.
///
/// `mode` applies when the file is created.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or written.
pub fn write_file(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)?;
    file.write_all(contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

/// Copies `from` into `to` by reading the whole source first.
///
/// # Errors
///
/// Returns the underlying I/O error if the source cannot be read or the
/// destination cannot be written.
pub fn copy_file(from: &Path, to: &Path, mode: u32) -> std::io::Result<()> {
    let contents = std::fs::read(from)?;
    write_file(to, &contents, mode)
}
