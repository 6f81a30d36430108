//! Atomic writer for the primary config file.

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::constants::READ_ONLY_KEY;
use crate::format::render_config;
use crate::value::{ConfigMap, ConfigValue};

use super::WriteFailure;

/// Writes configuration maps to disk. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigWriter;

impl ConfigWriter {
    /// Replaces the content of `path` with the rendering of `config`.
    ///
    /// The destination is opened (and created if missing) before anything is
    /// written, so a missing permission is reported without side effects. An
    /// exclusive lock on the destination serializes cooperating writers.
    /// When `path` is a symlink, its target is replaced and the link kept.
    ///
    /// # Errors
    /// - `WriteFailure::ReadOnly` when `config_is_read_only` is `true`.
    /// - `WriteFailure::PermissionDenied` when the file is not writable, or
    ///   is missing and the directory forbids creating it.
    /// - `WriteFailure::Io` for any other I/O failure.
    pub fn write(path: &Path, config: &ConfigMap) -> Result<(), WriteFailure> {
        if matches!(config.get(READ_ONLY_KEY), Some(ConfigValue::Bool(true))) {
            return Err(WriteFailure::ReadOnly {
                path: path.to_path_buf(),
            });
        }

        let content = render_config(config);
        write_content(path, &content, replace_via_rename)
            .map_err(|e| WriteFailure::from_io(path, e))?;

        tracing::debug!(
            path = %path.display(),
            keys = config.len(),
            "Config saved"
        );
        Ok(())
    }
}

type ReplaceFn = fn(&Path, &File, &str) -> io::Result<()>;

/// Opens and locks the destination, then hands it to `replace`.
///
/// A destination created by this call is removed again if locking or
/// `replace` fails.
fn write_content(path: &Path, content: &str, replace: ReplaceFn) -> io::Result<()> {
    let target = resolve_target(path);
    let (destination, created) = open_destination(&target)?;
    let result = destination
        .lock()
        .and_then(|()| replace(&target, &destination, content));
    // Dropping the handle releases the lock.
    drop(destination);

    if result.is_err()
        && created
        && let Err(e) = std::fs::remove_file(&target)
    {
        tracing::warn!(
            path = %target.display(),
            error = %e,
            "Failed to remove config file created by a failed write"
        );
    }
    result
}

/// Follows a symlinked destination so the link survives and its target is
/// the file that gets replaced. Dangling links are used as given.
fn resolve_target(path: &Path) -> PathBuf {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Opens the destination for writing without truncating it. The flag is
/// `true` when the file did not exist before.
fn open_destination(path: &Path) -> io::Result<(File, bool)> {
    match OpenOptions::new().write(true).open(path) {
        Ok(file) => Ok((file, false)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            match OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(file) => Ok((file, true)),
                // Another writer created it in between.
                Err(e) if e.kind() == ErrorKind::AlreadyExists => OpenOptions::new()
                    .write(true)
                    .open(path)
                    .map(|file| (file, false)),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

/// Writes a sibling temp file and renames it over the destination.
///
/// Falls back to rewriting the locked destination in place when the
/// directory does not allow creating the temp file.
fn replace_via_rename(path: &Path, destination: &File, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = match NamedTempFile::new_in(dir) {
        Ok(temp) => temp,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            tracing::debug!(
                dir = %dir.display(),
                error = %e,
                "Config directory not writable, rewriting config file in place"
            );
            return write_in_place(destination, content);
        }
        Err(e) => return Err(e),
    };

    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    // Keep the mode of the file being replaced rather than the temp file's 0600.
    temp.as_file()
        .set_permissions(destination.metadata()?.permissions())?;

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_in_place(destination: &File, content: &str) -> io::Result<()> {
    let mut file = destination;
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.sync_all()
}
