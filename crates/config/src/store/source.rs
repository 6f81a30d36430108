//! Access to the configuration directory.
//!
//! Responsibilities:
//! - List candidate file names in the config directory.
//! - Read individual config files.
//!
//! Does NOT handle:
//! - Parsing (see `format`) or fragment selection (see `ConfigStore`).
//!
//! Invariants:
//! - `list_dir` returns bare file names, not paths.
//! - Readers take a shared lock so they never observe an in-place rewrite
//!   that is still in progress.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Directory listing and file reading used when loading the store.
///
/// The store only ever reads through this trait, so tests can substitute an
/// in-memory implementation.
pub trait ConfigSource: Send + Sync {
    /// Names of the regular files in `dir`, in any order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Full content of the file at `path`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// `ConfigSource` backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ConfigSource for FsSource {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            // Follows symlinks, like a shell glob would.
            if !entry.path().is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path)?;
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Could not acquire a shared lock on the config file, reading anyway"
            );
        }
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }
}
