//! Error type for configuration writes.
//!
//! Responsibilities:
//! - Define `WriteFailure`, the only error the store returns.
//! - Classify I/O errors into permission problems and everything else.
//!
//! Invariants:
//! - Every variant carries the destination path.
//! - OS errors are kept as `#[source]` for diagnostics.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Persisting the configuration failed. The destination file is unchanged.
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error("Cannot write into config directory or file at {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config at {path} is set to be read-only via option 'config_is_read_only'")]
    ReadOnly { path: PathBuf },

    #[error("Failed to write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of a `WriteFailure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailureReason {
    PermissionDenied,
    ReadOnly,
    Io,
}

impl WriteFailure {
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
                WriteFailure::PermissionDenied {
                    path: path.to_path_buf(),
                    source,
                }
            }
            _ => WriteFailure::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub fn reason(&self) -> WriteFailureReason {
        match self {
            WriteFailure::PermissionDenied { .. } => WriteFailureReason::PermissionDenied,
            WriteFailure::ReadOnly { .. } => WriteFailureReason::ReadOnly,
            WriteFailure::Io { .. } => WriteFailureReason::Io,
        }
    }

    /// The file that could not be written.
    pub fn path(&self) -> &Path {
        match self {
            WriteFailure::PermissionDenied { path, .. }
            | WriteFailure::ReadOnly { path }
            | WriteFailure::Io { path, .. } => path,
        }
    }

    /// A remedy suitable for showing to an administrator.
    pub fn hint(&self) -> &'static str {
        match self {
            WriteFailure::PermissionDenied { .. } => {
                "This can usually be fixed by giving the server process write access to the config directory and file."
            }
            WriteFailure::ReadOnly { .. } => {
                "Remove the 'config_is_read_only' option from the config file to allow changes."
            }
            WriteFailure::Io { .. } => "Check that the config directory exists and has free space.",
        }
    }
}
