//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `WriteFailure` and `CliError` to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use sysconf::{WriteFailure, WriteFailureReason};
use thiserror::Error;

/// Structured exit codes for sysconf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Key not found and no default given.
    NotFound = 4,

    /// The config file or directory is not writable, or the config is
    /// marked read-only.
    ///
    /// Scripts should fix ownership or remove `config_is_read_only`.
    PermissionDenied = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Failures raised by the CLI itself rather than the library.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Config key '{0}' is not set")]
    KeyNotFound(String),

    #[error("Invalid {expected} value '{value}'")]
    InvalidValue {
        expected: &'static str,
        value: String,
    },
}

impl From<&WriteFailure> for ExitCode {
    fn from(err: &WriteFailure) -> Self {
        match err.reason() {
            WriteFailureReason::PermissionDenied | WriteFailureReason::ReadOnly => {
                ExitCode::PermissionDenied
            }
            WriteFailureReason::Io => ExitCode::GeneralError,
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::KeyNotFound(_) => ExitCode::NotFound,
            CliError::InvalidValue { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes and remedies.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;

    /// Remedy to print after the error message, if any.
    fn hint(&self) -> Option<&'static str>;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(write_err) = cause.downcast_ref::<WriteFailure>() {
                return ExitCode::from(write_err);
            }
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
        }
        ExitCode::GeneralError
    }

    fn hint(&self) -> Option<&'static str> {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<WriteFailure>())
            .map(WriteFailure::hint)
    }
}
