//! Centralized constants for the sysconf workspace.
//!
//! This module contains default values shared by the library and the CLI.

/// Prefix of environment variables that override configuration keys.
///
/// `NC_dbhost=db.internal` overrides the `dbhost` key on read.
pub const DEFAULT_ENV_PREFIX: &str = "NC_";

/// File name of the primary configuration file.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.php";

/// Key that, when set to boolean `true`, forbids any further writes.
pub const READ_ONLY_KEY: &str = "config_is_read_only";
