//! Layered system configuration for server applications.
//!
//! This crate loads a primary PHP-array config file plus `*.<primary>`
//! fragment files from one directory, merges them into an ordered cache,
//! resolves reads through `NC_`-prefixed environment overrides, and writes
//! changes back to the primary file atomically.
//!
//! ```rust,ignore
//! let mut store = sysconf::ConfigStore::load("/var/www/config", "config.php");
//! let host = store.get_value_or("dbhost", "localhost");
//! store.set_value("maintenance", true)?;
//! ```

pub mod constants;
pub mod format;
pub mod persistence;
pub mod store;
pub mod value;

pub use persistence::{ConfigWriter, WriteFailure, WriteFailureReason};
pub use store::{ConfigSource, ConfigStore, ConfigStoreBuilder, FsSource};
pub use value::{ConfigMap, ConfigValue};
