//! Layered configuration store.
//!
//! Responsibilities:
//! - Load the primary config file and its `*.<primary>` fragments.
//! - Merge them into a single ordered cache (last file wins per key).
//! - Resolve reads through environment overrides, the cache, and defaults.
//! - Persist every net change to the primary file through `ConfigWriter`.
//!
//! Does NOT handle:
//! - Choosing the config directory (the caller passes it in).
//! - File format details (see `format`) or atomic writes (see `persistence`).
//!
//! Invariants:
//! - Fragments are merged in sorted file-name order after the primary file.
//! - Merging is shallow: a colliding key replaces the whole earlier value.
//! - A mutation that does not change the cache never touches the disk.
//! - The cache is only updated after the write succeeded, so memory and
//!   disk agree even when a write fails.
//! - Fragment files are never written.

mod env;
mod source;

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CONFIG_FILE_NAME, DEFAULT_ENV_PREFIX};
use crate::format::parse_config;
use crate::persistence::{ConfigWriter, WriteFailure};
use crate::value::{ConfigMap, ConfigValue, maps_equal};

pub use env::parse_bool;
pub use source::{ConfigSource, FsSource};

/// Builder for `ConfigStore`, used to inject a source or an env prefix.
pub struct ConfigStoreBuilder {
    directory: PathBuf,
    file_name: String,
    env_prefix: String,
    source: Box<dyn ConfigSource>,
}

impl ConfigStoreBuilder {
    /// Replaces the filesystem access used for loading.
    pub fn source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Changes the prefix of override variables (default `NC_`).
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Reads and merges all files. Never fails: unreadable files count as empty.
    pub fn build(self) -> ConfigStore {
        let config_path = self.directory.join(&self.file_name);
        let mut store = ConfigStore {
            directory: self.directory,
            file_name: self.file_name,
            config_path,
            env_prefix: self.env_prefix,
            source: self.source,
            cache: ConfigMap::new(),
        };
        store.reload();
        store
    }
}

/// The merged configuration of one config directory.
pub struct ConfigStore {
    directory: PathBuf,
    file_name: String,
    config_path: PathBuf,
    env_prefix: String,
    source: Box<dyn ConfigSource>,
    cache: ConfigMap,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("config_path", &self.config_path)
            .field("env_prefix", &self.env_prefix)
            .field("keys", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Loads `directory/file_name` and its fragments from the filesystem.
    pub fn load(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self::builder(directory, file_name).build()
    }

    /// Loads `directory/config.php` and its fragments.
    pub fn load_default(directory: impl Into<PathBuf>) -> Self {
        Self::load(directory, DEFAULT_CONFIG_FILE_NAME)
    }

    pub fn builder(
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> ConfigStoreBuilder {
        ConfigStoreBuilder {
            directory: directory.into(),
            file_name: file_name.into(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            source: Box::new(FsSource),
        }
    }

    /// Path of the primary file that receives all writes.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// The merged cache, without environment overrides.
    pub fn values(&self) -> &ConfigMap {
        &self.cache
    }

    /// Re-reads every file and replaces the cache.
    pub fn reload(&mut self) {
        let mut cache = self.read_file(&self.config_path).unwrap_or_default();
        for path in self.fragment_paths() {
            if let Some(fragment) = self.read_file(&path) {
                tracing::debug!(
                    path = %path.display(),
                    keys = fragment.len(),
                    "Merging config fragment"
                );
                cache.extend(fragment);
            }
        }
        self.cache = cache;
    }

    /// Fragment files `*.<file_name>` in sorted order. Hidden files are skipped.
    fn fragment_paths(&self) -> Vec<PathBuf> {
        let suffix = format!(".{}", self.file_name);
        let mut names = match self.source.list_dir(&self.directory) {
            Ok(names) => names,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        dir = %self.directory.display(),
                        error = %e,
                        "Could not list config directory, ignoring fragments"
                    );
                }
                return Vec::new();
            }
        };
        names.retain(|name| {
            name.len() > suffix.len() && name.ends_with(&suffix) && !name.starts_with('.')
        });
        names.sort();
        names
            .into_iter()
            .map(|name| self.directory.join(name))
            .collect()
    }

    fn read_file(&self, path: &Path) -> Option<ConfigMap> {
        let content = match self.source.read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config file, treating it as empty"
                );
                return None;
            }
        };
        match parse_config(&content) {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config file, treating it as empty"
                );
                None
            }
        }
    }

    /// All keys in cache order.
    pub fn keys(&self) -> Vec<String> {
        self.cache.keys().cloned().collect()
    }

    /// Resolves `key`: environment override, then cache.
    ///
    /// An override is always returned as `ConfigValue::String`, whatever the
    /// type of the cached value. A cached `NULL` reads as absent; it stays in
    /// the cache and in the file.
    pub fn get_value(&self, key: &str) -> Option<ConfigValue> {
        if let Some(value) = env::env_override(&self.env_prefix, key) {
            return Some(ConfigValue::String(value));
        }
        self.cache.get(key).filter(|value| !value.is_null()).cloned()
    }

    /// Like `get_value`, returning `default` when the key is absent.
    pub fn get_value_or(&self, key: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get_value(key).unwrap_or_else(|| default.into())
    }

    /// String value of `key`; non-string values yield `default`.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.get_value(key) {
            Some(ConfigValue::String(s)) => s,
            _ => default.to_string(),
        }
    }

    /// Boolean value of `key`. Strings such as `"true"`, `"0"` or `"off"`
    /// are interpreted; anything else yields `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get_value(key) {
            Some(ConfigValue::Bool(b)) => b,
            Some(ConfigValue::String(s)) => parse_bool(&s).unwrap_or(default),
            _ => default,
        }
    }

    /// Integer value of `key`. Numeric strings are parsed.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get_value(key) {
            Some(ConfigValue::Int(i)) => i,
            Some(ConfigValue::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Sets `key` and persists the cache, unless the value is unchanged.
    pub fn set_value(
        &mut self,
        key: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<(), WriteFailure> {
        let value = value.into();
        if self.cache.get(key) == Some(&value) {
            return Ok(());
        }
        let mut target = self.cache.clone();
        target.insert(key.to_string(), value);
        self.commit(target)
    }

    /// Applies several sets and deletions with at most one write.
    ///
    /// `None` or `Some(ConfigValue::Null)` deletes the key. Operations are
    /// applied in iteration order.
    pub fn set_values<I, K>(&mut self, changes: I) -> Result<(), WriteFailure>
    where
        I: IntoIterator<Item = (K, Option<ConfigValue>)>,
        K: Into<String>,
    {
        let mut target = self.cache.clone();
        for (key, value) in changes {
            let key = key.into();
            match value {
                None | Some(ConfigValue::Null) => {
                    target.shift_remove(&key);
                }
                Some(value) => {
                    target.insert(key, value);
                }
            }
        }
        if maps_equal(&target, &self.cache) {
            tracing::debug!("Config unchanged, skipping write");
            return Ok(());
        }
        self.commit(target)
    }

    /// Removes `key` and persists the cache. Absent keys are a no-op.
    pub fn delete_key(&mut self, key: &str) -> Result<(), WriteFailure> {
        if !self.cache.contains_key(key) {
            return Ok(());
        }
        let mut target = self.cache.clone();
        target.shift_remove(key);
        self.commit(target)
    }

    fn commit(&mut self, target: ConfigMap) -> Result<(), WriteFailure> {
        ConfigWriter::write(&self.config_path, &target)?;
        self.cache = target;
        Ok(())
    }
}
