//! `sysconf delete`.

use anyhow::{Context, Result};
use sysconf::ConfigStore;

pub fn run(store: &mut ConfigStore, key: &str) -> Result<()> {
    if store.values().get(key).is_none() {
        tracing::info!(key, "Key not present in config, nothing to delete");
    }
    store
        .delete_key(key)
        .with_context(|| format!("Failed to delete config key '{key}'"))
}
