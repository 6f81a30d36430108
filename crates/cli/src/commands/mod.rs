//! Command handlers. Each handler receives an already loaded store.

pub mod delete;
pub mod get;
pub mod list;
pub mod set;

use anyhow::{Context, Result};
use sysconf::ConfigValue;

/// Pretty JSON rendering used for every value printed to stdout.
pub(crate) fn to_json(value: &ConfigValue) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize value as JSON")
}
