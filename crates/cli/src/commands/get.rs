//! `sysconf get`.

use anyhow::Result;
use sysconf::{ConfigStore, ConfigValue};

use crate::error::CliError;

pub fn run(store: &ConfigStore, key: &str, default: Option<String>) -> Result<()> {
    let value = match (store.get_value(key), default) {
        (Some(value), _) => value,
        (None, Some(default)) => ConfigValue::String(default),
        (None, None) => return Err(CliError::KeyNotFound(key.to_string()).into()),
    };
    println!("{}", super::to_json(&value)?);
    Ok(())
}
