//! `sysconf set`.

use anyhow::{Context, Result};
use sysconf::store::parse_bool;
use sysconf::{ConfigStore, ConfigValue};

use crate::args::ValueType;
use crate::error::CliError;

pub fn run(store: &mut ConfigStore, key: &str, raw: &str, value_type: ValueType) -> Result<()> {
    let value = parse_value(raw, value_type)?;
    tracing::debug!(key, value_type = value.type_name(), "Setting config value");
    store
        .set_value(key, value)
        .with_context(|| format!("Failed to set config key '{key}'"))
}

/// Converts a command-line argument into a typed value.
pub(crate) fn parse_value(raw: &str, value_type: ValueType) -> Result<ConfigValue, CliError> {
    let invalid = |expected| CliError::InvalidValue {
        expected,
        value: raw.to_string(),
    };
    match value_type {
        ValueType::String => Ok(ConfigValue::String(raw.to_string())),
        ValueType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(ConfigValue::Int)
            .map_err(|_| invalid("integer")),
        ValueType::Float => raw
            .trim()
            .parse::<f64>()
            .map(ConfigValue::Float)
            .map_err(|_| invalid("float")),
        ValueType::Boolean => parse_bool(raw)
            .map(ConfigValue::Bool)
            .ok_or_else(|| invalid("boolean")),
        ValueType::Json => serde_json::from_str::<serde_json::Value>(raw)
            .map(ConfigValue::from)
            .map_err(|_| invalid("JSON")),
    }
}
