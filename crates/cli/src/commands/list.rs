//! `sysconf list`.

use anyhow::Result;
use sysconf::{ConfigStore, ConfigValue};

pub fn run(store: &ConfigStore, json: bool) -> Result<()> {
    if json {
        let merged = ConfigValue::Map(store.values().clone());
        println!("{}", super::to_json(&merged)?);
        return Ok(());
    }

    for key in store.keys() {
        println!("{key}");
    }
    Ok(())
}
