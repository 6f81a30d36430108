//! Shared test utilities for sysconf integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Create temp config directories with fixture content.
//!
//! Invariants / Assumptions:
//! - Every command runs against an explicit temp `--config-dir`.
//! - `NC_*` overrides from the host are cleared for the keys used in fixtures.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub const FIXTURE: &str = r#"<?php $CONFIG=array("foo"=>"bar", "beers" => array("Appenzeller", "Guinness", "Kölsch"), "alcohol_free" => false);"#;

/// Returns a hermetic `sysconf` command bound to `dir`.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Host `SYSCONF_*` and fixture `NC_*` variables do not leak in.
pub fn sysconf_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sysconf");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("SYSCONF_CONFIG_DIR")
        .env_remove("SYSCONF_CONFIG_FILE")
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("NC_") {
            cmd.env_remove(&key);
        }
    }

    cmd.arg("--config-dir").arg(dir);
    cmd
}

/// Temp directory containing `config.php` with `FIXTURE`.
pub fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("config.php"), FIXTURE).unwrap();
    dir
}

pub fn read_config(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("config.php")).unwrap()
}
