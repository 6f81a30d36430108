//! Tests for global options and their environment variables.

use crate::common::{fixture_dir, sysconf_cmd};
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();

    sysconf_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_config_dir_from_environment() {
    let dir = fixture_dir();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sysconf");
    cmd.env("DOTENV_DISABLED", "1")
        .env("SYSCONF_CONFIG_DIR", dir.path())
        .env_remove("SYSCONF_CONFIG_FILE")
        .env_remove("NC_foo")
        .args(["get", "foo"])
        .assert()
        .success()
        .stdout("\"bar\"\n");
}

#[test]
fn test_config_file_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("other.php"),
        "<?php $CONFIG = array('which' => 'other');",
    )
    .unwrap();

    sysconf_cmd(dir.path())
        .env("SYSCONF_CONFIG_FILE", "other.php")
        .args(["get", "which"])
        .assert()
        .success()
        .stdout("\"other\"\n");
}

#[test]
fn test_unknown_type_is_rejected_by_parser() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["set", "foo", "bar", "--type", "date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'date'"));
}
