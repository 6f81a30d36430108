//! Tests for `sysconf list`.

use crate::common::{fixture_dir, sysconf_cmd};
use predicates::prelude::*;

#[test]
fn test_list_prints_keys_in_order() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout("foo\nbeers\nalcohol_free\n");
}

#[test]
fn test_list_includes_fragments() {
    let dir = fixture_dir();
    std::fs::write(
        dir.path().join("extra.config.php"),
        "<?php $CONFIG = array('php53' => 'totallyOutdated');",
    )
    .unwrap();

    sysconf_cmd(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("alcohol_free\nphp53\n"));
}

#[test]
fn test_list_json_prints_merged_config() {
    let dir = fixture_dir();

    let output = sysconf_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "foo": "bar",
            "beers": ["Appenzeller", "Guinness", "Kölsch"],
            "alcohol_free": false
        })
    );
}

#[test]
fn test_list_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    sysconf_cmd(&dir.path().join("nope"))
        .arg("list")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_list_broken_config_is_empty_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.php"), "<?php $CONFIG = array(").unwrap();

    sysconf_cmd(dir.path())
        .env("RUST_LOG", "warn")
        .arg("list")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Failed to parse config file"));
}
