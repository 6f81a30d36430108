//! Tests for `sysconf get`.

use crate::common::{fixture_dir, sysconf_cmd};
use predicates::prelude::*;

#[test]
fn test_get_string_value() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["get", "foo"])
        .assert()
        .success()
        .stdout("\"bar\"\n");
}

#[test]
fn test_get_list_value_as_json() {
    let dir = fixture_dir();

    let output = sysconf_cmd(dir.path())
        .args(["get", "beers"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, serde_json::json!(["Appenzeller", "Guinness", "Kölsch"]));
}

#[test]
fn test_get_false_is_not_missing() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["get", "alcohol_free", "--default", "yes"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_get_missing_key_uses_default() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["get", "bar", "--default", "moo"])
        .assert()
        .success()
        .stdout("\"moo\"\n");
}

#[test]
fn test_get_missing_key_without_default_exits_4() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["get", "bar"])
        .assert()
        .code(4)
        .stdout("")
        .stderr(predicate::str::contains("Config key 'bar' is not set"));
}

#[test]
fn test_get_prefers_environment_override() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .env("NC_foo", "0")
        .args(["get", "foo"])
        .assert()
        .success()
        .stdout("\"0\"\n");

    sysconf_cmd(dir.path())
        .env("NC_missing", "from-env")
        .args(["get", "missing"])
        .assert()
        .success()
        .stdout("\"from-env\"\n");
}
