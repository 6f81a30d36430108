//! Tests for `sysconf set`.

use crate::common::{FIXTURE, fixture_dir, read_config, sysconf_cmd};
use predicates::prelude::*;

#[test]
fn test_set_string_rewrites_config() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["set", "foo", "moo"])
        .assert()
        .success();

    assert_eq!(
        read_config(&dir),
        "<?php\n$CONFIG = array (\n  'foo' => 'moo',\n  'beers' => \n  array (\n    0 => 'Appenzeller',\n    1 => 'Guinness',\n    2 => 'Kölsch',\n  ),\n  'alcohol_free' => false,\n);\n"
    );
}

#[test]
fn test_set_identical_value_leaves_file_untouched() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["set", "alcohol_free", "false", "--type", "boolean"])
        .assert()
        .success();

    assert_eq!(read_config(&dir), FIXTURE);
}

#[test]
fn test_set_typed_values() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["set", "port", "-3306", "--type", "integer"])
        .assert()
        .success();
    sysconf_cmd(dir.path())
        .args(["set", "ratio", "0.5", "--type", "float"])
        .assert()
        .success();
    sysconf_cmd(dir.path())
        .args(["set", "apps", r#"{"files": true, "list": [1, 2]}"#, "--type", "json"])
        .assert()
        .success();

    let content = read_config(&dir);
    assert!(content.contains("  'port' => -3306,\n"), "{content}");
    assert!(content.contains("  'ratio' => 0.5,\n"), "{content}");
    assert!(
        content.contains(
            "  'apps' => \n  array (\n    'files' => true,\n    'list' => \n    array (\n      0 => 1,\n      1 => 2,\n    ),\n  ),\n"
        ),
        "{content}"
    );
}

#[test]
fn test_set_invalid_typed_value_fails_without_writing() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["set", "port", "many", "--type", "integer"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid integer value 'many'"));

    assert_eq!(read_config(&dir), FIXTURE);
}

#[test]
fn test_set_creates_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();

    sysconf_cmd(dir.path())
        .args(["--config-file", "custom.php", "set", "foobar", "baz"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("custom.php")).unwrap(),
        "<?php\n$CONFIG = array (\n  'foobar' => 'baz',\n);\n"
    );
}

#[test]
fn test_set_never_writes_fragments() {
    let dir = fixture_dir();
    let fragment = "<?php $CONFIG = array('php53' => 'totallyOutdated');";
    std::fs::write(dir.path().join("extra.config.php"), fragment).unwrap();

    sysconf_cmd(dir.path())
        .args(["set", "php53", "current"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("extra.config.php")).unwrap(),
        fragment
    );
    assert!(read_config(&dir).contains("  'php53' => 'current',\n"));
}

#[test]
fn test_set_read_only_config_exits_6() {
    let dir = tempfile::tempdir().unwrap();
    let content = "<?php $CONFIG = array('config_is_read_only' => true);";
    std::fs::write(dir.path().join("config.php"), content).unwrap();

    sysconf_cmd(dir.path())
        .args(["set", "foo", "bar"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("read-only"))
        .stderr(predicate::str::contains("Hint:"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("config.php")).unwrap(),
        content
    );
}
