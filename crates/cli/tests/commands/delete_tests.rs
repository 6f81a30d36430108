//! Tests for `sysconf delete`.

use crate::common::{FIXTURE, fixture_dir, read_config, sysconf_cmd};

#[test]
fn test_delete_removes_key() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["delete", "foo"])
        .assert()
        .success();

    assert_eq!(
        read_config(&dir),
        "<?php\n$CONFIG = array (\n  'beers' => \n  array (\n    0 => 'Appenzeller',\n    1 => 'Guinness',\n    2 => 'Kölsch',\n  ),\n  'alcohol_free' => false,\n);\n"
    );
}

#[test]
fn test_delete_missing_key_is_a_no_op() {
    let dir = fixture_dir();

    sysconf_cmd(dir.path())
        .args(["delete", "does_not_exist"])
        .assert()
        .success();

    assert_eq!(read_config(&dir), FIXTURE);
}
