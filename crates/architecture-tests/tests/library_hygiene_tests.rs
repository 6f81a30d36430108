//! Purpose: Keep the library crate free of process-level side effects.
//!
//! Non-scope: Test modules (`#[cfg(test)]` and `tests/`) are not checked.
//!
//! Invariants:
//! - Library code reports failures through `Result`, never by panicking on
//!   `unwrap()`/`expect()`.
//! - Library code logs through `tracing`, never by printing.

mod common;

use std::fs;

fn library_sources() -> Vec<(String, String)> {
    let src = common::find_workspace_root().join("crates/config/src");
    assert!(src.exists(), "crates/config/src not found at {:?}", src);

    common::rust_files(&src)
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path).expect("Failed to read file");
            (path.display().to_string(), content)
        })
        .collect()
}

#[test]
fn test_library_does_not_unwrap() {
    let mut violations = Vec::new();

    for (path, content) in library_sources() {
        let code = common::non_test_source(&content);
        for (i, line) in code.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }
            if trimmed.contains(".unwrap()") || trimmed.contains(".expect(") {
                violations.push(format!("{}:{}: {}", path, i + 1, trimmed));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Library code must propagate errors instead of panicking:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_library_does_not_print() {
    let mut violations = Vec::new();

    for (path, content) in library_sources() {
        let code = common::non_test_source(&content);
        for (i, line) in code.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }
            if ["println!", "eprintln!", "print!(", "eprint!(", "dbg!("]
                .iter()
                .any(|m| trimmed.contains(m))
            {
                violations.push(format!("{}:{}: {}", path, i + 1, trimmed));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Library code must log through tracing instead of printing:\n{}",
        violations.join("\n")
    );
}
