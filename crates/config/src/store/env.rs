//! Environment variable overrides.
//!
//! Responsibilities:
//! - Look up `<prefix><key>` in the process environment.
//! - Interpret override strings for typed reads.
//!
//! Invariants:
//! - A set variable always wins, including `""`, `"0"` and `"false"`.
//! - Values are returned raw: no trimming, no type conversion.

/// Returns the raw override for `key`, if the variable is set.
///
/// Keys that cannot form a valid variable name never match.
pub fn env_override(prefix: &str, key: &str) -> Option<String> {
    if key.is_empty() || key.contains(['=', '\0']) || prefix.contains(['=', '\0']) {
        return None;
    }
    std::env::var_os(format!("{prefix}{key}")).map(|value| value.to_string_lossy().into_owned())
}

/// Interprets a string as a boolean the way administrators write them.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
