//! Canonical rendering of configuration files.
//!
//! Output matches PHP's `var_export` layout: two spaces per nesting level,
//! a trailing comma after every entry, and arrays opened on their own line.

use crate::value::{ConfigMap, ConfigValue};

use super::CONFIG_VARIABLE;

const INDENT_WIDTH: usize = 2;

/// Renders the full file content for `map`.
pub fn render_config(map: &ConfigMap) -> String {
    let mut out = String::with_capacity(64 + map.len() * 32);
    out.push_str("<?php\n$");
    out.push_str(CONFIG_VARIABLE);
    out.push_str(" = ");
    render_map(&mut out, map, 0);
    out.push_str(";\n");
    out
}

fn render_value(out: &mut String, value: &ConfigValue, indent: usize) {
    match value {
        ConfigValue::Null => out.push_str("NULL"),
        ConfigValue::Bool(true) => out.push_str("true"),
        ConfigValue::Bool(false) => out.push_str("false"),
        ConfigValue::Int(i) => out.push_str(&i.to_string()),
        ConfigValue::Float(f) => out.push_str(&format_float(*f)),
        ConfigValue::String(s) => push_quoted(out, s),
        ConfigValue::List(items) => {
            out.push_str("array (\n");
            for (index, item) in items.iter().enumerate() {
                push_indent(out, indent + INDENT_WIDTH);
                out.push_str(&index.to_string());
                push_entry_value(out, item, indent + INDENT_WIDTH);
            }
            push_indent(out, indent);
            out.push(')');
        }
        ConfigValue::Map(map) => render_map(out, map, indent),
    }
}

fn render_map(out: &mut String, map: &ConfigMap, indent: usize) {
    out.push_str("array (\n");
    for (key, value) in map {
        push_indent(out, indent + INDENT_WIDTH);
        if is_integer_key(key) {
            out.push_str(key);
        } else {
            push_quoted(out, key);
        }
        push_entry_value(out, value, indent + INDENT_WIDTH);
    }
    push_indent(out, indent);
    out.push(')');
}

/// Writes ` => value,\n`, moving nested arrays onto their own line.
fn push_entry_value(out: &mut String, value: &ConfigValue, indent: usize) {
    out.push_str(" => ");
    if matches!(value, ConfigValue::List(_) | ConfigValue::Map(_)) {
        out.push('\n');
        push_indent(out, indent);
    }
    render_value(out, value, indent);
    out.push_str(",\n");
}

fn push_indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}

/// Single-quoted string literal. NUL bytes cannot appear inside single
/// quotes, so they are spliced in as `' . "\0" . '`.
fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\0' => out.push_str("' . \"\\0\" . '"),
            other => out.push(other),
        }
    }
    out.push('\'');
}

/// Keys PHP would store as integers are written bare.
pub(crate) fn is_integer_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits.starts_with('0') {
        return key == "0";
    }
    key.parse::<i64>().is_ok()
}

/// Shortest round-trip representation, always carrying a fractional part.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    // `{:e}` yields the shortest digits, e.g. "1.5e25" or "-1e-5".
    let sci = format!("{:e}", f);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let decimal_point = exponent + 1;

    if decimal_point < -3 || decimal_point > 17 {
        let mut out = mantissa.to_string();
        if !out.contains('.') {
            out.push_str(".0");
        }
        out.push('E');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.unsigned_abs().to_string());
        return out;
    }

    let mut out = f.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}
