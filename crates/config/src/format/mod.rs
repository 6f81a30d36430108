//! The PHP-array configuration file format.
//!
//! Responsibilities:
//! - Parse `<?php $CONFIG = array (...);` files into a `ConfigMap`.
//! - Render a `ConfigMap` into the canonical, `var_export`-compatible text.
//!
//! Does NOT handle:
//! - File I/O, locking, or atomic replacement (see `persistence`).
//! - Merging of several files (see `store`).
//!
//! Invariants:
//! - `parse_config(&render_config(m)) == m` for every map `m` whose arrays
//!   are either lists or have at least one non-index key.
//! - Rendering is a pure function of the map, including key order.

mod parse;
mod render;

pub use parse::{MAX_DEPTH, ParseError, parse_config};
pub use render::render_config;

/// Name of the PHP variable holding the configuration array.
pub const CONFIG_VARIABLE: &str = "CONFIG";
