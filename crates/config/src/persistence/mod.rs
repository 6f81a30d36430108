//! Configuration persistence.
//!
//! Responsibilities:
//! - Serialize the full configuration map into the canonical file format.
//! - Replace the primary config file atomically (temp file + rename).
//! - Report permission problems as `WriteFailure`.
//!
//! Does NOT handle:
//! - Reading or merging config files (see `store`).
//! - Deciding whether a write is needed (the store skips no-op writes).
//!
//! Invariants:
//! - The destination is never left partially written by the rename path.
//! - A failed permission check leaves the destination untouched.
//! - Directory permissions only matter when the file must be created.

mod error;
mod writer;

pub use error::{WriteFailure, WriteFailureReason};
pub use writer::ConfigWriter;
