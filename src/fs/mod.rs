//! File system helpers.
//!
//! Writes go through a temp file in the target's directory followed by a
//! rename, so a manifest is either fully replaced or left as it was.

pub mod atomic;

pub use atomic::write_atomic;
