//! Name index tests
//!
//! - Uniqueness and duplicate diversion
//! - Position lookups and suggestions
//! - Rebuilds across edits
//! - Binary persistence

pub mod tests_name_index;
#[cfg(feature = "persist")]
pub mod tests_persist;
