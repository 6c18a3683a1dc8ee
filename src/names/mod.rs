//! Name → region tables.
//!
//! A [`NameIndex`] maps unique names to kind-tagged regions. Names are kept
//! sorted so lookups by name are binary searches; lookups by position go
//! through a secondary position index built on first use.
//!
//! Construction is two-phase: [`NameIndexBuilder`] accepts declarations in
//! any order and diverts repeated names to a duplicates table, then
//! [`NameIndexBuilder::build`] freezes everything. Frozen indexes are only
//! ever replaced wholesale ([`NameIndex::sans`], [`NameIndex::shifted_by`],
//! [`NameIndex::secondary`]).

mod builder;
mod index;
#[cfg(feature = "persist")]
mod persist;
mod position;
mod region;

pub use builder::NameIndexBuilder;
pub use index::{DuplicateMap, NameIndex, Occurrence};
pub use region::NamedRegion;
