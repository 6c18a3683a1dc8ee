//! Foundation types for the region indexes.
//!
//! This module provides the vocabulary shared by every other layer:
//! - [`RegionError`] - Contract violations surfaced by builders and graph queries
//! - [`RegionKind`], [`DeclKind`] - Kind tags with ordinal priority
//! - [`BitSet`] - Fixed-width, word-parallel bit set
//! - [`IndexedCollection`] - Size / index-of / value-at capability
//! - [`TextEdit`] - Offset remapping for incremental edits
//!
//! This module has NO dependencies on other regindex modules.

mod bitset;
mod edit;
mod error;
mod indexed;
mod kind;

pub use bitset::{BitSet, BitSetIter};
pub use edit::TextEdit;
pub use error::{RegionError, RegionResult};
pub use indexed::{IndexedCollection, IndexedList, SortedNames, Stacked, collect_items};
pub use kind::{DeclKind, RegionKind};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};

/// Build a [`TextRange`] from raw `u32` offsets.
#[inline]
pub(crate) fn text_range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}
