//! Interval storage over source text.
//!
//! An [`IntervalStore`] holds half-open `[start, end)` intervals, each with an
//! optional key, appended in depth-first emission order: an enclosing
//! interval first, then everything nested inside it left to right. Intervals
//! may nest but never straddle. The store answers point queries ("innermost
//! interval at offset 42"), parent/child navigation and outermost-only
//! iteration.
//!
//! Construction goes through [`IntervalStoreBuilder`]; [`IntervalStoreBuilder::build`]
//! freezes the columns into an immutable, `Send + Sync` (for `Send + Sync`
//! keys) snapshot.

mod builder;
mod key_index;
mod region;
mod store;

pub use builder::IntervalStoreBuilder;
pub use key_index::KeyIndex;
pub use region::{Containing, OutermostRegions, Region, Regions};
pub use store::IntervalStore;

/// Sentinel in the parent column for top-level intervals.
pub(crate) const NO_PARENT: u32 = u32::MAX;
