//! # regindex-base
//!
//! Interval, name and reference-graph indexes for analysing grammar source.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! graph     → Bit-matrix graphs, reference graph over a name index
//!   ↓
//! names     → Name → kind-tagged region tables, duplicates, persistence
//!   ↓
//! regions   → Nested interval store with point and parent/child queries
//!   ↓
//! base      → Primitives (RegionError, BitSet, IndexedCollection, TextEdit)
//! ```

// ============================================================================
// MODULES (dependency order: base → regions → names → graph)
// ============================================================================

/// Foundation types: errors, kinds, bit sets, indexed collections
pub mod base;

/// Interval storage: nested half-open regions in emission order
pub mod regions;

/// Name indexes: unique names mapped to kind-tagged regions
pub mod names;

/// Graphs: bit-matrix adjacency, heterogeneous and reference graphs
pub mod graph;

// Re-export foundation types
pub use base::{
    BitSet, DeclKind, IndexedCollection, RegionError, RegionKind, RegionResult, TextEdit,
    TextRange, TextSize,
};

pub use graph::{BitSetGraph, HeteroGraph, ReferenceGraph, UnknownReference};
pub use names::{NameIndex, NameIndexBuilder, NamedRegion};
pub use regions::{IntervalStore, IntervalStoreBuilder, Region};
