//! Directed graphs over dense node indices.
//!
//! - [`BitSetGraph`] - adjacency stored as one [`BitSet`](crate::base::BitSet)
//!   row per node in each direction; closures and distances propagate whole
//!   words at a time.
//! - [`HeteroGraph`] - two indexed collections sharing one adjacency matrix,
//!   the right side offset past the left.
//! - [`ReferenceGraph`] - which declared name's body references which other
//!   declared name, plus the reference sites themselves and the references
//!   that did not resolve.

mod bitset_graph;
mod hetero;
mod references;

pub use bitset_graph::{BitSetGraph, BitSetGraphBuilder};
pub use hetero::{HeteroGraph, HeteroGraphBuilder, HeteroNode, SplitSet};
pub use references::{ReferenceGraph, ReferenceGraphBuilder, ReferenceOutcome, UnknownReference};
