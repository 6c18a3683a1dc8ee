//! Bit-matrix directed graph.

use tracing::{debug, trace};

use crate::base::{BitSet, RegionError, RegionResult};

/// Accumulates edges for a [`BitSetGraph`] over a fixed node count.
#[derive(Debug, Clone)]
pub struct BitSetGraphBuilder {
    outbound: Vec<BitSet>,
    inbound: Vec<BitSet>,
}

impl BitSetGraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self {
            outbound: vec![BitSet::new(node_count); node_count],
            inbound: vec![BitSet::new(node_count); node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.outbound.len()
    }

    /// Record `from -> to`. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, from: usize, to: usize) -> RegionResult<bool> {
        let len = self.node_count();
        RegionError::check_index(from, len)?;
        RegionError::check_index(to, len)?;
        let added = self.outbound[from].insert(to);
        self.inbound[to].insert(from);
        if added {
            trace!("[GRAPH] edge {} -> {}", from, to);
        }
        Ok(added)
    }

    pub fn build(self) -> BitSetGraph {
        let graph = BitSetGraph {
            outbound: self.outbound.into_boxed_slice(),
            inbound: self.inbound.into_boxed_slice(),
        };
        debug!(
            "[GRAPH] build: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}

/// Immutable directed graph with forward and reverse adjacency rows.
///
/// Edge tests are O(1); neighbour sets are one row, O(n/64) to copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSetGraph {
    outbound: Box<[BitSet]>,
    inbound: Box<[BitSet]>,
}

impl BitSetGraph {
    pub fn builder(node_count: usize) -> BitSetGraphBuilder {
        BitSetGraphBuilder::new(node_count)
    }

    pub fn node_count(&self) -> usize {
        self.outbound.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outbound.iter().map(BitSet::count).sum()
    }

    /// Whether `from -> to` exists; `false` for out-of-range nodes.
    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        self.outbound.get(from).is_some_and(|row| row.contains(to))
    }

    /// All edges, ordered by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.outbound
            .iter()
            .enumerate()
            .flat_map(|(from, row)| row.iter().map(move |to| (from, to)))
    }

    fn check(&self, node: usize) -> RegionResult<usize> {
        RegionError::check_index(node, self.node_count())
    }

    /// Direct successors of `node`.
    pub fn children(&self, node: usize) -> RegionResult<&BitSet> {
        self.check(node).map(|n| &self.outbound[n])
    }

    /// Direct predecessors of `node`.
    pub fn parents(&self, node: usize) -> RegionResult<&BitSet> {
        self.check(node).map(|n| &self.inbound[n])
    }

    /// Every node reachable from `node` by one or more edges. Contains
    /// `node` itself only if it lies on a cycle.
    pub fn closure_of(&self, node: usize) -> RegionResult<BitSet> {
        self.check(node).map(|n| closure(&self.outbound, n))
    }

    /// Every node from which `node` is reachable.
    pub fn reverse_closure_of(&self, node: usize) -> RegionResult<BitSet> {
        self.check(node).map(|n| closure(&self.inbound, n))
    }

    pub fn closure_size(&self, node: usize) -> RegionResult<usize> {
        self.closure_of(node).map(|set| set.count())
    }

    pub fn reachable(&self, from: usize, to: usize) -> RegionResult<bool> {
        Ok(self.distance(from, to)?.is_some())
    }

    /// Whether `node` can reach itself.
    pub fn is_recursive(&self, node: usize) -> RegionResult<bool> {
        self.check(node)?;
        if self.outbound[node].contains(node) {
            return Ok(true);
        }
        Ok(closure(&self.outbound, node).contains(node))
    }

    /// Length of the shortest forward path, `Some(0)` when `from == to`,
    /// `None` if unreachable.
    ///
    /// Breadth-first over whole frontiers: level `k` is the set of nodes
    /// first reached after `k` edges.
    pub fn distance(&self, from: usize, to: usize) -> RegionResult<Option<u32>> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(Some(0));
        }
        let mut visited = BitSet::new(self.node_count());
        visited.insert(from);
        let mut frontier = self.outbound[from].clone();
        let mut level = 1u32;
        while !frontier.is_empty() {
            if frontier.contains(to) {
                return Ok(Some(level));
            }
            visited.union_with(&frontier);
            frontier = expand(&self.outbound, &frontier);
            frontier.difference_with(&visited);
            level += 1;
        }
        Ok(None)
    }

    /// Nodes no other node points at: roots and isolated nodes.
    pub fn top_level_or_orphans(&self) -> BitSet {
        self.without_foreign_neighbours(&self.inbound)
    }

    /// Nodes pointing at no other node.
    pub fn bottom_level(&self) -> BitSet {
        self.without_foreign_neighbours(&self.outbound)
    }

    /// Nodes whose row is empty once a self-loop is discounted.
    fn without_foreign_neighbours(&self, rows: &[BitSet]) -> BitSet {
        let mut result = BitSet::new(self.node_count());
        for (node, row) in rows.iter().enumerate() {
            let degree = row.count() - usize::from(row.contains(node));
            if degree == 0 {
                result.insert(node);
            }
        }
        result
    }
}

/// Union of the rows selected by `frontier`.
fn expand(rows: &[BitSet], frontier: &BitSet) -> BitSet {
    let mut next = BitSet::new(rows.len());
    for node in frontier {
        next.union_with(&rows[node]);
    }
    next
}

/// Fixpoint of frontier expansion starting from `node`'s row.
fn closure(rows: &[BitSet], node: usize) -> BitSet {
    let mut result = BitSet::new(rows.len());
    let mut frontier = rows[node].clone();
    while !frontier.is_empty() {
        result.union_with(&frontier);
        frontier = expand(rows, &frontier);
        frontier.difference_with(&result);
    }
    result
}
