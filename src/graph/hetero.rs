//! Two collections sharing one adjacency matrix.
//!
//! Nodes `0..left.len()` are the left collection, `left.len()..` the right
//! one. Every conversion between a typed [`HeteroNode`] and a raw graph node
//! is an offset by the boundary; nothing else about the graph knows there
//! are two sides.

use crate::base::{BitSet, IndexedCollection, RegionError, RegionResult, Stacked};

use super::bitset_graph::{BitSetGraph, BitSetGraphBuilder};

/// A node addressed by side and side-local index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeteroNode {
    Left(usize),
    Right(usize),
}

/// A node set split back into side-local indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSet {
    pub left: BitSet,
    pub right: BitSet,
}

impl SplitSet {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn count(&self) -> usize {
        self.left.count() + self.right.count()
    }
}

/// Edge accumulator for a [`HeteroGraph`].
pub struct HeteroGraphBuilder<A, B> {
    items: Stacked<A, B>,
    graph: BitSetGraphBuilder,
}

impl<A, B> HeteroGraphBuilder<A, B>
where
    A: IndexedCollection,
    B: IndexedCollection<Item = A::Item>,
{
    pub fn new(left: A, right: B) -> Self {
        let items = Stacked::new(left, right);
        let graph = BitSetGraphBuilder::new(items.len());
        Self { items, graph }
    }

    /// Record `from -> to`. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, from: HeteroNode, to: HeteroNode) -> RegionResult<bool> {
        let from = global(&self.items, from)?;
        let to = global(&self.items, to)?;
        self.graph.add_edge(from, to)
    }

    pub fn build(self) -> HeteroGraph<A, B> {
        HeteroGraph {
            items: self.items,
            graph: self.graph.build(),
        }
    }
}

/// Strongly typed view over a graph spanning two collections.
pub struct HeteroGraph<A, B> {
    items: Stacked<A, B>,
    graph: BitSetGraph,
}

impl<A, B> HeteroGraph<A, B>
where
    A: IndexedCollection,
    B: IndexedCollection<Item = A::Item>,
{
    pub fn builder(left: A, right: B) -> HeteroGraphBuilder<A, B> {
        HeteroGraphBuilder::new(left, right)
    }

    pub fn left(&self) -> &A {
        self.items.left()
    }

    pub fn right(&self) -> &B {
        self.items.right()
    }

    /// The combined collection, addressed by raw graph node.
    pub fn items(&self) -> &Stacked<A, B> {
        &self.items
    }

    /// The underlying single-address-space graph.
    pub fn graph(&self) -> &BitSetGraph {
        &self.graph
    }

    /// Raw graph node for a typed node.
    pub fn global(&self, node: HeteroNode) -> RegionResult<usize> {
        global(&self.items, node)
    }

    /// Typed node for a raw graph node.
    pub fn local(&self, node: usize) -> RegionResult<HeteroNode> {
        RegionError::check_index(node, self.items.len())?;
        Ok(match node.checked_sub(self.items.boundary()) {
            None => HeteroNode::Left(node),
            Some(right) => HeteroNode::Right(right),
        })
    }

    pub fn left_node(&self, item: &A::Item) -> Option<HeteroNode> {
        self.left().index_of(item).map(HeteroNode::Left)
    }

    pub fn right_node(&self, item: &A::Item) -> Option<HeteroNode> {
        self.right().index_of(item).map(HeteroNode::Right)
    }

    pub fn item(&self, node: HeteroNode) -> Option<&A::Item> {
        match node {
            HeteroNode::Left(i) => self.left().get(i),
            HeteroNode::Right(i) => self.right().get(i),
        }
    }

    pub fn contains_edge(&self, from: HeteroNode, to: HeteroNode) -> bool {
        match (self.global(from), self.global(to)) {
            (Ok(from), Ok(to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    pub fn children(&self, node: HeteroNode) -> RegionResult<SplitSet> {
        let node = self.global(node)?;
        self.graph.children(node).map(|set| self.split(set))
    }

    pub fn parents(&self, node: HeteroNode) -> RegionResult<SplitSet> {
        let node = self.global(node)?;
        self.graph.parents(node).map(|set| self.split(set))
    }

    pub fn closure_of(&self, node: HeteroNode) -> RegionResult<SplitSet> {
        let node = self.global(node)?;
        self.graph.closure_of(node).map(|set| self.split(&set))
    }

    pub fn reverse_closure_of(&self, node: HeteroNode) -> RegionResult<SplitSet> {
        let node = self.global(node)?;
        self.graph.reverse_closure_of(node).map(|set| self.split(&set))
    }

    pub fn distance(&self, from: HeteroNode, to: HeteroNode) -> RegionResult<Option<u32>> {
        self.graph.distance(self.global(from)?, self.global(to)?)
    }

    /// Split a raw node set into side-local sets.
    pub fn split(&self, set: &BitSet) -> SplitSet {
        let boundary = self.items.boundary();
        let mut left = BitSet::new(boundary);
        let mut right = BitSet::new(self.items.len() - boundary);
        for node in set {
            match node.checked_sub(boundary) {
                None => left.insert(node),
                Some(local) => right.insert(local),
            };
        }
        SplitSet { left, right }
    }
}

fn global<A, B>(items: &Stacked<A, B>, node: HeteroNode) -> RegionResult<usize>
where
    A: IndexedCollection,
    B: IndexedCollection<Item = A::Item>,
{
    match node {
        HeteroNode::Left(i) => RegionError::check_index(i, items.left().len()),
        HeteroNode::Right(i) => {
            RegionError::check_index(i, items.right().len()).map(|i| i + items.boundary())
        }
    }
}
