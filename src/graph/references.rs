//! Reference sites and the who-references-whom graph of a name index.

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::bitset_graph::{BitSetGraph, BitSetGraphBuilder};
use crate::base::{BitSet, RegionKind, RegionResult};
use crate::names::{NameIndex, NamedRegion};
use crate::regions::{IntervalStore, IntervalStoreBuilder, Region};

/// A reference to a name the index does not declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReference<K> {
    pub name: SmolStr,
    /// Kind the referencing syntax implies, if the walker knows it.
    pub expected: Option<K>,
    /// Sequential id among unknown references.
    pub ordinal: usize,
    /// Declared region whose body contains the reference.
    pub container: Option<usize>,
}

/// What [`ReferenceGraphBuilder::add_reference`] made of an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOutcome {
    /// The name is declared; `target` is its ordinal and `container` the
    /// declared region enclosing the reference site, if any.
    Resolved {
        target: usize,
        container: Option<usize>,
    },
    /// The name is not declared; recorded as unknown reference `ordinal`.
    Unknown { ordinal: usize },
}

/// Second-pass accumulator: feed every reference occurrence in document
/// order, then [`build`](Self::build).
pub struct ReferenceGraphBuilder<K> {
    names: Arc<NameIndex<K>>,
    bodies: Option<Arc<NameIndex<K>>>,
    references: IntervalStoreBuilder<usize>,
    unknown: IntervalStoreBuilder<UnknownReference<K>>,
    graph: BitSetGraphBuilder,
}

impl<K: RegionKind> ReferenceGraphBuilder<K> {
    pub fn new(names: Arc<NameIndex<K>>) -> Self {
        let graph = BitSetGraphBuilder::new(names.len());
        Self {
            names,
            bodies: None,
            references: IntervalStoreBuilder::new(),
            unknown: IntervalStoreBuilder::new(),
            graph,
        }
    }

    /// Resolve containing declarations against `bodies` (same names, regions
    /// spanning whole declaration bodies) instead of the name regions.
    pub fn with_bodies(mut self, bodies: Arc<NameIndex<K>>) -> Self {
        self.bodies = Some(bodies);
        self
    }

    /// Declared name ordinal whose body contains `pos`.
    fn container_at(&self, pos: u32) -> Option<usize> {
        match &self.bodies {
            Some(bodies) => bodies
                .at(pos)
                .and_then(|body| self.names.index_of(body.name())),
            None => self.names.at(pos).map(|region| region.index()),
        }
    }

    /// Record an occurrence of `name` at `[start, end)`.
    ///
    /// # Errors
    /// The same contract as [`IntervalStoreBuilder::add`]: resolved and
    /// unknown occurrences must each arrive in ascending, non-straddling
    /// order. A rejected occurrence changes nothing.
    pub fn add_reference(
        &mut self,
        name: &str,
        start: u32,
        end: u32,
    ) -> RegionResult<ReferenceOutcome> {
        self.add_reference_expecting(name, start, end, None)
    }

    /// Like [`add_reference`](Self::add_reference), carrying the kind the
    /// referencing syntax implies for use in diagnostics.
    pub fn add_reference_expecting(
        &mut self,
        name: &str,
        start: u32,
        end: u32,
        expected: Option<K>,
    ) -> RegionResult<ReferenceOutcome> {
        let container = self.container_at(start);
        match self.names.index_of(name) {
            Some(target) => {
                self.references.add(Some(target), start, end)?;
                if let Some(container) = container {
                    self.graph.add_edge(container, target)?;
                }
                trace!(
                    "[REFS] '{}' at {}..{} -> #{} (container {:?})",
                    name, start, end, target, container
                );
                Ok(ReferenceOutcome::Resolved { target, container })
            }
            None => {
                let ordinal = self.unknown.len();
                let unknown = UnknownReference {
                    name: SmolStr::new(name),
                    expected,
                    ordinal,
                    container,
                };
                self.unknown.add(Some(unknown), start, end)?;
                trace!("[REFS] unknown '{}' at {}..{}", name, start, end);
                Ok(ReferenceOutcome::Unknown { ordinal })
            }
        }
    }

    pub fn build(self) -> ReferenceGraph<K> {
        let references = self.references.build();
        let mut by_target: Vec<Vec<u32>> = vec![Vec::new(); self.names.len()];
        for site in &references {
            if let Some(&target) = site.key() {
                by_target[target].push(site.index() as u32);
            }
        }
        let unknown = self.unknown.build();
        debug!(
            "[REFS] build: {} resolved, {} unknown",
            references.len(),
            unknown.len()
        );
        ReferenceGraph {
            names: self.names,
            references,
            by_target: by_target.into_iter().map(Vec::into_boxed_slice).collect(),
            unknown,
            graph: self.graph.build(),
        }
    }
}

/// Frozen reference data for one [`NameIndex`] snapshot.
///
/// Node ids are ordinals of that exact index; they mean nothing against any
/// other index, including one derived from it by `sans` or `shifted_by`.
#[derive(Debug, Clone)]
pub struct ReferenceGraph<K> {
    names: Arc<NameIndex<K>>,
    /// Resolved reference sites keyed by target ordinal.
    references: IntervalStore<usize>,
    /// Indices into `references`, per target ordinal.
    by_target: Box<[Box<[u32]>]>,
    unknown: IntervalStore<UnknownReference<K>>,
    graph: BitSetGraph,
}

impl<K: RegionKind> ReferenceGraph<K> {
    pub fn builder(names: Arc<NameIndex<K>>) -> ReferenceGraphBuilder<K> {
        ReferenceGraphBuilder::new(names)
    }

    pub fn names(&self) -> &Arc<NameIndex<K>> {
        &self.names
    }

    pub fn graph(&self) -> &BitSetGraph {
        &self.graph
    }

    // ============================================================
    // Reference sites
    // ============================================================

    /// All resolved reference sites in document order; keys are target
    /// ordinals.
    pub fn references(&self) -> &IntervalStore<usize> {
        &self.references
    }

    /// Reference sites pointing at `name`, in document order.
    pub fn references_to(&self, name: &str) -> Vec<Region<'_, usize>> {
        let Some(target) = self.names.index_of(name) else {
            return Vec::new();
        };
        self.by_target[target]
            .iter()
            .filter_map(|&i| self.references.get(i as usize))
            .collect()
    }

    /// Declaration referenced by the occurrence at `pos`.
    pub fn reference_at(&self, pos: u32) -> Option<NamedRegion<'_, K>> {
        let site = self.references.at(pos)?;
        site.key().and_then(|&target| self.names.get(target))
    }

    /// References whose name is not declared, in document order.
    pub fn unknown_references(&self) -> &IntervalStore<UnknownReference<K>> {
        &self.unknown
    }

    pub fn unknown_at(&self, pos: u32) -> Option<&UnknownReference<K>> {
        self.unknown.at(pos).and_then(|site| site.key())
    }

    /// "Did you mean" candidates for an unknown reference, nearest first.
    /// When the reference carries an expected kind, only names of that kind
    /// are offered unless none exist.
    pub fn suggestions_for(
        &self,
        unknown: &UnknownReference<K>,
        count: usize,
    ) -> Vec<NamedRegion<'_, K>> {
        let ranked = self.names.top_similar_names(&unknown.name, self.names.len());
        let Some(expected) = unknown.expected else {
            return ranked.into_iter().take(count).collect();
        };
        if !ranked.iter().any(|region| region.kind() == expected) {
            return ranked.into_iter().take(count).collect();
        }
        ranked
            .into_iter()
            .filter(|region| region.kind() == expected)
            .take(count)
            .collect()
    }

    // ============================================================
    // Graph queries by ordinal
    // ============================================================

    pub fn children(&self, node: usize) -> RegionResult<&BitSet> {
        self.graph.children(node)
    }

    pub fn parents(&self, node: usize) -> RegionResult<&BitSet> {
        self.graph.parents(node)
    }

    pub fn closure_of(&self, node: usize) -> RegionResult<BitSet> {
        self.graph.closure_of(node)
    }

    pub fn reverse_closure_of(&self, node: usize) -> RegionResult<BitSet> {
        self.graph.reverse_closure_of(node)
    }

    pub fn distance(&self, from: usize, to: usize) -> RegionResult<Option<u32>> {
        self.graph.distance(from, to)
    }

    // ============================================================
    // Graph queries by name
    // ============================================================

    /// Resolve every ordinal in `set` to its region.
    pub fn regions_in(&self, set: &BitSet) -> Vec<NamedRegion<'_, K>> {
        set.iter().filter_map(|i| self.names.get(i)).collect()
    }

    /// Names referenced from `name`'s body; empty if `name` is undeclared.
    pub fn children_of_name(&self, name: &str) -> Vec<NamedRegion<'_, K>> {
        self.by_name(name, |node| self.graph.children(node).cloned())
    }

    /// Names whose bodies reference `name`.
    pub fn parents_of_name(&self, name: &str) -> Vec<NamedRegion<'_, K>> {
        self.by_name(name, |node| self.graph.parents(node).cloned())
    }

    pub fn closure_of_name(&self, name: &str) -> Vec<NamedRegion<'_, K>> {
        self.by_name(name, |node| self.graph.closure_of(node))
    }

    pub fn reverse_closure_of_name(&self, name: &str) -> Vec<NamedRegion<'_, K>> {
        self.by_name(name, |node| self.graph.reverse_closure_of(node))
    }

    fn by_name<F>(&self, name: &str, query: F) -> Vec<NamedRegion<'_, K>>
    where
        F: FnOnce(usize) -> RegionResult<BitSet>,
    {
        self.names
            .index_of(name)
            .and_then(|node| query(node).ok())
            .map(|set| self.regions_in(&set))
            .unwrap_or_default()
    }

    /// Whether `name` can reach itself through references.
    pub fn is_recursive_rule(&self, name: &str) -> bool {
        self.names
            .index_of(name)
            .is_some_and(|node| self.graph.is_recursive(node).unwrap_or(false))
    }

    /// Declarations nothing else references.
    pub fn top_level_or_orphan_rules(&self) -> Vec<NamedRegion<'_, K>> {
        self.regions_in(&self.graph.top_level_or_orphans())
    }

    /// Declarations whose bodies reference no other declaration.
    pub fn bottom_level_rules(&self) -> Vec<NamedRegion<'_, K>> {
        self.regions_in(&self.graph.bottom_level())
    }
}
