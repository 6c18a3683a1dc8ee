//! The frozen interval store and its queries.

use tracing::warn;

use super::NO_PARENT;
use super::builder::IntervalStoreBuilder;
use super::key_index::KeyIndex;
use super::region::{Containing, OutermostRegions, Region, Regions};
use crate::base::{RegionError, RegionResult, TextEdit};

/// Immutable columnar storage of properly nested half-open intervals.
///
/// Column `i` of `starts`, `ends`, `keys` and `parents` describes the `i`-th
/// interval in insertion order. `starts` is sorted (possibly with repeats);
/// `ends` is sorted only up to [`nesting_begins_at`](Self::nesting_begins_at).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalStore<K> {
    starts: Box<[u32]>,
    ends: Box<[u32]>,
    keys: Box<[Option<K>]>,
    parents: Box<[u32]>,
    nesting_begins_at: Option<usize>,
}

impl<K> Default for IntervalStore<K> {
    fn default() -> Self {
        IntervalStoreBuilder::new().build()
    }
}

impl<K> IntervalStore<K> {
    pub fn builder() -> IntervalStoreBuilder<K> {
        IntervalStoreBuilder::new()
    }

    pub(super) fn from_columns(
        starts: Box<[u32]>,
        ends: Box<[u32]>,
        keys: Box<[Option<K>]>,
        parents: Box<[u32]>,
        nesting_begins_at: Option<usize>,
    ) -> Self {
        Self {
            starts,
            ends,
            keys,
            parents,
            nesting_begins_at,
        }
    }

    // ============================================================
    // Size and raw access
    // ============================================================

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Whether any interval is nested inside another.
    pub fn has_nesting(&self) -> bool {
        self.nesting_begins_at.is_some()
    }

    /// Index of the first interval nested inside an earlier one.
    ///
    /// Every interval before this index is top-level and `ends` is strictly
    /// ascending over that prefix.
    pub fn nesting_begins_at(&self) -> Option<usize> {
        self.nesting_begins_at
    }

    pub fn get(&self, index: usize) -> Option<Region<'_, K>> {
        (index < self.len()).then(|| Region::new(self, index))
    }

    /// Like [`get`](Self::get), but out-of-range is an error.
    pub fn region(&self, index: usize) -> RegionResult<Region<'_, K>> {
        RegionError::check_index(index, self.len()).map(|i| Region::new(self, i))
    }

    pub fn first(&self) -> Option<Region<'_, K>> {
        self.get(0)
    }

    pub fn last(&self) -> Option<Region<'_, K>> {
        self.len().checked_sub(1).map(|i| Region::new(self, i))
    }

    #[inline]
    pub(crate) fn start_of(&self, index: usize) -> u32 {
        self.starts[index]
    }

    #[inline]
    pub(crate) fn end_of(&self, index: usize) -> u32 {
        self.ends[index]
    }

    #[inline]
    pub(crate) fn key_of(&self, index: usize) -> Option<&K> {
        self.keys[index].as_ref()
    }

    #[inline]
    pub(crate) fn parent_of(&self, index: usize) -> Option<usize> {
        let parent = self.parents[index];
        (parent != NO_PARENT).then_some(parent as usize)
    }

    // ============================================================
    // Point queries
    // ============================================================

    /// Innermost interval containing `pos`.
    ///
    /// Binary search finds the last interval starting at or before `pos`
    /// (repeated starts resolve to the last, i.e. most deeply nested, one).
    /// If that interval ends at or before `pos`, no interval between it and
    /// its parent can contain `pos` either, so the search climbs the parent
    /// chain. Without nesting this is a single binary search.
    pub fn at(&self, pos: u32) -> Option<Region<'_, K>> {
        self.innermost_index(pos).map(|i| Region::new(self, i))
    }

    pub(crate) fn innermost_index(&self, pos: u32) -> Option<usize> {
        let mut index = self.starts.partition_point(|&s| s <= pos).checked_sub(1)?;
        loop {
            if self.ends[index] > pos {
                return Some(index);
            }
            index = self.parent_of(index)?;
        }
    }

    /// Every interval containing `pos`, innermost first.
    pub fn containing(&self, pos: u32) -> Containing<'_, K> {
        Containing::new(self, self.innermost_index(pos))
    }

    /// First (outermost) interval starting exactly at `pos`.
    pub fn starting_at(&self, pos: u32) -> Option<Region<'_, K>> {
        let index = self.starts.partition_point(|&s| s < pos);
        (index < self.len() && self.starts[index] == pos).then(|| Region::new(self, index))
    }

    /// First interval, in insertion order, ending exactly at `pos`.
    pub fn ending_at(&self, pos: u32) -> Option<Region<'_, K>> {
        let sorted_prefix = self.nesting_begins_at.unwrap_or(self.len());
        let prefix = &self.ends[..sorted_prefix];
        let index = prefix.partition_point(|&e| e < pos);
        if index < sorted_prefix && prefix[index] == pos {
            return Some(Region::new(self, index));
        }
        (sorted_prefix..self.len())
            .find(|&i| self.ends[i] == pos)
            .map(|i| Region::new(self, i))
    }

    /// Intervals lying wholly inside `[start, end)`, in insertion order.
    pub fn within(&self, start: u32, end: u32) -> impl Iterator<Item = Region<'_, K>> + '_ {
        let first = self.starts.partition_point(|&s| s < start);
        let last = self.starts.partition_point(|&s| s < end);
        (first..last)
            .filter(move |&i| self.ends[i] <= end)
            .map(move |i| Region::new(self, i))
    }

    // ============================================================
    // Structure
    // ============================================================

    /// Intervals nested exactly one level inside `index`.
    ///
    /// Scans forward while intervals still start inside `index`; after each
    /// child, everything starting before that child's end is a grandchild
    /// and is skipped.
    pub fn children_of(&self, index: usize) -> Vec<Region<'_, K>> {
        let Some(&end) = self.ends.get(index) else {
            return Vec::new();
        };
        let mut children = Vec::new();
        let mut target_start = 0;
        let mut next = index + 1;
        while next < self.len() && self.starts[next] < end {
            if self.starts[next] >= target_start {
                debug_assert_eq!(self.parent_of(next), Some(index));
                children.push(Region::new(self, next));
                target_start = self.ends[next];
            }
            next += 1;
        }
        children
    }

    pub fn parent(&self, index: usize) -> Option<Region<'_, K>> {
        self.parents
            .get(index)
            .and_then(|_| self.parent_of(index))
            .map(|p| Region::new(self, p))
    }

    /// Top-level interval enclosing `index` (itself if top-level).
    pub fn outermost(&self, index: usize) -> Option<Region<'_, K>> {
        if index >= self.len() {
            return None;
        }
        let mut current = index;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        Some(Region::new(self, current))
    }

    /// Number of enclosing intervals (0 for top-level).
    pub fn depth(&self, index: usize) -> usize {
        if index >= self.len() {
            return 0;
        }
        let mut depth = 0;
        let mut current = index;
        while let Some(parent) = self.parent_of(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    // ============================================================
    // Iteration
    // ============================================================

    /// All intervals in insertion order.
    pub fn iter(&self) -> Regions<'_, K> {
        Regions::new(self)
    }

    /// Only intervals not nested inside an earlier one.
    pub fn outermost_regions(&self) -> OutermostRegions<'_, K> {
        OutermostRegions::new(self)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter().flatten()
    }

    // ============================================================
    // Secondary key index
    // ============================================================

    /// Index intervals by a key projection.
    ///
    /// Intervals without a key are skipped. When two intervals project to the
    /// same key only one survives; which one is unspecified. Collisions are
    /// logged and counted by [`KeyIndex::collisions`].
    pub fn index_by<Q, F>(&self, project: F) -> KeyIndex<'_, K, Q>
    where
        Q: Ord,
        F: Fn(&K) -> Q,
    {
        let mut index = KeyIndex::new(self);
        for (i, key) in self.keys.iter().enumerate() {
            let Some(key) = key else { continue };
            if !index.insert(project(key), i) {
                warn!(
                    "[INTERVALS] key index: dropping colliding key at #{} ({}..{})",
                    i, self.starts[i], self.ends[i]
                );
            }
        }
        index
    }

    /// Debug-build invariant check: sorted starts, no straddling, parent
    /// column consistent with bounds.
    pub fn check_invariants(&self) -> RegionResult<()> {
        for i in 0..self.len() {
            RegionError::check_range(self.starts[i], self.ends[i])?;
            if i == 0 {
                continue;
            }
            let previous = (self.starts[i - 1], self.ends[i - 1]);
            if self.starts[i] < previous.0 {
                return Err(RegionError::out_of_order(
                    self.starts[i],
                    self.ends[i],
                    previous,
                    "starts are not sorted",
                ));
            }
            if previous.1 > self.starts[i] && self.ends[i] > previous.1 {
                return Err(RegionError::out_of_order(
                    self.starts[i],
                    self.ends[i],
                    previous,
                    "straddles the previous interval",
                ));
            }
            if let Some(parent) = self.parent_of(i) {
                let encloses =
                    self.starts[parent] <= self.starts[i] && self.ends[i] <= self.ends[parent];
                if parent >= i || !encloses {
                    return Err(RegionError::out_of_order(
                        self.starts[i],
                        self.ends[i],
                        (self.starts[parent], self.ends[parent]),
                        "parent does not enclose child",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<K: Ord + Clone> IntervalStore<K> {
    /// Index intervals by their own key. See [`index_by`](Self::index_by).
    pub fn index(&self) -> KeyIndex<'_, K, K> {
        self.index_by(K::clone)
    }
}

impl<K: Clone> IntervalStore<K> {
    /// A new store holding only the intervals accepted by `keep`.
    pub fn retain<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(Region<'_, K>) -> bool,
    {
        let mut builder = IntervalStoreBuilder::with_capacity(self.len());
        for region in self.iter() {
            if !keep(region) {
                continue;
            }
            // Removing intervals never introduces straddling or disorder.
            let added = builder.add(region.key().cloned(), region.start(), region.end());
            debug_assert!(added.is_ok(), "{added:?}");
        }
        builder.build()
    }

    /// A new store with every offset mapped through `edit`.
    ///
    /// The mapping is monotone, so order and nesting survive; intervals that
    /// collapse to empty are dropped.
    pub fn apply_edit(&self, edit: TextEdit) -> RegionResult<Self> {
        let mut builder = IntervalStoreBuilder::with_capacity(self.len());
        for region in self.iter() {
            if let Some((start, end)) = edit.map_range(region.start(), region.end())? {
                builder.add(region.key().cloned(), start, end)?;
            }
        }
        Ok(builder.build())
    }
}

impl<'a, K> IntoIterator for &'a IntervalStore<K> {
    type Item = Region<'a, K>;
    type IntoIter = Regions<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
