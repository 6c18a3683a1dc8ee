//! The frozen name index.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use smol_str::SmolStr;
use tracing::debug;

use super::builder::{NameIndexBuilder, implicit_end};
use super::position::PositionIndex;
use super::region::NamedRegion;
use crate::base::{
    IndexedCollection, RegionError, RegionKind, RegionResult, SortedNames, TextEdit,
};

/// One recorded occurrence of a name: its kind and bounds.
///
/// Used for the primary entries inside a builder and for every entry of the
/// duplicates table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence<K> {
    pub kind: K,
    pub start: u32,
    pub end: u32,
}

/// Name → every non-primary [`Occurrence`], in the order they were diverted.
pub type DuplicateMap<K> = IndexMap<SmolStr, Vec<Occurrence<K>>>;

/// Immutable table of unique names, each with a kind and a region.
///
/// Parallel arrays indexed by name ordinal (position in sorted name order).
/// When every region is exactly its name's text, `ends` is omitted and
/// computed as `start + name.len()`.
#[derive(Debug, Clone)]
pub struct NameIndex<K> {
    names: SortedNames,
    kinds: Box<[K]>,
    starts: Box<[u32]>,
    ends: Option<Box<[u32]>>,
    duplicates: DuplicateMap<K>,
    /// Built on the first positional query.
    positions: OnceCell<PositionIndex>,
}

impl<K: RegionKind> NameIndex<K> {
    pub fn builder() -> NameIndexBuilder<K> {
        NameIndexBuilder::new()
    }

    pub(super) fn from_sorted_entries(
        entries: Vec<(SmolStr, Occurrence<K>)>,
        duplicates: DuplicateMap<K>,
    ) -> Self {
        let implicit = entries
            .iter()
            .all(|(name, d)| implicit_end(name, d.start) == Some(d.end));
        let ends = (!implicit).then(|| entries.iter().map(|(_, d)| d.end).collect());
        let kinds = entries.iter().map(|(_, d)| d.kind).collect();
        let starts = entries.iter().map(|(_, d)| d.start).collect();
        let names = SortedNames::from_sorted(entries.into_iter().map(|(name, _)| name).collect());
        debug_assert!(names.is_some(), "names must be unique and sorted");
        Self {
            names: names.unwrap_or_default(),
            kinds,
            starts,
            ends,
            duplicates,
            positions: OnceCell::new(),
        }
    }

    pub(super) fn from_parts(
        names: SortedNames,
        kinds: Box<[K]>,
        starts: Box<[u32]>,
        ends: Option<Box<[u32]>>,
        duplicates: DuplicateMap<K>,
    ) -> Self {
        Self {
            names,
            kinds,
            starts,
            ends,
            duplicates,
            positions: OnceCell::new(),
        }
    }

    // ============================================================
    // Name lookups
    // ============================================================

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in ascending order.
    pub fn names(&self) -> &SortedNames {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.index_of(name).is_some()
    }

    /// Ordinal of `name`, usable as a graph node id.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.index_of(name)
    }

    /// Region declared for `name`. O(log n).
    pub fn region_for(&self, name: &str) -> Option<NamedRegion<'_, K>> {
        self.index_of(name).map(|i| NamedRegion::new(self, i))
    }

    pub fn get(&self, index: usize) -> Option<NamedRegion<'_, K>> {
        (index < self.len()).then(|| NamedRegion::new(self, index))
    }

    /// Like [`get`](Self::get), but out-of-range is an error.
    pub fn region(&self, index: usize) -> RegionResult<NamedRegion<'_, K>> {
        RegionError::check_index(index, self.len()).map(|i| NamedRegion::new(self, i))
    }

    /// Regions in name order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NamedRegion<'_, K>> + ExactSizeIterator {
        (0..self.len()).map(move |i| NamedRegion::new(self, i))
    }

    /// Regions of one kind, in name order.
    pub fn of_kind(&self, kind: K) -> impl Iterator<Item = NamedRegion<'_, K>> {
        self.iter().filter(move |region| region.kind() == kind)
    }

    #[inline]
    pub(crate) fn name_of(&self, index: usize) -> &str {
        self.names.as_slice()[index].as_str()
    }

    #[inline]
    pub(crate) fn kind_of(&self, index: usize) -> K {
        self.kinds[index]
    }

    #[inline]
    pub(crate) fn start_of(&self, index: usize) -> u32 {
        self.starts[index]
    }

    #[inline]
    pub(crate) fn end_of(&self, index: usize) -> u32 {
        match &self.ends {
            Some(ends) => ends[index],
            None => self.starts[index] + self.name_of(index).len() as u32,
        }
    }

    /// Whether region bounds are stored explicitly rather than derived from
    /// name lengths.
    pub fn has_explicit_ends(&self) -> bool {
        self.ends.is_some()
    }

    // ============================================================
    // Position lookups
    // ============================================================

    fn positions(&self) -> &PositionIndex {
        self.positions.get_or_init(|| {
            debug!("[NAMES] building position index for {} names", self.len());
            PositionIndex::build(self.len(), |i| (self.start_of(i), self.end_of(i)))
        })
    }

    /// Innermost region containing `pos`.
    pub fn at(&self, pos: u32) -> Option<NamedRegion<'_, K>> {
        self.positions().region_at(pos).map(|i| NamedRegion::new(self, i))
    }

    /// Region with the greatest start at or before `pos`, whether or not it
    /// contains `pos`.
    pub fn nearest_preceding(&self, pos: u32) -> Option<NamedRegion<'_, K>> {
        self.positions()
            .nearest_preceding(pos)
            .map(|i| NamedRegion::new(self, i))
    }

    /// Outermost region starting exactly at `pos`.
    pub fn with_start(&self, pos: u32) -> Option<NamedRegion<'_, K>> {
        self.positions().with_start(pos).map(|i| NamedRegion::new(self, i))
    }

    /// A region ending exactly at `pos`.
    pub fn with_end(&self, pos: u32) -> Option<NamedRegion<'_, K>> {
        self.positions().with_end(pos).map(|i| NamedRegion::new(self, i))
    }

    /// Regions ordered by `(start, end descending)`.
    pub fn iter_by_position(&self) -> impl Iterator<Item = NamedRegion<'_, K>> {
        self.positions()
            .order()
            .iter()
            .map(move |&i| NamedRegion::new(self, i as usize))
    }

    // ============================================================
    // Fuzzy lookup
    // ============================================================

    /// The `count` stored names closest to `name` by Levenshtein distance,
    /// nearest first; ties are broken by name order.
    pub fn top_similar_names(&self, name: &str, count: usize) -> Vec<NamedRegion<'_, K>> {
        let mut scored: Vec<(usize, usize)> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, candidate)| (strsim::levenshtein(name, candidate), i))
            .collect();
        scored.sort_unstable();
        scored
            .into_iter()
            .take(count)
            .map(|(_, i)| NamedRegion::new(self, i))
            .collect()
    }

    // ============================================================
    // Duplicates
    // ============================================================

    /// Every non-primary occurrence of each repeated name.
    pub fn duplicates(&self) -> &DuplicateMap<K> {
        &self.duplicates
    }

    pub fn duplicates_of(&self, name: &str) -> &[Occurrence<K>] {
        self.duplicates.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// Index over the shadowed occurrences: for each duplicated name, the
    /// highest-priority duplicate becomes primary.
    pub fn secondary(&self) -> NameIndex<K> {
        let mut builder = NameIndexBuilder::with_capacity(self.duplicates.len());
        for (name, occurrences) in &self.duplicates {
            for d in occurrences {
                // Bounds were validated when first recorded.
                let added = builder.add(name.clone(), d.kind, d.start, d.end);
                debug_assert!(added.is_ok(), "{added:?}");
            }
        }
        builder.build()
    }

    // ============================================================
    // Rebuilds
    // ============================================================

    /// A new index without `names`. Ordinals of the remaining names change,
    /// so graphs built against `self` do not apply to the result.
    pub fn sans<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> NameIndex<K> {
        let removed: rustc_hash::FxHashSet<&str> = names.into_iter().collect();
        let entries = self
            .iter()
            .filter(|region| !removed.contains(region.name()))
            .map(|region| (SmolStr::new(region.name()), region.occurrence()))
            .collect();
        let duplicates = self
            .duplicates
            .iter()
            .filter(|(name, _)| !removed.contains(name.as_str()))
            .map(|(name, occurrences)| (name.clone(), occurrences.clone()))
            .collect();
        Self::from_sorted_entries(entries, duplicates)
    }

    /// A new index adjusted for `amount` bytes inserted (positive) or
    /// deleted (negative) at `at`. See [`apply_edit`](Self::apply_edit).
    pub fn shifted_by(&self, amount: i64, at: u32) -> RegionResult<NameIndex<K>> {
        self.apply_edit(TextEdit::new(at, amount))
    }

    /// A new index with every region mapped through `edit`.
    ///
    /// Regions wholly before the edit are untouched, regions wholly after it
    /// are translated, straddling regions grow or shrink. A region that
    /// collapses to empty, or that lands on exactly the bounds of a region
    /// kept before it in position order, is dropped.
    pub fn apply_edit(&self, edit: TextEdit) -> RegionResult<NameIndex<K>> {
        let mut shifted: Vec<(u32, u32, usize, usize)> = Vec::with_capacity(self.len());
        for (rank, &i) in self.positions().order().iter().enumerate() {
            let i = i as usize;
            if let Some((start, end)) = edit.map_range(self.start_of(i), self.end_of(i))? {
                shifted.push((start, end, rank, i));
            }
        }
        shifted.sort_unstable();
        shifted.dedup_by_key(|&mut (start, end, _, _)| (start, end));
        shifted.sort_unstable_by_key(|&(_, _, _, i)| i);
        let entries = shifted
            .into_iter()
            .map(|(start, end, _, i)| {
                let occurrence = Occurrence {
                    kind: self.kind_of(i),
                    start,
                    end,
                };
                (self.names.as_slice()[i].clone(), occurrence)
            })
            .collect();

        let mut duplicates = DuplicateMap::with_capacity(self.duplicates.len());
        for (name, occurrences) in &self.duplicates {
            let mut moved = Vec::with_capacity(occurrences.len());
            for d in occurrences {
                if let Some((start, end)) = edit.map_range(d.start, d.end)? {
                    moved.push(Occurrence { start, end, ..*d });
                }
            }
            if !moved.is_empty() {
                duplicates.insert(name.clone(), moved);
            }
        }
        Ok(Self::from_sorted_entries(entries, duplicates))
    }
}

impl<K: RegionKind> Default for NameIndex<K> {
    fn default() -> Self {
        NameIndexBuilder::new().build()
    }
}

impl<K: RegionKind> PartialEq for NameIndex<K> {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
            && self.kinds == other.kinds
            && self.starts == other.starts
            && self.ends == other.ends
            && self.duplicates == other.duplicates
    }
}

impl<K: RegionKind> Eq for NameIndex<K> {}

impl<K: RegionKind> IndexedCollection for NameIndex<K> {
    type Item = str;

    fn len(&self) -> usize {
        self.names.len()
    }

    fn index_of(&self, item: &str) -> Option<usize> {
        self.names.index_of(item)
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index)
    }
}
