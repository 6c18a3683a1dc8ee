//! Write-only phase of a [`NameIndex`].

use std::collections::hash_map::Entry;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::index::{DuplicateMap, NameIndex, Occurrence};
use crate::base::{RegionError, RegionKind, RegionResult};

/// Collects declarations, resolving repeated names by kind priority.
#[derive(Debug, Clone)]
pub struct NameIndexBuilder<K> {
    primaries: FxHashMap<SmolStr, Occurrence<K>>,
    duplicates: DuplicateMap<K>,
}

impl<K: RegionKind> Default for NameIndexBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RegionKind> NameIndexBuilder<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primaries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            duplicates: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.primaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primaries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.primaries.contains_key(name)
    }

    /// Record a declaration of `name` spanning `[start, end)`.
    ///
    /// Returns `true` if this occurrence is now the primary declaration of
    /// `name`. When the name is already present, the occurrence with the
    /// lower kind ordinal stays primary (the earlier one on a tie) and the
    /// other is appended to the duplicates table.
    ///
    /// # Errors
    /// [`RegionError::InvalidRange`] if `start >= end`; nothing is recorded.
    pub fn add(
        &mut self,
        name: impl Into<SmolStr>,
        kind: K,
        start: u32,
        end: u32,
    ) -> RegionResult<bool> {
        RegionError::check_range(start, end)?;
        let name = name.into();
        let occurrence = Occurrence { kind, start, end };
        trace!("[NAMES] add '{}' {:?} {}..{}", name, kind, start, end);

        let mut slot = match self.primaries.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(occurrence);
                return Ok(true);
            }
            Entry::Occupied(slot) => slot,
        };
        let primary = slot.get_mut();
        if kind.outranks(primary.kind) {
            let displaced = std::mem::replace(primary, occurrence);
            self.duplicates.entry(name).or_default().push(displaced);
            Ok(true)
        } else {
            self.duplicates.entry(name).or_default().push(occurrence);
            Ok(false)
        }
    }

    /// Record a declaration whose region is exactly the name's own text.
    pub fn add_name(
        &mut self,
        name: impl Into<SmolStr>,
        kind: K,
        start: u32,
    ) -> RegionResult<bool> {
        let name = name.into();
        let end =
            implicit_end(&name, start).ok_or(RegionError::InvalidRange { start, end: start })?;
        self.add(name, kind, start, end)
    }

    /// Move the primary declaration of `name`. Returns `false` if absent.
    pub fn set_offsets(&mut self, name: &str, start: u32, end: u32) -> RegionResult<bool> {
        RegionError::check_range(start, end)?;
        Ok(match self.primaries.get_mut(name) {
            Some(primary) => {
                primary.start = start;
                primary.end = end;
                true
            }
            None => false,
        })
    }

    /// Sort names and freeze into an immutable index.
    pub fn build(self) -> NameIndex<K> {
        let mut entries: Vec<(SmolStr, Occurrence<K>)> = self.primaries.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        debug!(
            "[NAMES] build: {} names, {} duplicated",
            entries.len(),
            self.duplicates.len()
        );
        NameIndex::from_sorted_entries(entries, self.duplicates)
    }
}

/// `start + name.len()`, or `None` for an empty name or on overflow.
pub(super) fn implicit_end(name: &str, start: u32) -> Option<u32> {
    let len = u32::try_from(name.len()).ok().filter(|&len| len > 0)?;
    start.checked_add(len)
}
