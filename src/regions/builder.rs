//! Append-only construction of an [`IntervalStore`].

use tracing::{debug, trace};

use super::NO_PARENT;
use super::store::IntervalStore;
use crate::base::{RegionError, RegionResult};

/// Write-only phase of an interval store.
///
/// Every [`add`](Self::add) is validated against the previously added
/// interval and against every ancestor that is still open; a rejected call
/// leaves the builder untouched.
#[derive(Debug, Clone)]
pub struct IntervalStoreBuilder<K> {
    pub(super) starts: Vec<u32>,
    pub(super) ends: Vec<u32>,
    pub(super) keys: Vec<Option<K>>,
    pub(super) parents: Vec<u32>,
    /// Indices of intervals that may still receive nested children,
    /// outermost first.
    open: Vec<u32>,
    nesting_begins_at: Option<usize>,
}

impl<K> Default for IntervalStoreBuilder<K> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K> IntervalStoreBuilder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            starts: Vec::with_capacity(capacity),
            ends: Vec::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            parents: Vec::with_capacity(capacity),
            open: Vec::new(),
            nesting_begins_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Bounds of the most recently added interval.
    pub fn last(&self) -> Option<(u32, u32)> {
        let last = self.len().checked_sub(1)?;
        Some((self.starts[last], self.ends[last]))
    }

    /// Append one interval and return its index.
    ///
    /// # Errors
    /// - [`RegionError::InvalidRange`] if `start >= end`.
    /// - [`RegionError::OutOfOrderInsertion`] if `start` precedes the previous
    ///   interval's start, or if the interval begins inside an open ancestor
    ///   but ends after it.
    pub fn add(&mut self, key: Option<K>, start: u32, end: u32) -> RegionResult<usize> {
        let depth = self.placement(start, end)?;
        Ok(self.commit(key, start, end, depth))
    }

    /// Append an interval without a key.
    pub fn add_unkeyed(&mut self, start: u32, end: u32) -> RegionResult<usize> {
        self.add(None, start, end)
    }

    /// Freeze into an immutable store.
    pub fn build(self) -> IntervalStore<K> {
        debug!(
            "[INTERVALS] build: {} intervals, nesting_begins_at={:?}",
            self.starts.len(),
            self.nesting_begins_at
        );
        let store = IntervalStore::from_columns(
            self.starts.into_boxed_slice(),
            self.ends.into_boxed_slice(),
            self.keys.into_boxed_slice(),
            self.parents.into_boxed_slice(),
            self.nesting_begins_at,
        );
        debug_assert!(store.check_invariants().is_ok());
        store
    }

    /// Validate `[start, end)` against the current state and return how many
    /// entries of the open-ancestor stack remain in scope for it.
    fn placement(&self, start: u32, end: u32) -> RegionResult<usize> {
        RegionError::check_range(start, end)?;
        if let Some((last_start, last_end)) = self.last() {
            if start < last_start {
                return Err(RegionError::out_of_order(
                    start,
                    end,
                    (last_start, last_end),
                    "start precedes the previous interval's start",
                ));
            }
        }
        let mut depth = self.open.len();
        while depth > 0 && self.ends[self.open[depth - 1] as usize] <= start {
            depth -= 1;
        }
        if depth > 0 {
            let ancestor = self.open[depth - 1] as usize;
            if end > self.ends[ancestor] {
                return Err(RegionError::out_of_order(
                    start,
                    end,
                    (self.starts[ancestor], self.ends[ancestor]),
                    "straddles an enclosing interval",
                ));
            }
        }
        Ok(depth)
    }

    fn commit(&mut self, key: Option<K>, start: u32, end: u32, depth: usize) -> usize {
        let index = self.starts.len();
        self.open.truncate(depth);
        let parent = self.open.last().copied().unwrap_or(NO_PARENT);
        if parent != NO_PARENT && self.nesting_begins_at.is_none() {
            self.nesting_begins_at = Some(index);
        }
        trace!(
            "[INTERVALS] add #{} {}..{} depth={} parent={:?}",
            index,
            start,
            end,
            depth,
            (parent != NO_PARENT).then_some(parent)
        );
        self.starts.push(start);
        self.ends.push(end);
        self.keys.push(key);
        self.parents.push(parent);
        self.open.push(index as u32);
        index
    }
}
