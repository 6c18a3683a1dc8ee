//! Flyweight views over an [`IntervalStore`].

use std::fmt;
use std::iter::FusedIterator;

use text_size::TextRange;

use super::store::IntervalStore;
use crate::base::text_range;

/// One interval of a store: a back-reference plus an index, never an owned
/// copy of the data.
pub struct Region<'a, K> {
    store: &'a IntervalStore<K>,
    index: usize,
}

impl<K> Clone for Region<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Region<'_, K> {}

impl<'a, K> Region<'a, K> {
    #[inline]
    pub(super) fn new(store: &'a IntervalStore<K>, index: usize) -> Self {
        Self { store, index }
    }

    /// Insertion-order index within the owning store.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.store.start_of(self.index)
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.store.end_of(self.index)
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end() - self.start()
    }

    /// Always `false`; empty intervals are rejected on insertion.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn key(&self) -> Option<&'a K> {
        self.store.key_of(self.index)
    }

    pub fn range(&self) -> TextRange {
        text_range(self.start(), self.end())
    }

    #[inline]
    pub fn contains(&self, pos: u32) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Whether `[start, end)` lies wholly inside this interval.
    pub fn encloses(&self, start: u32, end: u32) -> bool {
        self.start() <= start && end <= self.end()
    }

    pub fn parent(&self) -> Option<Region<'a, K>> {
        self.store.parent(self.index)
    }

    pub fn children(&self) -> Vec<Region<'a, K>> {
        self.store.children_of(self.index)
    }

    pub fn outermost(&self) -> Region<'a, K> {
        self.store.outermost(self.index).unwrap_or(*self)
    }

    pub fn depth(&self) -> usize {
        self.store.depth(self.index)
    }

    pub fn is_top_level(&self) -> bool {
        self.store.parent_of(self.index).is_none()
    }
}

impl<K> PartialEq for Region<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.store, other.store) && self.index == other.index
    }
}

impl<K> Eq for Region<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for Region<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("index", &self.index)
            .field("start", &self.start())
            .field("end", &self.end())
            .field("key", &self.key())
            .finish()
    }
}

// ============================================================================
// ITERATORS
// ============================================================================

/// All intervals of a store in insertion order.
pub struct Regions<'a, K> {
    store: &'a IntervalStore<K>,
    front: usize,
    back: usize,
}

impl<'a, K> Regions<'a, K> {
    pub(super) fn new(store: &'a IntervalStore<K>) -> Self {
        Self {
            store,
            front: 0,
            back: store.len(),
        }
    }
}

impl<'a, K> Iterator for Regions<'a, K> {
    type Item = Region<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let region = Region::new(self.store, self.front);
        self.front += 1;
        Some(region)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<K> DoubleEndedIterator for Regions<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Region::new(self.store, self.back))
    }
}

impl<K> ExactSizeIterator for Regions<'_, K> {}

impl<K> FusedIterator for Regions<'_, K> {}

/// Intervals not nested inside any previously yielded one.
pub struct OutermostRegions<'a, K> {
    store: &'a IntervalStore<K>,
    next: usize,
    highest_end_seen: u32,
}

impl<'a, K> OutermostRegions<'a, K> {
    pub(super) fn new(store: &'a IntervalStore<K>) -> Self {
        Self {
            store,
            next: 0,
            highest_end_seen: 0,
        }
    }
}

impl<'a, K> Iterator for OutermostRegions<'a, K> {
    type Item = Region<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.store.len() {
            let index = self.next;
            self.next += 1;
            if self.store.start_of(index) >= self.highest_end_seen {
                self.highest_end_seen = self.store.end_of(index);
                return Some(Region::new(self.store, index));
            }
        }
        None
    }
}

impl<K> FusedIterator for OutermostRegions<'_, K> {}

/// Intervals containing a position, innermost first.
pub struct Containing<'a, K> {
    store: &'a IntervalStore<K>,
    current: Option<usize>,
}

impl<'a, K> Containing<'a, K> {
    pub(super) fn new(store: &'a IntervalStore<K>, innermost: Option<usize>) -> Self {
        Self {
            store,
            current: innermost,
        }
    }
}

impl<'a, K> Iterator for Containing<'a, K> {
    type Item = Region<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        self.current = self.store.parent_of(index);
        Some(Region::new(self.store, index))
    }
}

impl<K> FusedIterator for Containing<'_, K> {}
