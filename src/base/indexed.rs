//! Minimal indexed-collection capability.
//!
//! Interval stores, name indexes and graphs exchange positions through this
//! trait instead of naming each other's concrete types: a graph node is just
//! an index into "some collection", and the collection answers which item
//! lives there.

use std::sync::Arc;

use smol_str::SmolStr;

use super::bitset::BitSet;

/// A finite collection addressable by dense `0..len` indices.
pub trait IndexedCollection {
    type Item: ?Sized + PartialEq;

    /// Number of addressable items.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of `item`, if present.
    fn index_of(&self, item: &Self::Item) -> Option<usize>;

    /// Item at `index`, if in range.
    fn get(&self, index: usize) -> Option<&Self::Item>;
}

impl<C: IndexedCollection + ?Sized> IndexedCollection for &C {
    type Item = C::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        (**self).index_of(item)
    }

    fn get(&self, index: usize) -> Option<&Self::Item> {
        (**self).get(index)
    }
}

impl<C: IndexedCollection + ?Sized> IndexedCollection for Arc<C> {
    type Item = C::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        (**self).index_of(item)
    }

    fn get(&self, index: usize) -> Option<&Self::Item> {
        (**self).get(index)
    }
}

/// Resolve every index in `set` against `collection`, skipping indices the
/// collection does not hold.
pub fn collect_items<'c, C>(collection: &'c C, set: &BitSet) -> Vec<&'c C::Item>
where
    C: IndexedCollection + ?Sized,
{
    set.iter().filter_map(|i| collection.get(i)).collect()
}

// ============================================================================
// SORTED NAMES
// ============================================================================

/// A sorted, duplicate-free array of names; lookups are binary searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedNames {
    names: Box<[SmolStr]>,
}

impl SortedNames {
    /// Sort and deduplicate arbitrary names.
    pub fn from_unsorted<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut names: Vec<SmolStr> = names.into_iter().map(Into::into).collect();
        names.sort_unstable();
        names.dedup();
        Self {
            names: names.into_boxed_slice(),
        }
    }

    /// Wrap names that are already strictly ascending.
    pub fn from_sorted(names: Vec<SmolStr>) -> Option<Self> {
        names.windows(2).all(|w| w[0] < w[1]).then(|| Self {
            names: names.into_boxed_slice(),
        })
    }

    pub fn as_slice(&self) -> &[SmolStr] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(SmolStr::as_str)
    }
}

impl IndexedCollection for SortedNames {
    type Item = str;

    fn len(&self) -> usize {
        self.names.len()
    }

    fn index_of(&self, item: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(item)).ok()
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(SmolStr::as_str)
    }
}

// ============================================================================
// PLAIN LIST
// ============================================================================

/// An unordered list; `index_of` is a linear scan for the first equal item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedList<T> {
    items: Vec<T>,
}

impl<T: PartialEq> IndexedList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> FromIterator<T> for IndexedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: PartialEq> IndexedCollection for IndexedList<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

// ============================================================================
// STACKED
// ============================================================================

/// Two collections addressed as one: `0..left.len()` maps to `left`,
/// `left.len()..` maps to `right` shifted down by `left.len()`.
///
/// When an item occurs on both sides, `index_of` reports the left one.
#[derive(Debug, Clone)]
pub struct Stacked<A, B> {
    left: A,
    right: B,
}

impl<A, B> Stacked<A, B>
where
    A: IndexedCollection,
    B: IndexedCollection<Item = A::Item>,
{
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &A {
        &self.left
    }

    pub fn right(&self) -> &B {
        &self.right
    }

    /// First combined index belonging to the right side.
    #[inline]
    pub fn boundary(&self) -> usize {
        self.left.len()
    }
}

impl<A, B> IndexedCollection for Stacked<A, B>
where
    A: IndexedCollection,
    B: IndexedCollection<Item = A::Item>,
{
    type Item = A::Item;

    fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        self.left
            .index_of(item)
            .or_else(|| self.right.index_of(item).map(|i| i + self.boundary()))
    }

    fn get(&self, index: usize) -> Option<&Self::Item> {
        match index.checked_sub(self.boundary()) {
            None => self.left.get(index),
            Some(local) => self.right.get(local),
        }
    }
}
