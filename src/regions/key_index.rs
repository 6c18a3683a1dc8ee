//! Sorted secondary index from interval keys to intervals.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::region::Region;
use super::store::IntervalStore;

/// Lookup table from a key projection to the interval carrying it.
///
/// Built by [`IntervalStore::index_by`]. Keys are unique; colliding keys
/// keep a single, unspecified survivor.
pub struct KeyIndex<'a, K, Q> {
    store: &'a IntervalStore<K>,
    by_key: BTreeMap<Q, usize>,
    collisions: usize,
}

impl<'a, K, Q: Ord> KeyIndex<'a, K, Q> {
    pub(super) fn new(store: &'a IntervalStore<K>) -> Self {
        Self {
            store,
            by_key: BTreeMap::new(),
            collisions: 0,
        }
    }

    /// Returns `false` if `key` was already present and this entry was dropped.
    pub(super) fn insert(&mut self, key: Q, index: usize) -> bool {
        match self.by_key.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(index);
                true
            }
            Entry::Occupied(_) => {
                self.collisions += 1;
                false
            }
        }
    }

    pub fn get(&self, key: &Q) -> Option<Region<'a, K>> {
        self.by_key.get(key).and_then(|&i| self.store.get(i))
    }

    pub fn contains_key(&self, key: &Q) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Number of keyed intervals dropped because their key was taken.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Q, Region<'a, K>)> + '_ {
        self.by_key
            .iter()
            .filter_map(|(key, &i)| self.store.get(i).map(|region| (key, region)))
    }
}
