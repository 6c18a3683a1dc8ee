//! Flyweight view of one entry of a [`NameIndex`].

use std::fmt;

use text_size::TextRange;

use super::index::{NameIndex, Occurrence};
use crate::base::{RegionKind, text_range};

/// A named region: a back-reference to the index plus the name's ordinal.
pub struct NamedRegion<'a, K> {
    owner: &'a NameIndex<K>,
    ordinal: usize,
}

impl<K> Clone for NamedRegion<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NamedRegion<'_, K> {}

impl<'a, K: RegionKind> NamedRegion<'a, K> {
    #[inline]
    pub(super) fn new(owner: &'a NameIndex<K>, ordinal: usize) -> Self {
        Self { owner, ordinal }
    }

    /// Position of the name in sorted name order.
    #[inline]
    pub fn index(&self) -> usize {
        self.ordinal
    }

    pub fn name(&self) -> &'a str {
        self.owner.name_of(self.ordinal)
    }

    pub fn kind(&self) -> K {
        self.owner.kind_of(self.ordinal)
    }

    pub fn start(&self) -> u32 {
        self.owner.start_of(self.ordinal)
    }

    pub fn end(&self) -> u32 {
        self.owner.end_of(self.ordinal)
    }

    pub fn len(&self) -> u32 {
        self.end() - self.start()
    }

    /// Always `false`; empty regions are rejected by the builder.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn range(&self) -> TextRange {
        text_range(self.start(), self.end())
    }

    pub fn contains(&self, pos: u32) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Kind and bounds as a plain value.
    pub fn occurrence(&self) -> Occurrence<K> {
        Occurrence {
            kind: self.kind(),
            start: self.start(),
            end: self.end(),
        }
    }

    pub fn owner(&self) -> &'a NameIndex<K> {
        self.owner
    }
}

impl<K> PartialEq for NamedRegion<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.owner, other.owner) && self.ordinal == other.ordinal
    }
}

impl<K> Eq for NamedRegion<'_, K> {}

impl<K: RegionKind> fmt::Debug for NamedRegion<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:?}@{}..{}",
            self.name(),
            self.kind(),
            self.start(),
            self.end()
        )
    }
}
