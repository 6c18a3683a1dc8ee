//! Position-sorted projection of a name index.

use std::cmp::Reverse;

use tracing::warn;

use crate::regions::NO_PARENT;

/// Name ordinals re-sorted by `(start, end descending)`, with parent links
/// for nested regions and a second ordering by end.
///
/// Name regions come from arbitrary declaration order, so unlike an
/// interval store nothing guarantees they nest properly. If any two regions
/// straddle, containment queries fall back to a linear scan.
#[derive(Debug, Clone)]
pub(super) struct PositionIndex {
    order: Box<[u32]>,
    starts: Box<[u32]>,
    ends: Box<[u32]>,
    parents: Box<[u32]>,
    by_end: Box<[u32]>,
    by_end_values: Box<[u32]>,
    straddles: bool,
}

impl PositionIndex {
    pub(super) fn build(len: usize, bounds: impl Fn(usize) -> (u32, u32)) -> Self {
        let mut order: Vec<u32> = (0..len as u32).collect();
        order.sort_unstable_by_key(|&i| {
            let (start, end) = bounds(i as usize);
            (start, Reverse(end), i)
        });
        let (starts, ends): (Vec<u32>, Vec<u32>) =
            order.iter().map(|&i| bounds(i as usize)).unzip();

        let mut parents = vec![NO_PARENT; len];
        let mut open: Vec<usize> = Vec::new();
        let mut straddles = false;
        for p in 0..len {
            while open.last().is_some_and(|&top| ends[top] <= starts[p]) {
                open.pop();
            }
            if let Some(&top) = open.last() {
                if ends[p] <= ends[top] {
                    parents[p] = top as u32;
                } else {
                    straddles = true;
                }
            }
            open.push(p);
        }
        if straddles {
            warn!("[NAMES] position index: overlapping regions do not nest; using linear lookup");
        }

        let mut by_end: Vec<u32> = (0..len as u32).collect();
        by_end.sort_unstable_by_key(|&i| (bounds(i as usize).1, i));
        let by_end_values = by_end.iter().map(|&i| bounds(i as usize).1).collect();

        Self {
            order: order.into_boxed_slice(),
            starts: starts.into_boxed_slice(),
            ends: ends.into_boxed_slice(),
            parents: parents.into_boxed_slice(),
            by_end: by_end.into_boxed_slice(),
            by_end_values,
            straddles,
        }
    }

    /// Name ordinals in position order.
    pub(super) fn order(&self) -> &[u32] {
        &self.order
    }

    /// Number of position-ordered entries starting at or before `pos`.
    fn started_by(&self, pos: u32) -> usize {
        self.starts.partition_point(|&s| s <= pos)
    }

    /// Innermost region containing `pos`, as a name ordinal.
    pub(super) fn region_at(&self, pos: u32) -> Option<usize> {
        let candidates = self.started_by(pos);
        if self.straddles {
            return (0..candidates)
                .rev()
                .find(|&p| self.ends[p] > pos)
                .map(|p| self.order[p] as usize);
        }
        let mut p = candidates.checked_sub(1)?;
        loop {
            if self.ends[p] > pos {
                return Some(self.order[p] as usize);
            }
            let parent = self.parents[p];
            if parent == NO_PARENT {
                return None;
            }
            p = parent as usize;
        }
    }

    pub(super) fn nearest_preceding(&self, pos: u32) -> Option<usize> {
        let p = self.started_by(pos).checked_sub(1)?;
        Some(self.order[p] as usize)
    }

    pub(super) fn with_start(&self, pos: u32) -> Option<usize> {
        let p = self.starts.partition_point(|&s| s < pos);
        (p < self.starts.len() && self.starts[p] == pos).then(|| self.order[p] as usize)
    }

    pub(super) fn with_end(&self, pos: u32) -> Option<usize> {
        let p = self.by_end_values.partition_point(|&e| e < pos);
        (p < self.by_end_values.len() && self.by_end_values[p] == pos)
            .then(|| self.by_end[p] as usize)
    }
}
