//! Offset remapping for small incremental text edits.

use super::error::{RegionError, RegionResult};

/// A single insertion or deletion at a byte offset.
///
/// A positive `delta` inserts `delta` bytes at `offset`; a negative `delta`
/// deletes `-delta` bytes starting at `offset`. [`TextEdit::map`] is
/// monotone (never reorders two offsets), so applying it to a properly
/// nested set of intervals keeps them properly nested; intervals can only
/// collapse to empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextEdit {
    pub offset: u32,
    pub delta: i64,
}

impl TextEdit {
    pub fn new(offset: u32, delta: i64) -> Self {
        Self { offset, delta }
    }

    pub fn insertion(offset: u32, len: u32) -> Self {
        Self::new(offset, i64::from(len))
    }

    pub fn deletion(offset: u32, len: u32) -> Self {
        Self::new(offset, -i64::from(len))
    }

    /// Map an offset from before the edit to after it.
    ///
    /// Offsets before `self.offset` are untouched. For an insertion, an
    /// offset equal to `self.offset` moves right. For a deletion, offsets
    /// inside the deleted span collapse onto `self.offset`.
    pub fn map(&self, pos: u32) -> RegionResult<u32> {
        self.map_start(pos)
    }

    /// Map an interval start; identical to [`map`](Self::map).
    pub fn map_start(&self, pos: u32) -> RegionResult<u32> {
        if pos < self.offset || self.delta == 0 {
            return Ok(pos);
        }
        let overflow = || RegionError::OffsetOverflow {
            offset: pos,
            delta: self.delta,
        };
        let shifted = |pos: u32| {
            i64::from(pos)
                .checked_add(self.delta)
                .and_then(|shifted| u32::try_from(shifted).ok())
                .ok_or_else(overflow)
        };
        if self.delta > 0 {
            return shifted(pos);
        }
        let deleted_end = i64::from(self.offset)
            .checked_sub(self.delta)
            .ok_or_else(overflow)?;
        if i64::from(pos) < deleted_end {
            Ok(self.offset)
        } else {
            shifted(pos)
        }
    }

    /// Map an exclusive interval end.
    ///
    /// Differs from [`map_start`](Self::map_start) only for an insertion
    /// exactly at the end: an interval ending where text is inserted lies
    /// wholly before the edit and keeps its end.
    pub fn map_end(&self, pos: u32) -> RegionResult<u32> {
        if self.delta > 0 && pos == self.offset {
            return Ok(pos);
        }
        self.map_start(pos)
    }

    /// Map a half-open interval; `None` if it collapses to empty.
    pub fn map_range(&self, start: u32, end: u32) -> RegionResult<Option<(u32, u32)>> {
        let start = self.map_start(start)?;
        let end = self.map_end(end)?;
        Ok((start < end).then_some((start, end)))
    }
}
