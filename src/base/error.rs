//! Error types for region and graph construction.
//!
//! Only programmer-contract violations are errors. Duplicate declarations and
//! references to undeclared names are legitimate states of broken source
//! text; they are recorded as data by the name index and reference graph.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type RegionResult<T> = Result<T, RegionError>;

/// Errors raised when a caller violates a construction or query contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// `start >= end` was supplied for an interval.
    #[error("invalid range {start}..{end}: start must be less than end")]
    InvalidRange { start: u32, end: u32 },

    /// An interval was appended out of depth-first order, or it straddles
    /// an interval that is still open.
    #[error(
        "out-of-order insertion of {start}..{end} after {previous_start}..{previous_end}: {reason}"
    )]
    OutOfOrderInsertion {
        start: u32,
        end: u32,
        previous_start: u32,
        previous_end: u32,
        reason: &'static str,
    },

    /// A node or element index outside `0..len`.
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// Applying an edit would move an offset outside `0..=u32::MAX`.
    #[error("offset {offset} cannot be shifted by {delta}")]
    OffsetOverflow { offset: u32, delta: i64 },

    /// Serialization of an index failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// A serialized index is malformed.
    #[error("decode error: {0}")]
    Decode(String),
}

impl RegionError {
    pub(crate) fn out_of_order(
        start: u32,
        end: u32,
        previous: (u32, u32),
        reason: &'static str,
    ) -> Self {
        Self::OutOfOrderInsertion {
            start,
            end,
            previous_start: previous.0,
            previous_end: previous.1,
            reason,
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Validate that `index` addresses one of `len` elements.
    #[inline]
    pub fn check_index(index: usize, len: usize) -> RegionResult<usize> {
        if index < len {
            Ok(index)
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }

    /// Validate a half-open range.
    #[inline]
    pub fn check_range(start: u32, end: u32) -> RegionResult<()> {
        if start < end {
            Ok(())
        } else {
            Err(Self::InvalidRange { start, end })
        }
    }
}
