//! Kind tags for named regions.
//!
//! The ordinal of a kind doubles as its priority when the same name is
//! declared more than once: the occurrence with the LOWEST ordinal becomes
//! the primary declaration, every other occurrence is recorded as a
//! duplicate. Ties keep the first occurrence.

use std::fmt::Debug;
use std::hash::Hash;

/// A copyable classification tag with a stable ordinal.
///
/// `from_ordinal(k.ordinal()) == Some(k)` must hold for every value; the
/// persisted form of a name index stores ordinals only.
pub trait RegionKind: Copy + Eq + Hash + Debug {
    /// Declaration-order position of this kind; lower wins on duplicates.
    fn ordinal(self) -> u16;

    /// Inverse of [`RegionKind::ordinal`].
    fn from_ordinal(ordinal: u16) -> Option<Self>;

    /// Whether `self` takes priority over `other` for the same name.
    #[inline]
    fn outranks(self, other: Self) -> bool {
        self.ordinal() < other.ordinal()
    }
}

/// Declaration categories found in a grammar file.
///
/// Variant order is the duplicate-resolution priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclKind {
    ParserRule,
    LexerRule,
    Fragment,
    Mode,
    Channel,
    TokensEntry,
}

impl DeclKind {
    pub const ALL: [DeclKind; 6] = [
        DeclKind::ParserRule,
        DeclKind::LexerRule,
        DeclKind::Fragment,
        DeclKind::Mode,
        DeclKind::Channel,
        DeclKind::TokensEntry,
    ];

    /// Get a human-readable name for display.
    pub fn display(&self) -> &'static str {
        match self {
            DeclKind::ParserRule => "parser rule",
            DeclKind::LexerRule => "lexer rule",
            DeclKind::Fragment => "fragment",
            DeclKind::Mode => "mode",
            DeclKind::Channel => "channel",
            DeclKind::TokensEntry => "token",
        }
    }

    /// Whether references to this kind resolve against lexer names.
    pub fn is_lexical(&self) -> bool {
        !matches!(self, DeclKind::ParserRule)
    }
}

impl RegionKind for DeclKind {
    #[inline]
    fn ordinal(self) -> u16 {
        self as u16
    }

    fn from_ordinal(ordinal: u16) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }
}
