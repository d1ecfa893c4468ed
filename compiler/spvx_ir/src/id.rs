//! Module-level entity identifier.
//!
//! Every result id in a SPIR-V module lives in one dense namespace
//! `[0, bound)`. The same `Id` addresses the Variant Store, the Meta Store,
//! the structural control-flow registry and the entry point table.

use std::fmt;

/// Dense identifier of one module-level entity.
///
/// Id 0 is never produced by a valid module and is used as "no id".
/// Ids are never reused or recycled; the bound only grows.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Id(u32);

impl Id {
    /// The "no id" sentinel.
    pub const NONE: Id = Id(0);

    /// Create an id from its raw SPIR-V word.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Id(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` for the "no id" sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` for any id other than the sentinel.
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(raw: u32) -> Self {
        Id(raw)
    }
}

impl From<Id> for u32 {
    #[inline]
    fn from(id: Id) -> Self {
        id.0
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}
