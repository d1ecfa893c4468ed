//! Compact flag set for decorations and execution modes.
//!
//! Most SPIR-V decorations have small enumerant values, so bits `0..64`
//! live in a single `u64` word. Vendor and extension enumerants
//! (`UserSemantic = 5635`, `RestrictPointer = 5355`, ...) are far outside
//! that range and go into a sorted sparse set instead.

use std::collections::BTreeSet;

/// A value that names one bit in a [`Bitset`].
///
/// Implemented for the `spirv` enums that are stored as flag sets, so
/// callers pass `Decoration::Block` rather than casting by hand.
pub trait FlagBit: Copy {
    /// The bit index this value occupies.
    fn bit(self) -> u32;
}

impl FlagBit for u32 {
    #[inline]
    fn bit(self) -> u32 {
        self
    }
}

impl FlagBit for spirv::Decoration {
    #[inline]
    fn bit(self) -> u32 {
        self as u32
    }
}

impl FlagBit for spirv::ExecutionMode {
    #[inline]
    fn bit(self) -> u32 {
        self as u32
    }
}

impl FlagBit for spirv::Capability {
    #[inline]
    fn bit(self) -> u32 {
        self as u32
    }
}

/// Set of flag bits with O(1) membership for the common low range.
///
/// Equality compares flag membership only: a bit below 64 is always kept
/// in `lower`, so two sets with the same members have the same layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Bitset {
    lower: u64,
    higher: BTreeSet<u32>,
}

/// Shared empty set, returned by reference for ids with no record.
pub(crate) static EMPTY_BITSET: Bitset = Bitset::new();

impl Bitset {
    /// Create an empty set.
    pub const fn new() -> Self {
        Bitset {
            lower: 0,
            higher: BTreeSet::new(),
        }
    }

    /// Create a set holding only the low 64 bits in `lower`.
    pub const fn from_lower(lower: u64) -> Self {
        Bitset {
            lower,
            higher: BTreeSet::new(),
        }
    }

    /// Test a single bit.
    #[inline]
    pub fn get(&self, flag: impl FlagBit) -> bool {
        let bit = flag.bit();
        if bit < 64 {
            self.lower & (1u64 << bit) != 0
        } else {
            self.higher.contains(&bit)
        }
    }

    /// Set a single bit.
    pub fn set(&mut self, flag: impl FlagBit) {
        let bit = flag.bit();
        if bit < 64 {
            self.lower |= 1u64 << bit;
        } else {
            self.higher.insert(bit);
        }
    }

    /// Clear a single bit.
    pub fn clear(&mut self, flag: impl FlagBit) {
        let bit = flag.bit();
        if bit < 64 {
            self.lower &= !(1u64 << bit);
        } else {
            self.higher.remove(&bit);
        }
    }

    /// Remove every bit.
    pub fn reset(&mut self) {
        self.lower = 0;
        self.higher.clear();
    }

    /// Union: add every bit set in `other`.
    pub fn merge_or(&mut self, other: &Bitset) {
        self.lower |= other.lower;
        self.higher.extend(other.higher.iter().copied());
    }

    /// Intersection: keep only bits also set in `other`.
    pub fn merge_and(&mut self, other: &Bitset) {
        self.lower &= other.lower;
        self.higher.retain(|bit| other.higher.contains(bit));
    }

    /// The low 64 bits as a raw word.
    #[inline]
    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower == 0 && self.higher.is_empty()
    }

    /// Number of bits set.
    pub fn len(&self) -> usize {
        self.lower.count_ones() as usize + self.higher.len()
    }

    /// Iterate set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        let lower = self.lower;
        (0..64u32)
            .filter(move |bit| lower & (1u64 << bit) != 0)
            .chain(self.higher.iter().copied())
    }

    /// Call `f` for each set bit in ascending order.
    pub fn for_each_bit(&self, mut f: impl FnMut(u32)) {
        for bit in self.iter() {
            f(bit);
        }
    }
}

impl<F: FlagBit> FromIterator<F> for Bitset {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut set = Bitset::new();
        for flag in iter {
            set.set(flag);
        }
        set
    }
}
