//! Names and decorations attached to ids and aggregate members.
//!
//! Every id has exactly one [`Meta`] record, default-valued until the
//! decoder writes to it. Struct members carry their own name and
//! [`DecorationRecord`] in `Meta::members`, indexed by member number.

use rustc_hash::FxHashMap;
use spirv::Decoration as Dec;

use crate::bitset::Bitset;

/// Decoration flags plus their operands.
///
/// A decoration is present iff its flag is set. Integer operands
/// (`Location`, `Binding`, `Offset`, ...) and string operands
/// (`UserSemantic`) are kept per decoration; a later write replaces the
/// earlier operand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DecorationRecord {
    pub flags: Bitset,
    int_args: FxHashMap<Dec, u32>,
    string_args: FxHashMap<Dec, String>,
}

impl DecorationRecord {
    /// Set `decoration` with an integer operand.
    pub fn set(&mut self, decoration: Dec, argument: u32) {
        self.flags.set(decoration);
        self.int_args.insert(decoration, argument);
    }

    /// Set `decoration` with a string operand.
    pub fn set_string(&mut self, decoration: Dec, argument: impl Into<String>) {
        self.flags.set(decoration);
        self.string_args.insert(decoration, argument.into());
    }

    /// Remove `decoration` and any operand recorded for it.
    pub fn unset(&mut self, decoration: Dec) {
        self.flags.clear(decoration);
        self.int_args.remove(&decoration);
        self.string_args.remove(&decoration);
    }

    #[inline]
    pub fn has(&self, decoration: Dec) -> bool {
        self.flags.get(decoration)
    }

    /// The integer operand of `decoration`, or 0 if it has none.
    pub fn argument(&self, decoration: Dec) -> u32 {
        self.int_args.get(&decoration).copied().unwrap_or(0)
    }

    /// The string operand of `decoration`, or `""` if it has none.
    pub fn string(&self, decoration: Dec) -> &str {
        self.string_args.get(&decoration).map_or("", String::as_str)
    }
}

/// Name and decorations of one struct member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberMeta {
    pub name: String,
    pub decoration: DecorationRecord,
}

/// Everything the decoder recorded about one id besides its payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Meta {
    pub name: String,
    pub decoration: DecorationRecord,
    pub members: Vec<MemberMeta>,
}

impl Meta {
    /// The member record at `index`, growing `members` to `index + 1`.
    ///
    /// Growth appends defaults; existing entries are never moved.
    pub fn member_mut(&mut self, index: u32) -> &mut MemberMeta {
        let index = index as usize;
        if self.members.len() <= index {
            self.members.resize_with(index + 1, MemberMeta::default);
        }
        &mut self.members[index]
    }

    /// The member record at `index`, if one was ever addressed.
    #[inline]
    pub fn member(&self, index: u32) -> Option<&MemberMeta> {
        self.members.get(index as usize)
    }
}

#[cfg(test)]
mod tests;
