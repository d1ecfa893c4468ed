//! Entity payloads stored in the Variant Store.
//!
//! Each struct holds what the decoder records for one kind of result id.
//! Cross references are [`Id`]s, never borrows, so the store can grow
//! without invalidating anything but direct references into it.

use smallvec::SmallVec;
use spirv::{Op, StorageClass};

use crate::Id;

// ── Types ───────────────────────────────────────────────────────────

/// Scalar or aggregate category of a [`SpvType`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseType {
    #[default]
    Unknown,
    Void,
    Boolean,
    Int,
    UInt,
    Int64,
    UInt64,
    Half,
    Float,
    Double,
    Struct,
    Image,
    SampledImage,
    Sampler,
    AccelerationStructure,
}

/// A type declared by an `OpType*` instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvType {
    pub base: BaseType,
    /// Scalar bit width.
    pub width: u32,
    pub vecsize: u32,
    pub columns: u32,
    /// Array dimensions, innermost last. A zero entry is a runtime array.
    pub array: Vec<u32>,
    /// Parallel to `array`: `false` means the size is a constant id.
    pub array_size_literal: Vec<bool>,
    pub pointer: bool,
    pub storage: StorageClass,
    /// Pointee for pointers, element type for arrays.
    pub parent_type: Id,
    pub member_types: Vec<Id>,
}

impl SpvType {
    /// A non-aggregate, non-pointer type of the given category.
    pub fn scalar(base: BaseType, width: u32) -> Self {
        SpvType {
            base,
            width,
            vecsize: 1,
            columns: 1,
            ..SpvType::default()
        }
    }

    /// A struct with the given member types.
    pub fn structure(member_types: Vec<Id>) -> Self {
        SpvType {
            base: BaseType::Struct,
            member_types,
            ..SpvType::default()
        }
    }

    /// A pointer to `pointee` in `storage`.
    ///
    /// The pointer keeps the pointee's category so consumers can test
    /// `base` without dereferencing.
    pub fn pointer_to(pointee: Id, base: BaseType, storage: StorageClass) -> Self {
        SpvType {
            base,
            pointer: true,
            storage,
            parent_type: pointee,
            ..SpvType::default()
        }
    }

    /// Returns `true` if this is an array type (sized or runtime).
    #[inline]
    pub fn is_array(&self) -> bool {
        !self.array.is_empty()
    }

    /// Returns `true` if the outermost array dimension is unsized.
    pub fn is_runtime_array(&self) -> bool {
        matches!(self.array.last(), Some(0)) && self.array_size_literal.last() == Some(&true)
    }
}

impl Default for SpvType {
    fn default() -> Self {
        SpvType {
            base: BaseType::Unknown,
            width: 0,
            vecsize: 1,
            columns: 1,
            array: Vec::new(),
            array_size_literal: Vec::new(),
            pointer: false,
            storage: StorageClass::Generic,
            parent_type: Id::NONE,
            member_types: Vec::new(),
        }
    }
}

// ── Values ──────────────────────────────────────────────────────────

/// A variable declared by `OpVariable`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvVariable {
    /// The variable's pointer type.
    pub basetype: Id,
    pub storage: StorageClass,
    pub initializer: Id,
    /// For variables synthesized from another one (e.g. by legalization).
    pub basevariable: Id,
}

impl SpvVariable {
    pub fn new(basetype: Id, storage: StorageClass) -> Self {
        SpvVariable {
            basetype,
            storage,
            initializer: Id::NONE,
            basevariable: Id::NONE,
        }
    }
}

/// A constant declared by `OpConstant*` or `OpSpecConstant*`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvConstant {
    pub constant_type: Id,
    /// Literal words for scalar constants (two for 64-bit values).
    pub scalars: SmallVec<[u32; 2]>,
    /// Constituents of composite constants.
    pub subconstants: Vec<Id>,
    pub specialization: bool,
    /// Set when some array type takes its length from this constant.
    pub is_used_as_array_length: bool,
}

impl SpvConstant {
    /// A 32-bit scalar constant.
    pub fn scalar(constant_type: Id, value: u32) -> Self {
        SpvConstant {
            constant_type,
            scalars: SmallVec::from_slice(&[value]),
            ..SpvConstant::default()
        }
    }

    /// The first literal word, or 0 for composites.
    pub fn scalar_u32(&self) -> u32 {
        self.scalars.first().copied().unwrap_or(0)
    }
}

/// A specialization constant operation (`OpSpecConstantOp`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvConstantOp {
    pub basetype: Id,
    pub opcode: Op,
    pub arguments: Vec<Id>,
}

/// An `OpUndef` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvUndef {
    pub basetype: Id,
}

/// A debug string from `OpString`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvString {
    pub text: String,
}

/// An extended instruction set from `OpExtInstImport`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvExtInstImport {
    pub name: String,
}

// ── Functions ───────────────────────────────────────────────────────

/// A function parameter (`OpFunctionParameter`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub id: Id,
    pub ty: Id,
}

/// A function body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvFunction {
    pub return_type: Id,
    /// The `OpTypeFunction` this function was declared with.
    pub function_type: Id,
    pub arguments: Vec<Parameter>,
    /// Blocks in declaration order; the first is the entry block.
    pub blocks: Vec<Id>,
    pub entry_block: Id,
}

impl SpvFunction {
    pub fn new(return_type: Id, function_type: Id) -> Self {
        SpvFunction {
            return_type,
            function_type,
            ..SpvFunction::default()
        }
    }

    /// Append a block; the first block added becomes the entry block.
    pub fn add_block(&mut self, block: Id) {
        if self.entry_block.is_none() {
            self.entry_block = block;
        }
        self.blocks.push(block);
    }
}

/// A function signature (`OpTypeFunction`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvFunctionPrototype {
    pub return_type: Id,
    pub parameter_types: SmallVec<[Id; 4]>,
}

// ── Blocks ──────────────────────────────────────────────────────────

/// Structured merge instruction attached to a block header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeKind {
    #[default]
    None,
    /// `OpLoopMerge`.
    Loop,
    /// `OpSelectionMerge`, either two-way or switch.
    Selection,
}

/// How a block exits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminator {
    #[default]
    Unknown,
    /// `OpBranch`.
    Direct { next: Id },
    /// `OpBranchConditional`.
    Select {
        condition: Id,
        true_block: Id,
        false_block: Id,
    },
    /// `OpSwitch`: `(literal, target)` pairs plus the default target.
    MultiSelect {
        selector: Id,
        default: Id,
        cases: SmallVec<[(u32, Id); 4]>,
    },
    /// `OpReturn` (`value` is `Id::NONE`) or `OpReturnValue`.
    Return { value: Id },
    Unreachable,
    Kill,
}

impl Terminator {
    /// Blocks this terminator can transfer control to, in operand order.
    pub fn successors(&self) -> SmallVec<[Id; 4]> {
        match self {
            Terminator::Direct { next } => SmallVec::from_slice(&[*next]),
            Terminator::Select {
                true_block,
                false_block,
                ..
            } => SmallVec::from_slice(&[*true_block, *false_block]),
            Terminator::MultiSelect { default, cases, .. } => {
                let mut out = SmallVec::new();
                out.push(*default);
                out.extend(cases.iter().map(|&(_, target)| target));
                out
            }
            Terminator::Unknown
            | Terminator::Return { .. }
            | Terminator::Unreachable
            | Terminator::Kill => SmallVec::new(),
        }
    }
}

/// A basic block (`OpLabel` through its terminator).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SpvBlock {
    pub terminator: Terminator,
    pub merge: MergeKind,
    pub merge_block: Id,
    /// Only meaningful when `merge` is [`MergeKind::Loop`].
    pub continue_block: Id,
}

#[cfg(test)]
mod tests;
