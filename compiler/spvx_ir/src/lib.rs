//! spvx IR - parsed SPIR-V module container
//!
//! This crate holds the result of decoding a SPIR-V module, for the
//! control-flow reconstruction and emission passes to read:
//! - [`Id`]s addressing one dense namespace of module-level entities
//! - A Variant Store of typed payloads ([`Variant`], [`Entity`])
//! - A Meta Store of names and decorations ([`Meta`], [`DecorationRecord`], [`Bitset`])
//! - The structural control-flow registry ([`ControlFlowRegistry`])
//! - Entry points and the source dialect ([`EntryPoint`], [`Source`])
//!
//! # Design Philosophy
//!
//! - **Arena + index**: entities refer to each other by `Id`, never by
//!   reference, so growing the stores never changes what an id means.
//! - **Tag-checked casts**: consumers know each id's kind from the
//!   instruction that defined it; a mismatch is a bug and panics.
//! - **Derived views stay derived**: `get_buffer_block_flags` is computed
//!   from the type's record on every call, never cached on the variable.
//!
//! The crate does not decode instructions and does not emit code.

mod bitset;
pub mod control_flow;
pub mod entity;
mod entry_point;
mod error;
mod header;
mod id;
mod meta;
mod parsed_ir;
mod variant;

pub use bitset::{Bitset, FlagBit};
pub use control_flow::{BlockRoles, ControlFlowRegistry};
pub use entity::{
    BaseType, MergeKind, Parameter, SpvBlock, SpvConstant, SpvConstantOp, SpvExtInstImport,
    SpvFunction, SpvFunctionPrototype, SpvString, SpvType, SpvUndef, SpvVariable, Terminator,
};
pub use entry_point::{EntryPoint, Source, WorkgroupSize};
pub use error::IrError;
pub use header::{ModuleHeader, HEADER_WORDS};
pub use id::Id;
pub use meta::{DecorationRecord, MemberMeta, Meta};
pub use parsed_ir::ParsedIr;
pub use variant::{Entity, Variant, VariantKind};
