//! Errors raised by the IR container.
//!
//! Two classes exist. Contract violations (bad ids, kind mismatches,
//! malformed structural records) indicate a bug in the decoder or a pass;
//! the unchecked accessors panic with the message below, the checked ones
//! (`try_get`, `verify`) return it. Benign absence (no name, no decoration)
//! is never an error and has no variant here.

use thiserror::Error;

use crate::{Id, VariantKind};

/// Failure reported by the checked APIs of [`ParsedIr`](crate::ParsedIr).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("id {id} is out of bounds (bound is {bound})")]
    IdOutOfBounds { id: Id, bound: u32 },

    #[error("id {id} holds {found}, but was accessed as {expected}")]
    KindMismatch {
        id: Id,
        expected: VariantKind,
        found: VariantKind,
    },

    #[error("id {id} holds {found} and cannot be reassigned as {requested}")]
    KindReassigned {
        id: Id,
        found: VariantKind,
        requested: VariantKind,
    },

    #[error("type {id} of a buffer block variable is not a struct")]
    NotBufferBlock { id: Id },

    #[error("continue block {block} is mapped to a loop header but is not a registered continue block")]
    ContinueWithoutBlock { block: Id },

    #[error("continue block {block} maps to {header}, which is not a registered loop header")]
    HeaderNotLoop { block: Id, header: Id },

    #[error("block {block} is registered in more than one merge category")]
    MergeCategoryOverlap { block: Id },

    #[error("variant store has {ids} slots but meta store has {meta}")]
    StoreLengthMismatch { ids: usize, meta: usize },

    #[error("default entry point {id} is not a registered entry point")]
    UnregisteredDefaultEntryPoint { id: Id },

    #[error("module is {words} words long; a SPIR-V header needs 5")]
    TruncatedHeader { words: usize },

    #[error("bad magic number {found:#010x}")]
    BadMagic { found: u32 },
}

impl IrError {
    /// Returns `true` for errors that describe the input word stream rather
    /// than the state of the container.
    pub fn is_header_error(&self) -> bool {
        matches!(self, IrError::TruncatedHeader { .. } | IrError::BadMagic { .. })
    }
}

#[cfg(test)]
mod tests;
