//! Entry point metadata and source dialect.
//!
//! Entry points live in their own table keyed by [`Id`] rather than in the
//! Variant Store: the same id is a `Function` there and an entry point
//! here, two independent facts about one id.

use spirv::{ExecutionMode, ExecutionModel, SourceLanguage};

use crate::bitset::Bitset;
use crate::Id;

/// Compute workgroup dimensions.
///
/// `LocalSize` fills the literal dimensions; `LocalSizeId` fills the
/// constant ids instead, leaving the literals untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkgroupSize {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub id_x: Id,
    pub id_y: Id,
    pub id_z: Id,
}

impl WorkgroupSize {
    /// Returns `true` if the dimensions are given by constant ids.
    #[inline]
    pub fn is_specialized(&self) -> bool {
        self.id_x.is_some() || self.id_y.is_some() || self.id_z.is_some()
    }
}

/// One `OpEntryPoint` and the execution modes declared for it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryPoint {
    /// The function this entry point invokes.
    pub id: Id,
    /// Name used in the output; may be rewritten to avoid keyword clashes.
    pub name: String,
    /// Name as declared in the module.
    pub orig_name: String,
    pub model: ExecutionModel,
    /// `Input`/`Output` variables listed on the `OpEntryPoint`.
    pub interface_variables: Vec<Id>,
    /// Execution modes, one bit per [`ExecutionMode`].
    pub flags: Bitset,
    pub workgroup_size: WorkgroupSize,
    pub invocations: u32,
    pub output_vertices: u32,
}

impl EntryPoint {
    pub fn new(id: Id, name: impl Into<String>, model: ExecutionModel) -> Self {
        let name = name.into();
        EntryPoint {
            id,
            orig_name: name.clone(),
            name,
            model,
            interface_variables: Vec::new(),
            flags: Bitset::new(),
            workgroup_size: WorkgroupSize::default(),
            invocations: 0,
            output_vertices: 0,
        }
    }

    /// Record an `OpExecutionMode` and capture the operands we model.
    pub fn set_execution_mode(&mut self, mode: ExecutionMode, args: &[u32]) {
        self.flags.set(mode);
        match mode {
            ExecutionMode::LocalSize => {
                if let &[x, y, z, ..] = args {
                    self.workgroup_size.x = x;
                    self.workgroup_size.y = y;
                    self.workgroup_size.z = z;
                }
            }
            ExecutionMode::LocalSizeId => {
                if let &[x, y, z, ..] = args {
                    self.workgroup_size.id_x = Id::new(x);
                    self.workgroup_size.id_y = Id::new(y);
                    self.workgroup_size.id_z = Id::new(z);
                }
            }
            ExecutionMode::Invocations => {
                self.invocations = args.first().copied().unwrap_or(0);
            }
            ExecutionMode::OutputVertices => {
                self.output_vertices = args.first().copied().unwrap_or(0);
            }
            _ => {}
        }
    }

    #[inline]
    pub fn has_execution_mode(&self, mode: ExecutionMode) -> bool {
        self.flags.get(mode)
    }
}

/// Source dialect the module was compiled from.
///
/// Written once by the decoder from `OpSource`; downstream passes use it
/// to pick compatible output syntax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    pub version: u32,
    pub es: bool,
    pub known: bool,
    pub hlsl: bool,
}

impl Source {
    /// Classify an `OpSource` language and version.
    ///
    /// HLSL input is treated as GLSL 450 for cross-compilation purposes.
    pub fn from_language(language: SourceLanguage, version: u32) -> Self {
        match language {
            SourceLanguage::ESSL => Source {
                version,
                es: true,
                known: true,
                hlsl: false,
            },
            SourceLanguage::GLSL => Source {
                version,
                es: false,
                known: true,
                hlsl: false,
            },
            SourceLanguage::HLSL => Source {
                version: 450,
                es: false,
                known: true,
                hlsl: true,
            },
            _ => Source::default(),
        }
    }
}

#[cfg(test)]
mod tests;
