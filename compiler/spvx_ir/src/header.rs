//! The five-word SPIR-V module header.
//!
//! Only the header is read here; instruction decoding belongs to the
//! decoder that populates a [`ParsedIr`](crate::ParsedIr).

use crate::IrError;

/// Number of words in a module header.
pub const HEADER_WORDS: usize = 5;

/// Fields of the module header following the magic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleHeader {
    /// Packed `0x00MMmm00` version word.
    pub version: u32,
    pub generator: u32,
    /// One past the highest id used in the module.
    pub bound: u32,
    pub schema: u32,
}

impl ModuleHeader {
    /// Read the header from the start of a word stream.
    pub fn parse(words: &[u32]) -> Result<ModuleHeader, IrError> {
        let &[magic, version, generator, bound, schema, ..] = words else {
            return Err(IrError::TruncatedHeader { words: words.len() });
        };
        if magic != spirv::MAGIC_NUMBER {
            return Err(IrError::BadMagic { found: magic });
        }
        Ok(ModuleHeader {
            version,
            generator,
            bound,
            schema,
        })
    }

    /// Major and minor SPIR-V version.
    pub fn version_pair(&self) -> (u8, u8) {
        let [_, major, minor, _] = self.version.to_be_bytes();
        (major, minor)
    }
}
