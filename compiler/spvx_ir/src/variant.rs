//! Tagged storage cell of the Variant Store.
//!
//! A module's ids are heterogeneous: one id is a type, the next a
//! constant, the next a function. Consumers always know from the defining
//! instruction which kind to expect, so access is a tag-checked cast
//! through the [`Entity`] trait rather than dynamic dispatch.

use std::fmt;

use crate::entity::{
    SpvBlock, SpvConstant, SpvConstantOp, SpvExtInstImport, SpvFunction, SpvFunctionPrototype,
    SpvString, SpvType, SpvUndef, SpvVariable,
};

/// One slot of the Variant Store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    #[default]
    None,
    Type(SpvType),
    Constant(SpvConstant),
    ConstantOp(SpvConstantOp),
    Variable(SpvVariable),
    Undef(SpvUndef),
    String(SpvString),
    ExtInstImport(SpvExtInstImport),
    Function(SpvFunction),
    FunctionPrototype(SpvFunctionPrototype),
    Block(SpvBlock),
}

/// The tag of a [`Variant`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum VariantKind {
    None,
    Type,
    Constant,
    ConstantOp,
    Variable,
    Undef,
    String,
    ExtInstImport,
    Function,
    FunctionPrototype,
    Block,
}

impl VariantKind {
    /// Lower-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            VariantKind::None => "nothing",
            VariantKind::Type => "type",
            VariantKind::Constant => "constant",
            VariantKind::ConstantOp => "constant op",
            VariantKind::Variable => "variable",
            VariantKind::Undef => "undef",
            VariantKind::String => "string",
            VariantKind::ExtInstImport => "extended instruction set",
            VariantKind::Function => "function",
            VariantKind::FunctionPrototype => "function prototype",
            VariantKind::Block => "block",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Variant {
    /// The tag of this slot.
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::None => VariantKind::None,
            Variant::Type(_) => VariantKind::Type,
            Variant::Constant(_) => VariantKind::Constant,
            Variant::ConstantOp(_) => VariantKind::ConstantOp,
            Variant::Variable(_) => VariantKind::Variable,
            Variant::Undef(_) => VariantKind::Undef,
            Variant::String(_) => VariantKind::String,
            Variant::ExtInstImport(_) => VariantKind::ExtInstImport,
            Variant::Function(_) => VariantKind::Function,
            Variant::FunctionPrototype(_) => VariantKind::FunctionPrototype,
            Variant::Block(_) => VariantKind::Block,
        }
    }

    /// Returns `true` if nothing has been stored in this slot.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Variant::None)
    }

    /// Typed view of the payload, or `None` on a tag mismatch.
    #[inline]
    pub fn get<T: Entity>(&self) -> Option<&T> {
        T::from_variant(self)
    }

    /// Mutable typed view of the payload, or `None` on a tag mismatch.
    #[inline]
    pub fn get_mut<T: Entity>(&mut self) -> Option<&mut T> {
        T::from_variant_mut(self)
    }
}

/// A payload type that can live in a [`Variant`] slot.
pub trait Entity: Sized + 'static {
    /// The tag this payload is stored under.
    const KIND: VariantKind;

    fn from_variant(variant: &Variant) -> Option<&Self>;

    fn from_variant_mut(variant: &mut Variant) -> Option<&mut Self>;

    fn into_variant(self) -> Variant;
}

macro_rules! impl_entity {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Entity for $ty {
                const KIND: VariantKind = VariantKind::$kind;

                #[inline]
                fn from_variant(variant: &Variant) -> Option<&Self> {
                    match variant {
                        Variant::$kind(payload) => Some(payload),
                        _ => None,
                    }
                }

                #[inline]
                fn from_variant_mut(variant: &mut Variant) -> Option<&mut Self> {
                    match variant {
                        Variant::$kind(payload) => Some(payload),
                        _ => None,
                    }
                }

                #[inline]
                fn into_variant(self) -> Variant {
                    Variant::$kind(self)
                }
            }
        )*
    };
}

impl_entity! {
    SpvType => Type,
    SpvConstant => Constant,
    SpvConstantOp => ConstantOp,
    SpvVariable => Variable,
    SpvUndef => Undef,
    SpvString => String,
    SpvExtInstImport => ExtInstImport,
    SpvFunction => Function,
    SpvFunctionPrototype => FunctionPrototype,
    SpvBlock => Block,
}
