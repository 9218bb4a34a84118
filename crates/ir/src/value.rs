//! This module contains symprep IR value definition.
use core::fmt;

use cranelift_entity::entity_impl;

use crate::{insn::Insn, GlobalVariableRef, Type};

/// An opaque reference to [`Value`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Copy, Hash)]
pub struct ValueId(pub u32);
entity_impl!(ValueId, "v");

/// A value data definition.
#[derive(Debug, Clone)]
pub enum Value {
    /// The value is defined by an instruction.
    Inst { inst: Insn, ty: Type },

    /// The value is a function argument.
    Arg { ty: Type, idx: usize },

    /// The value is an immediate value.
    Immediate { imm: Immediate, ty: Type },

    /// The value is the address of a global variable.
    Global { gv: GlobalVariableRef, ty: Type },

    /// The canonical zero of a sized, non-integral type.
    /// Integral zeros are represented as interned [`Immediate`]s instead.
    Zero { ty: Type },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Immediate {
    I1(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
}

impl Immediate {
    pub fn ty(&self) -> Type {
        match self {
            Self::I1(..) => Type::I1,
            Self::I8(..) => Type::I8,
            Self::I16(..) => Type::I16,
            Self::I32(..) => Type::I32,
            Self::I64(..) => Type::I64,
        }
    }

    /// The zero immediate of an integral type.
    pub fn zero(ty: Type) -> Option<Self> {
        match ty {
            Type::I1 => Some(Self::I1(false)),
            Type::I8 => Some(Self::I8(0)),
            Type::I16 => Some(Self::I16(0)),
            Type::I32 => Some(Self::I32(0)),
            Type::I64 => Some(Self::I64(0)),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::I1(v) => !v,
            Self::I8(v) => *v == 0,
            Self::I16(v) => *v == 0,
            Self::I32(v) => *v == 0,
            Self::I64(v) => *v == 0,
        }
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::I1(v) => write!(f, "{}", *v as u8),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Immediate {
    fn from(v: bool) -> Self {
        Self::I1(v)
    }
}

impl From<i8> for Immediate {
    fn from(v: i8) -> Self {
        Self::I8(v)
    }
}

impl From<i16> for Immediate {
    fn from(v: i16) -> Self {
        Self::I16(v)
    }
}

impl From<i32> for Immediate {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Immediate {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}
