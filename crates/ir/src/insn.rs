//! This module contains symprep IR instruction definitions.
use smallvec::SmallVec;

use crate::{dfg::Block, module::FuncRef, Type, ValueId};

/// An opaque reference to [`InsnData`].
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct Insn(pub u32);
cranelift_entity::entity_impl!(Insn);

/// An instruction data definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InsnData {
    /// Binary instructions.
    Binary { code: BinaryOp, args: [ValueId; 2] },

    /// Cast operations.
    Cast {
        code: CastOp,
        args: [ValueId; 1],
        ty: Type,
    },

    /// Load a value from memory.
    Load { args: [ValueId; 1] },

    /// Store a value to memory.
    Store { args: [ValueId; 2] },

    /// Call a function resolved to a concrete symbol.
    Call {
        func: FuncRef,
        args: SmallVec<[ValueId; 8]>,
        ret_ty: Type,
    },

    /// Call through a function pointer. The callee is an arbitrary value and
    /// is never resolved to a symbol.
    CallIndirect {
        callee: ValueId,
        args: SmallVec<[ValueId; 8]>,
        ret_ty: Type,
    },

    /// Inline assembly fragment.
    InlineAsm {
        asm: String,
        args: SmallVec<[ValueId; 4]>,
    },

    /// Unconditional jump instruction.
    Jump { dest: Block },

    /// Conditional jump instruction.
    Br { cond: ValueId, dests: [Block; 2] },

    /// Return.
    Return { arg: Option<ValueId> },

    /// Phi function.
    Phi {
        values: SmallVec<[ValueId; 8]>,
        blocks: SmallVec<[Block; 8]>,
        ty: Type,
    },

    /// Allocate stack memory for the given type.
    Alloca { ty: Type },
}

impl InsnData {
    pub fn binary(code: BinaryOp, lhs: ValueId, rhs: ValueId) -> Self {
        Self::Binary {
            code,
            args: [lhs, rhs],
        }
    }

    pub fn cast(code: CastOp, arg: ValueId, ty: Type) -> Self {
        Self::Cast {
            code,
            args: [arg],
            ty,
        }
    }

    pub fn load(addr: ValueId) -> Self {
        Self::Load { args: [addr] }
    }

    pub fn store(addr: ValueId, data: ValueId) -> Self {
        Self::Store { args: [addr, data] }
    }

    pub fn call(func: FuncRef, args: SmallVec<[ValueId; 8]>, ret_ty: Type) -> Self {
        Self::Call { func, args, ret_ty }
    }

    pub fn jump(dest: Block) -> Self {
        Self::Jump { dest }
    }

    pub fn ret(arg: Option<ValueId>) -> Self {
        Self::Return { arg }
    }

    pub fn alloca(ty: Type) -> Self {
        Self::Alloca { ty }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, Self::Jump { .. } | Self::Br { .. } | Self::Return { .. })
    }

    /// Visits all value operands of the instruction.
    pub fn visit_values(&self, f: &mut impl FnMut(ValueId)) {
        match self {
            Self::Binary { args, .. } => args.iter().copied().for_each(f),
            Self::Cast { args, .. } | Self::Load { args } => args.iter().copied().for_each(f),
            Self::Store { args } => args.iter().copied().for_each(f),
            Self::Call { args, .. } => args.iter().copied().for_each(f),
            Self::CallIndirect { callee, args, .. } => {
                f(*callee);
                args.iter().copied().for_each(f);
            }
            Self::InlineAsm { args, .. } => args.iter().copied().for_each(f),
            Self::Jump { .. } | Self::Alloca { .. } => {}
            Self::Br { cond, .. } => f(*cond),
            Self::Return { arg } => {
                if let Some(arg) = arg {
                    f(*arg)
                }
            }
            Self::Phi { values, .. } => values.iter().copied().for_each(f),
        }
    }

    /// Visits all value operands of the instruction mutably.
    pub fn visit_values_mut(&mut self, f: &mut impl FnMut(&mut ValueId)) {
        match self {
            Self::Binary { args, .. } => args.iter_mut().for_each(f),
            Self::Cast { args, .. } | Self::Load { args } => args.iter_mut().for_each(f),
            Self::Store { args } => args.iter_mut().for_each(f),
            Self::Call { args, .. } => args.iter_mut().for_each(f),
            Self::CallIndirect { callee, args, .. } => {
                f(callee);
                args.iter_mut().for_each(f);
            }
            Self::InlineAsm { args, .. } => args.iter_mut().for_each(f),
            Self::Jump { .. } | Self::Alloca { .. } => {}
            Self::Br { cond, .. } => f(cond),
            Self::Return { arg } => {
                if let Some(arg) = arg {
                    f(arg)
                }
            }
            Self::Phi { values, .. } => values.iter_mut().for_each(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastOp {
    Sext,
    Zext,
    Trunc,
    BitCast,
}

impl CastOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sext => "sext",
            Self::Zext => "zext",
            Self::Trunc => "trunc",
            Self::BitCast => "bitcast",
        }
    }
}
