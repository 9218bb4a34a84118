pub mod builder;
pub mod dfg;
pub mod func_cursor;
pub mod function;
pub mod global_variable;
pub mod insn;
pub mod ir_writer;
pub mod isa;
pub mod layout;
pub mod linkage;
pub mod module;
pub mod triple;
pub mod types;
pub mod value;

pub use dfg::{Block, DataFlowGraph, SrcLoc};
pub use function::{Function, Signature, Subprogram};
pub use global_variable::{GlobalVariableData, GlobalVariableRef, GvInitializer};
pub use insn::{BinaryOp, CastOp, Insn, InsnData};
pub use isa::TargetIsa;
pub use layout::Layout;
pub use linkage::Linkage;
pub use module::{FuncRef, Module, ModuleCtx};
pub use triple::TargetTriple;
pub use types::Type;
pub use value::{Immediate, Value, ValueId};
