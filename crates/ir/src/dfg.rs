//! This module contains the symprep IR data flow graph.
use std::collections::BTreeSet;

use cranelift_entity::{entity_impl, packed_option::PackedOption, PrimaryMap, SecondaryMap};
use rustc_hash::FxHashMap;

use crate::{
    insn::{Insn, InsnData},
    module::ModuleCtx,
    GlobalVariableRef, Immediate, Type, Value, ValueId,
};

/// An opaque reference to [`BlockData`].
#[derive(Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct Block(pub u32);
entity_impl!(Block, "block");

/// A block data definition.
/// A block data doesn't hold any layout information. It is managed by
/// [`crate::Layout`].
#[derive(Debug, Clone, Default)]
pub struct BlockData {}

/// A source location attached to an instruction, carried for downstream
/// tooling. Best-effort; most instructions carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SrcLoc {
    pub line: u32,
    pub col: u32,
}

pub struct DataFlowGraph {
    pub ctx: ModuleCtx,
    #[doc(hidden)]
    pub blocks: PrimaryMap<Block, BlockData>,
    #[doc(hidden)]
    pub values: PrimaryMap<ValueId, Value>,
    insns: PrimaryMap<Insn, InsnData>,
    insn_results: SecondaryMap<Insn, PackedOption<ValueId>>,
    #[doc(hidden)]
    pub immediates: FxHashMap<Immediate, ValueId>,
    zeros: FxHashMap<Type, ValueId>,
    users: SecondaryMap<ValueId, BTreeSet<Insn>>,
    src_locs: FxHashMap<Insn, SrcLoc>,
}

impl DataFlowGraph {
    pub fn new(ctx: ModuleCtx) -> Self {
        Self {
            ctx,
            blocks: PrimaryMap::default(),
            values: PrimaryMap::default(),
            insns: PrimaryMap::default(),
            insn_results: SecondaryMap::default(),
            immediates: FxHashMap::default(),
            zeros: FxHashMap::default(),
            users: SecondaryMap::default(),
            src_locs: FxHashMap::default(),
        }
    }

    pub fn make_block(&mut self) -> Block {
        self.blocks.push(BlockData::default())
    }

    pub fn make_value(&mut self, value: Value) -> ValueId {
        self.values.push(value)
    }

    pub fn make_insn(&mut self, data: InsnData) -> Insn {
        let insn = self.insns.push(data);
        self.attach_user(insn);
        insn
    }

    pub fn make_imm_value<Imm>(&mut self, imm: Imm) -> ValueId
    where
        Imm: Into<Immediate>,
    {
        let imm: Immediate = imm.into();
        if let Some(&value) = self.immediates.get(&imm) {
            return value;
        }

        let ty = imm.ty();
        let value_data = Value::Immediate { imm, ty };
        let value = self.make_value(value_data);
        self.immediates.insert(imm, value);
        value
    }

    /// Returns the canonical zero value of `ty`. Integral zeros are interned
    /// immediates; other types get an interned `Value::Zero`.
    pub fn make_zero_value(&mut self, ty: Type) -> ValueId {
        if let Some(zero) = Immediate::zero(ty) {
            return self.make_imm_value(zero);
        }

        if let Some(&value) = self.zeros.get(&ty) {
            return value;
        }

        let value = self.make_value(Value::Zero { ty });
        self.zeros.insert(ty, value);
        value
    }

    /// Returns a pointer value to the global variable.
    pub fn make_global_value(&mut self, gv: GlobalVariableRef) -> ValueId {
        let gv_ty = self.ctx.with_gv_store(|s| s.ty(gv));
        let ty = self.ctx.with_ty_store_mut(|s| s.make_ptr(gv_ty));
        self.make_value(Value::Global { gv, ty })
    }

    pub fn make_arg_value(&mut self, ty: Type, idx: usize) -> Value {
        Value::Arg { ty, idx }
    }

    pub fn attach_result(&mut self, insn: Insn, value: ValueId) {
        debug_assert!(self.insn_results[insn].is_none());
        self.insn_results[insn] = value.into();
    }

    pub fn insn_data(&self, insn: Insn) -> &InsnData {
        &self.insns[insn]
    }

    pub fn insn_data_mut(&mut self, insn: Insn) -> &mut InsnData {
        &mut self.insns[insn]
    }

    pub fn value(&self, value: ValueId) -> &Value {
        &self.values[value]
    }

    pub fn value_ty(&self, value: ValueId) -> Type {
        match &self.values[value] {
            Value::Inst { ty, .. }
            | Value::Arg { ty, .. }
            | Value::Immediate { ty, .. }
            | Value::Global { ty, .. }
            | Value::Zero { ty } => *ty,
        }
    }

    /// Returns the defining instruction if the value is an instruction result.
    pub fn value_insn(&self, value: ValueId) -> Option<Insn> {
        match self.values[value] {
            Value::Inst { inst, .. } => Some(inst),
            _ => None,
        }
    }

    pub fn insn_result(&self, insn: Insn) -> Option<ValueId> {
        self.insn_results[insn].expand()
    }

    pub fn is_terminator(&self, insn: Insn) -> bool {
        self.insns[insn].is_terminator()
    }

    pub fn attach_user(&mut self, insn: Insn) {
        let data = &self.insns[insn];
        let users = &mut self.users;
        data.visit_values(&mut |value| {
            users[value].insert(insn);
        })
    }

    /// Removes `insn` from the user sets of all its operands.
    /// Must be called before an instruction is dropped from the layout.
    pub fn untrack_insn(&mut self, insn: Insn) {
        let data = &self.insns[insn];
        let users = &mut self.users;
        data.visit_values(&mut |value| {
            users[value].remove(&insn);
        })
    }

    /// Returns all instructions that use `value`.
    pub fn users(&self, value: ValueId) -> impl Iterator<Item = &Insn> {
        self.users[value].iter()
    }

    /// Returns the number of instructions that use `value`.
    pub fn users_num(&self, value: ValueId) -> usize {
        self.users[value].len()
    }

    /// Redirects every use of `value` to `alias`.
    pub fn change_to_alias(&mut self, value: ValueId, alias: ValueId) {
        let mut users = std::mem::take(&mut self.users[value]);
        for insn in &users {
            self.insns[*insn].visit_values_mut(&mut |user_value| {
                if *user_value == value {
                    *user_value = alias;
                }
            });
        }
        self.users[alias].append(&mut users);
    }

    pub fn set_src_loc(&mut self, insn: Insn, loc: SrcLoc) {
        self.src_locs.insert(insn, loc);
    }

    pub fn src_loc(&self, insn: Insn) -> Option<SrcLoc> {
        self.src_locs.get(&insn).copied()
    }
}
