use crate::{
    dfg::Block,
    func_cursor::{CursorLocation, FuncCursor, InsnInserter},
    global_variable::GlobalVariableRef,
    insn::{BinaryOp, CastOp, InsnData},
    module::{FuncRef, ModuleCtx},
    types::Type,
    value::Immediate,
    Function, ValueId,
};

pub struct FunctionBuilder<'a> {
    ctx: ModuleCtx,
    pub func: &'a mut Function,
    cursor: InsnInserter,
}

impl<'a> FunctionBuilder<'a> {
    pub fn new(ctx: ModuleCtx, func: &'a mut Function) -> Self {
        Self {
            ctx,
            func,
            cursor: InsnInserter::at_location(CursorLocation::NoWhere),
        }
    }

    pub fn append_block(&mut self) -> Block {
        let block = self.func.dfg.make_block();
        self.func.layout.append_block(block);
        block
    }

    pub fn switch_to_block(&mut self, block: Block) {
        self.cursor.set_location(CursorLocation::BlockBottom(block));
    }

    pub fn args(&self) -> &[ValueId] {
        &self.func.arg_values
    }

    pub fn make_imm_value<Imm>(&mut self, imm: Imm) -> ValueId
    where
        Imm: Into<Immediate>,
    {
        self.func.dfg.make_imm_value(imm.into())
    }

    pub fn make_zero_value(&mut self, ty: Type) -> ValueId {
        self.func.dfg.make_zero_value(ty)
    }

    pub fn make_global_value(&mut self, gv: GlobalVariableRef) -> ValueId {
        self.func.dfg.make_global_value(gv)
    }

    pub fn type_of(&self, value: ValueId) -> Type {
        self.func.dfg.value_ty(value)
    }

    pub fn ptr_type(&mut self, ty: Type) -> Type {
        self.ctx.with_ty_store_mut(|s| s.make_ptr(ty))
    }

    pub fn binary_op(&mut self, code: BinaryOp, lhs: ValueId, rhs: ValueId) -> ValueId {
        let ty = self.type_of(lhs);
        self.insert_insn_with_result(InsnData::Binary {
            code,
            args: [lhs, rhs],
        }, ty)
    }

    pub fn add(&mut self, lhs: ValueId, rhs: ValueId) -> ValueId {
        self.binary_op(BinaryOp::Add, lhs, rhs)
    }

    pub fn sub(&mut self, lhs: ValueId, rhs: ValueId) -> ValueId {
        self.binary_op(BinaryOp::Sub, lhs, rhs)
    }

    pub fn cast(&mut self, code: CastOp, value: ValueId, ty: Type) -> ValueId {
        self.insert_insn_with_result(InsnData::cast(code, value, ty), ty)
    }

    pub fn bitcast(&mut self, value: ValueId, ty: Type) -> ValueId {
        self.cast(CastOp::BitCast, value, ty)
    }

    pub fn load(&mut self, addr: ValueId) -> ValueId {
        let addr_ty = self.type_of(addr);
        let ty = self
            .ctx
            .with_ty_store(|s| s.deref(addr_ty))
            .unwrap_or_else(|| panic!("load address is not a pointer: {addr_ty:?}"));
        self.insert_insn_with_result(InsnData::Load { args: [addr] }, ty)
    }

    pub fn store(&mut self, addr: ValueId, value: ValueId) {
        self.insert_insn_no_result(InsnData::Store { args: [addr, value] });
    }

    pub fn alloca(&mut self, ty: Type) -> ValueId {
        let ptr_ty = self.ptr_type(ty);
        self.insert_insn_with_result(InsnData::Alloca { ty }, ptr_ty)
    }

    /// Emits a call. Returns the result value, or `None` for calls that
    /// return `unit`.
    pub fn call(&mut self, callee: FuncRef, args: &[ValueId], ret_ty: Type) -> Option<ValueId> {
        let data = InsnData::call(callee, args.into(), ret_ty);
        if ret_ty.is_unit() {
            self.insert_insn_no_result(data);
            None
        } else {
            Some(self.insert_insn_with_result(data, ret_ty))
        }
    }

    /// Emits a call through a function pointer.
    pub fn call_indirect(
        &mut self,
        callee: ValueId,
        args: &[ValueId],
        ret_ty: Type,
    ) -> Option<ValueId> {
        let data = InsnData::CallIndirect {
            callee,
            args: args.into(),
            ret_ty,
        };
        if ret_ty.is_unit() {
            self.insert_insn_no_result(data);
            None
        } else {
            Some(self.insert_insn_with_result(data, ret_ty))
        }
    }

    pub fn inline_asm(&mut self, asm: &str, args: &[ValueId]) {
        self.insert_insn_no_result(InsnData::InlineAsm {
            asm: asm.to_string(),
            args: args.into(),
        });
    }

    pub fn jump(&mut self, dest: Block) {
        self.insert_insn_no_result(InsnData::Jump { dest });
    }

    pub fn br(&mut self, cond: ValueId, then_dest: Block, else_dest: Block) {
        self.insert_insn_no_result(InsnData::Br {
            cond,
            dests: [then_dest, else_dest],
        });
    }

    pub fn ret(&mut self, arg: Option<ValueId>) {
        self.insert_insn_no_result(InsnData::Return { arg });
    }

    fn insert_insn_with_result(&mut self, data: InsnData, ty: Type) -> ValueId {
        let insn = self.cursor.insert_insn_data(self.func, data);
        let result = self.cursor.make_result(self.func, insn, ty);
        self.cursor.set_location(CursorLocation::At(insn));
        result
    }

    fn insert_insn_no_result(&mut self, data: InsnData) {
        let insn = self.cursor.insert_insn_data(self.func, data);
        self.cursor.set_location(CursorLocation::At(insn));
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        builder::test_util::test_module_builder, ir_writer::dump_func, CastOp, Linkage, Signature,
        Type,
    };

    #[test]
    fn entry_block() {
        let mut mb = test_module_builder();
        let func_ref = mb.declare_function(Signature::new(
            "test_func",
            Linkage::Private,
            &[],
            Type::Unit,
        ));

        let mut fb = mb.func_builder(func_ref);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let v0 = fb.make_imm_value(1i8);
        let v1 = fb.make_imm_value(2i8);
        let v2 = fb.add(v0, v1);
        fb.sub(v2, v0);
        fb.ret(None);

        let module = mb.build();
        assert_eq!(
            dump_func(&module, func_ref),
            "func private %test_func() -> unit {
    block0:
        v2.i8 = add 1.i8 2.i8;
        v3.i8 = sub v2 1.i8;
        return;
}
"
        );
    }

    #[test]
    fn branches() {
        let mut mb = test_module_builder();
        let func_ref = mb.declare_function(Signature::new(
            "branch",
            Linkage::Public,
            &[Type::I1],
            Type::Unit,
        ));

        let mut fb = mb.func_builder(func_ref);
        let entry = fb.append_block();
        let then_block = fb.append_block();
        let merge_block = fb.append_block();

        let cond = fb.args()[0];
        fb.switch_to_block(entry);
        fb.br(cond, then_block, merge_block);

        fb.switch_to_block(then_block);
        fb.jump(merge_block);

        fb.switch_to_block(merge_block);
        fb.ret(None);

        let module = mb.build();
        assert_eq!(
            dump_func(&module, func_ref),
            "func public %branch(v0.i1) -> unit {
    block0:
        br v0 block1 block2;

    block1:
        jump block2;

    block2:
        return;
}
"
        );
    }

    #[test]
    fn integer_casts() {
        let mut mb = test_module_builder();
        let func_ref = mb.declare_function(Signature::new(
            "widen",
            Linkage::Private,
            &[Type::I32],
            Type::I64,
        ));

        let mut fb = mb.func_builder(func_ref);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let arg = fb.args()[0];
        let wide = fb.cast(CastOp::Sext, arg, Type::I64);
        let narrow = fb.cast(CastOp::Trunc, wide, Type::I32);
        let back = fb.cast(CastOp::Zext, narrow, Type::I64);
        fb.ret(Some(back));

        let module = mb.build();
        assert_eq!(
            dump_func(&module, func_ref),
            "func private %widen(i32) -> i64 {
    block0:
        v1.i64 = sext v0 i64;
        v2.i32 = trunc v1 i32;
        v3.i64 = zext v2 i64;
        return v3;
}
"
        );
    }

    #[test]
    fn memory_ops() {
        let mut mb = test_module_builder();
        let func_ref = mb.declare_function(Signature::new(
            "mem",
            Linkage::Private,
            &[],
            Type::I32,
        ));

        let mut fb = mb.func_builder(func_ref);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let slot = fb.alloca(Type::I32);
        let seven = fb.make_imm_value(7i32);
        fb.store(slot, seven);
        let loaded = fb.load(slot);
        fb.ret(Some(loaded));

        let module = mb.build();
        assert_eq!(
            dump_func(&module, func_ref),
            "func private %mem() -> i32 {
    block0:
        v0.*i32 = alloca i32;
        store v0 7.i32;
        v2.i32 = load v0;
        return v2;
}
"
        );
    }

    #[test]
    fn call_with_result() {
        let mut mb = test_module_builder();
        let callee = mb.declare_function(Signature::new(
            "getchar",
            Linkage::External,
            &[],
            Type::I32,
        ));
        let func_ref = mb.declare_function(Signature::new(
            "caller",
            Linkage::Public,
            &[],
            Type::I32,
        ));

        let mut fb = mb.func_builder(func_ref);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let ret = fb.call(callee, &[], Type::I32).unwrap();
        fb.ret(Some(ret));

        let module = mb.build();
        assert_eq!(
            dump_func(&module, func_ref),
            "func public %caller() -> i32 {
    block0:
        v0.i32 = call %getchar;
        return v0;
}
"
        );
    }
}
