use crate::{
    global_variable::{GlobalVariableData, GlobalVariableRef},
    module::{FuncRef, Module, ModuleCtx},
    types::Type,
    Function, Signature,
};

use super::FunctionBuilder;

pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn new(ctx: ModuleCtx) -> Self {
        Self {
            module: Module::new(ctx),
        }
    }

    pub fn ctx(&self) -> &ModuleCtx {
        &self.module.ctx
    }

    /// Get-or-insert a function declaration by name.
    pub fn declare_function(&mut self, sig: Signature) -> FuncRef {
        self.module.declare_function(sig)
    }

    pub fn make_global(&mut self, gv: GlobalVariableData) -> GlobalVariableRef {
        self.module.ctx.with_gv_store_mut(|s| s.make_gv(gv))
    }

    pub fn declare_struct_type(&mut self, name: &str, fields: &[Type], packed: bool) -> Type {
        self.module
            .ctx
            .with_ty_store_mut(|s| s.make_struct(name, fields, packed))
    }

    pub fn declare_array_type(&mut self, elem: Type, len: usize) -> Type {
        self.module.ctx.with_ty_store_mut(|s| s.make_array(elem, len))
    }

    pub fn ptr_type(&mut self, ty: Type) -> Type {
        self.module.ctx.with_ty_store_mut(|s| s.make_ptr(ty))
    }

    /// Starts building the body of an already declared function.
    pub fn func_builder(&mut self, func_ref: FuncRef) -> FunctionBuilder<'_> {
        let ctx = self.module.ctx.clone();
        let func = &mut self.module.funcs[func_ref];
        FunctionBuilder::new(ctx, func)
    }

    pub fn func(&self, func_ref: FuncRef) -> &Function {
        &self.module.funcs[func_ref]
    }

    pub fn build(self) -> Module {
        self.module
    }
}
