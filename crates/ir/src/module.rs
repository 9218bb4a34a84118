use std::sync::{Arc, RwLock};

use cranelift_entity::{entity_impl, PrimaryMap};

use crate::{
    global_variable::GlobalVariableStore, isa::TargetIsa, types::TypeStore, Function, Signature,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FuncRef(u32);
entity_impl!(FuncRef);

pub struct Module {
    /// Module-wide context: target description and the shared type and
    /// global-variable stores.
    pub ctx: ModuleCtx,

    /// Holds all functions declared in the module, defined or not.
    pub funcs: PrimaryMap<FuncRef, Function>,
}

impl Module {
    pub fn new(ctx: ModuleCtx) -> Self {
        Self {
            ctx,
            funcs: PrimaryMap::default(),
        }
    }

    /// Returns every `FuncRef` in the module, in declaration order.
    pub fn iter_functions(&self) -> impl Iterator<Item = FuncRef> {
        self.funcs.keys()
    }

    /// Returns `true` if the function has external linkage, i.e. it carries
    /// no definition in this module.
    pub fn is_external(&self, func_ref: FuncRef) -> bool {
        !self.funcs[func_ref].sig.linkage().has_definition()
    }

    pub fn func_by_symbol(&self, name: &str) -> Option<FuncRef> {
        self.funcs
            .iter()
            .find(|(_, func)| func.sig.name() == name)
            .map(|(func_ref, _)| func_ref)
    }

    /// Get-or-insert a function declaration by name. If a function with the
    /// signature's name already exists its `FuncRef` is returned unchanged.
    pub fn declare_function(&mut self, sig: Signature) -> FuncRef {
        if let Some(func_ref) = self.func_by_symbol(sig.name()) {
            return func_ref;
        }

        let func = Function::new(&self.ctx, sig);
        self.funcs.push(func)
    }
}

/// Module-level context shared by every function in a module. Cheap to clone.
#[derive(Clone)]
pub struct ModuleCtx {
    pub isa: TargetIsa,
    ty_store: Arc<RwLock<TypeStore>>,
    gv_store: Arc<RwLock<GlobalVariableStore>>,
}

impl ModuleCtx {
    pub fn new(isa: TargetIsa) -> Self {
        Self {
            isa,
            ty_store: Arc::new(RwLock::new(TypeStore::default())),
            gv_store: Arc::new(RwLock::new(GlobalVariableStore::default())),
        }
    }

    pub fn with_ty_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TypeStore) -> R,
    {
        f(&self.ty_store.read().unwrap())
    }

    pub fn with_ty_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TypeStore) -> R,
    {
        f(&mut self.ty_store.write().unwrap())
    }

    pub fn with_gv_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&GlobalVariableStore) -> R,
    {
        f(&self.gv_store.read().unwrap())
    }

    pub fn with_gv_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut GlobalVariableStore) -> R,
    {
        f(&mut self.gv_store.write().unwrap())
    }

    /// Allocation size of `ty` on the module's target, `None` if unsized.
    pub fn size_of(&self, ty: crate::Type) -> Option<usize> {
        self.with_ty_store(|s| self.isa.size_of(ty, s))
    }
}
