//! Undefined-call elimination.
//!
//! Deletes calls to functions that carry no body in the module, except for
//! an allow-list of runtime symbols that downstream consumers understand
//! natively. Call results are substituted either with the type's canonical
//! zero or with a read of a shared per-type nondeterministic global that is
//! seeded once at program entry by a call to an external make-symbolic hook.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::smallvec;
use symprep_ir::{
    CastOp, FuncRef, GlobalVariableData, GlobalVariableRef, GvInitializer, Immediate, Insn,
    InsnData, Linkage, Module, Signature, SrcLoc, Type, Value,
};

use crate::allow_list;

/// Symbol tag for the per-type nondeterministic globals.
const NONDET_GLOBAL_TAG: &str = "nondet_gl_undef";

/// Symbol tag for the name-string companion globals.
const NONDET_NAME_TAG: &str = "nondet_str";

/// External hook that marks a storage region as unconstrained.
const MAKE_SYMBOLIC: &str = "__VERIFIER_make_symbolic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstPolicy {
    /// Substitute call results with the canonical zero of the result type.
    Zero,
    /// Substitute call results with a read of a shared per-type global whose
    /// value is made symbolic at program entry.
    #[default]
    Symbolic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteUndefinedConfig {
    pub policy: SubstPolicy,
    /// Symbol of the function that receives the one-time initialization
    /// calls under the symbolic policy.
    pub entry_symbol: String,
}

impl Default for DeleteUndefinedConfig {
    fn default() -> Self {
        Self {
            policy: SubstPolicy::default(),
            entry_symbol: "main".to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteUndefinedStats {
    pub removed_calls: usize,
    pub distinct_callees: usize,
    pub globals_created: usize,
}

impl DeleteUndefinedStats {
    pub fn is_changed(&self) -> bool {
        self.removed_calls > 0
    }
}

pub fn run_delete_undefined(
    module: &mut Module,
    config: &DeleteUndefinedConfig,
) -> DeleteUndefinedStats {
    let mut pass = DeleteUndefined::new(config);
    let funcs: Vec<_> = module.iter_functions().collect();
    for func_ref in funcs {
        pass.scan_function(module, func_ref);
    }

    pass.stats.distinct_callees = pass.reported.len();
    pass.stats
}

/// Run-scoped state. A fresh instance is created per module transformation,
/// so the caches never leak across unrelated modules.
struct DeleteUndefined<'a> {
    config: &'a DeleteUndefinedConfig,
    /// Type of the result of a rewritten call, mapped to the shared global
    /// substituting it. At most one global exists per type per run.
    nondet_globals: FxHashMap<Type, GlobalVariableRef>,
    /// The make-symbolic hook, declared on first demand.
    make_symbolic: Option<FuncRef>,
    /// Callees already diagnosed, so each one is reported only once.
    reported: FxHashSet<FuncRef>,
    stats: DeleteUndefinedStats,
}

impl<'a> DeleteUndefined<'a> {
    fn new(config: &'a DeleteUndefinedConfig) -> Self {
        Self {
            config,
            nondet_globals: FxHashMap::default(),
            make_symbolic: None,
            reported: FxHashSet::default(),
            stats: DeleteUndefinedStats::default(),
        }
    }

    fn scan_function(&mut self, module: &mut Module, func_ref: FuncRef) -> bool {
        if module.is_external(func_ref) {
            return false;
        }

        // Collect eligible call sites first; rewriting mutates the layout and
        // may also touch the entry function, so the walk must not hold a
        // borrow while that happens. Instruction ids stay valid across
        // rewrites of other sites.
        let mut targets = Vec::new();
        let func = &module.funcs[func_ref];
        for block in func.layout.iter_block() {
            for insn in func.layout.iter_insn(block) {
                if let InsnData::Call { func: callee, ret_ty, .. } = func.dfg.insn_data(insn) {
                    if self.is_eligible(module, *callee) {
                        targets.push((insn, *callee, *ret_ty));
                    }
                }
            }
        }

        let changed = !targets.is_empty();
        for (insn, callee, ret_ty) in targets {
            self.rewrite(module, func_ref, insn, callee, ret_ty);
        }

        changed
    }

    /// Classifies a named call site. Indirect calls and inline assembly are
    /// distinct instructions and never reach this point.
    fn is_eligible(&self, module: &Module, callee: FuncRef) -> bool {
        let sig = &module.funcs[callee].sig;
        if sig.is_intrinsic() {
            return false;
        }

        if allow_list::is_exempt(sig.name()) {
            return false;
        }

        // Defined callees are kept; only bodyless externs are rewritten.
        module.is_external(callee)
    }

    fn rewrite(
        &mut self,
        module: &mut Module,
        func_ref: FuncRef,
        insn: Insn,
        callee: FuncRef,
        ret_ty: Type,
    ) {
        self.report(module, callee, ret_ty);

        if !ret_ty.is_unit() {
            // Both policies materialize a typed substitute, so the result
            // type must be sized regardless of which one is active.
            let Some(size) = module.ctx.size_of(ret_ty) else {
                panic!("cannot substitute a call result of unsized type {ret_ty:?}");
            };

            let subst = match self.config.policy {
                SubstPolicy::Zero => {
                    let func = &mut module.funcs[func_ref];
                    func.dfg.make_zero_value(ret_ty)
                }
                SubstPolicy::Symbolic => {
                    let gv = self.nondet_global(module, ret_ty, size);

                    let func = &mut module.funcs[func_ref];
                    let gv_value = func.dfg.make_global_value(gv);
                    let load = func.dfg.make_insn(InsnData::load(gv_value));
                    let load_result = func.dfg.make_value(Value::Inst {
                        inst: load,
                        ty: ret_ty,
                    });
                    func.dfg.attach_result(load, load_result);
                    func.layout.insert_insn_before(load, insn);
                    load_result
                }
            };

            let func = &mut module.funcs[func_ref];
            if let Some(result) = func.dfg.insn_result(insn) {
                func.dfg.change_to_alias(result, subst);
            }
        }

        let func = &mut module.funcs[func_ref];
        func.dfg.untrack_insn(insn);
        func.layout.remove_insn(insn);
        self.stats.removed_calls += 1;
    }

    fn report(&mut self, module: &Module, callee: FuncRef, ret_ty: Type) {
        if !self.reported.insert(callee) {
            return;
        }

        let name = module.funcs[callee].sig.name();
        let detail = if ret_ty.is_unit() {
            ""
        } else {
            match self.config.policy {
                SubstPolicy::Zero => ", retval set to 0",
                SubstPolicy::Symbolic => ", retval made symbolic",
            }
        };
        tracing::warn!("removed calls to '{name}' (function is undefined{detail})");
    }

    /// Returns the shared nondeterministic global for `ty`, creating it and
    /// its one-time initialization on first demand.
    fn nondet_global(&mut self, module: &mut Module, ty: Type, size: usize) -> GlobalVariableRef {
        if let Some(&gv) = self.nondet_globals.get(&ty) {
            return gv;
        }

        let gv = module.ctx.with_gv_store_mut(|s| {
            s.make_gv_unique(GlobalVariableData::new(
                NONDET_GLOBAL_TAG.to_string(),
                ty,
                Linkage::Private,
                false,
                Some(GvInitializer::Zeroed),
            ))
        });

        self.inject_init(module, gv, size);
        self.nondet_globals.insert(ty, gv);
        self.stats.globals_created += 1;
        gv
    }

    /// Seeds `gv` by calling the make-symbolic hook before the first
    /// instruction of the entry function.
    fn inject_init(&mut self, module: &mut Module, gv: GlobalVariableRef, size: usize) {
        let hook = self.make_symbolic_hook(module);
        let size_ty = size_type(module);
        let i8_ptr = module.ctx.with_ty_store_mut(|s| s.make_ptr(Type::I8));

        let name_ty = module
            .ctx
            .with_ty_store_mut(|s| s.make_array(Type::I8, "nondet".len() + 1));
        let name_gv = module.ctx.with_gv_store_mut(|s| {
            s.make_gv_unique(GlobalVariableData::constant(
                NONDET_NAME_TAG.to_string(),
                name_ty,
                Linkage::Private,
                GvInitializer::make_string("nondet"),
            ))
        });

        let Some(entry) = module.func_by_symbol(&self.config.entry_symbol) else {
            panic!("entry function `{}` not found", self.config.entry_symbol);
        };

        let func = &mut module.funcs[entry];
        let Some(first_insn) = func
            .layout
            .entry_block()
            .and_then(|block| func.layout.first_insn_of(block))
        else {
            panic!("entry function `{}` has no instructions", self.config.entry_symbol);
        };

        let gv_value = func.dfg.make_global_value(gv);
        let addr_cast = func.dfg.make_insn(InsnData::cast(CastOp::BitCast, gv_value, i8_ptr));
        let addr = func.dfg.make_value(Value::Inst {
            inst: addr_cast,
            ty: i8_ptr,
        });
        func.dfg.attach_result(addr_cast, addr);

        let name_value = func.dfg.make_global_value(name_gv);
        let name_cast = func
            .dfg
            .make_insn(InsnData::cast(CastOp::BitCast, name_value, i8_ptr));
        let name = func.dfg.make_value(Value::Inst {
            inst: name_cast,
            ty: i8_ptr,
        });
        func.dfg.attach_result(name_cast, name);

        let size_imm = match size_ty {
            Type::I64 => Immediate::I64(size as i64),
            _ => Immediate::I32(size as i32),
        };
        let size_value = func.dfg.make_imm_value(size_imm);

        let call = func.dfg.make_insn(InsnData::call(
            hook,
            smallvec![addr, size_value, name],
            Type::Unit,
        ));

        func.layout.insert_insn_before(addr_cast, first_insn);
        func.layout.insert_insn_before(name_cast, first_insn);
        func.layout.insert_insn_before(call, first_insn);

        // Tag the injected call with the entry function's debug scope so
        // metadata-requiring consumers don't reject an unlocated call.
        if let Some(subprogram) = &func.subprogram {
            let loc = SrcLoc {
                line: subprogram.line,
                col: 0,
            };
            func.dfg.set_src_loc(call, loc);
        }
    }

    fn make_symbolic_hook(&mut self, module: &mut Module) -> FuncRef {
        if let Some(hook) = self.make_symbolic {
            return hook;
        }

        let size_ty = size_type(module);
        let i8_ptr = module.ctx.with_ty_store_mut(|s| s.make_ptr(Type::I8));
        let hook = module.declare_function(Signature::new(
            MAKE_SYMBOLIC,
            Linkage::External,
            &[i8_ptr, size_ty, i8_ptr],
            Type::Unit,
        ));

        self.make_symbolic = Some(hook);
        hook
    }
}

/// The target's `size_t` analogue, wide enough to hold any allocation size.
fn size_type(module: &Module) -> Type {
    if module.ctx.isa.pointer_width() > 32 {
        Type::I64
    } else {
        Type::I32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symprep_ir::{
        builder::ModuleBuilder, ir_writer::dump_func, ModuleCtx, Subprogram, TargetIsa,
        TargetTriple,
    };

    fn module_builder() -> ModuleBuilder {
        let triple = TargetTriple::parse("x64-unknown-linux").unwrap();
        ModuleBuilder::new(ModuleCtx::new(TargetIsa::new(triple)))
    }

    fn zero_config() -> DeleteUndefinedConfig {
        DeleteUndefinedConfig {
            policy: SubstPolicy::Zero,
            ..Default::default()
        }
    }

    /// `main` calling an undefined `foo() -> i32` whose result feeds an add.
    fn undefined_call_module(mb: &mut ModuleBuilder) -> FuncRef {
        let foo = mb.declare_function(Signature::new("foo", Linkage::External, &[], Type::I32));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let ret = fb.call(foo, &[], Type::I32).unwrap();
        let one = fb.make_imm_value(1i32);
        fb.add(ret, one);
        fb.ret(None);

        main
    }

    #[test]
    fn zero_policy_substitutes_zero() {
        let mut mb = module_builder();
        let main = undefined_call_module(&mut mb);
        let mut module = mb.build();

        let stats = run_delete_undefined(&mut module, &zero_config());
        assert_eq!(stats.removed_calls, 1);
        assert_eq!(stats.distinct_callees, 1);
        assert_eq!(stats.globals_created, 0);

        assert_eq!(
            dump_func(&module, main),
            "func public %main() -> unit {
    block0:
        v2.i32 = add 0.i32 1.i32;
        return;
}
"
        );
    }

    #[test]
    fn symbolic_policy_seeds_entry() {
        let mut mb = module_builder();
        let main = undefined_call_module(&mut mb);
        let mut module = mb.build();

        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert_eq!(stats.removed_calls, 1);
        assert_eq!(stats.globals_created, 1);

        assert_eq!(
            dump_func(&module, main),
            "func public %main() -> unit {
    block0:
        v4.*i8 = bitcast %nondet_gl_undef *i8;
        v6.*i8 = bitcast %nondet_str *i8;
        call %__VERIFIER_make_symbolic v4 4.i64 v6;
        v9.i32 = load %nondet_gl_undef;
        v2.i32 = add v9 1.i32;
        return;
}
"
        );

        // The hook is declared, not defined.
        let hook = module.func_by_symbol(MAKE_SYMBOLIC).unwrap();
        assert!(module.is_external(hook));

        module.ctx.with_gv_store(|s| {
            let gv = s.gv_by_symbol(NONDET_GLOBAL_TAG).unwrap();
            let data = s.gv_data(gv);
            assert_eq!(data.linkage, Linkage::Private);
            assert_eq!(data.ty, Type::I32);
            assert_eq!(s.init_data(gv), Some(&GvInitializer::Zeroed));

            let name_gv = s.gv_by_symbol(NONDET_NAME_TAG).unwrap();
            assert!(s.is_const(name_gv));
        });
    }

    #[test]
    fn allow_listed_call_is_kept() {
        let mut mb = module_builder();
        let i8_ptr = mb.ptr_type(Type::I8);
        let free = mb.declare_function(Signature::new(
            "free",
            Linkage::External,
            &[i8_ptr],
            Type::Unit,
        ));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let ptr = fb.alloca(Type::I8);
        fb.call(free, &[ptr], Type::Unit);
        fb.ret(None);

        let mut module = mb.build();
        let before = dump_func(&module, main);

        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert!(!stats.is_changed());
        assert_eq!(stats.globals_created, 0);
        assert_eq!(dump_func(&module, main), before);
    }

    #[test]
    fn global_is_shared_across_functions() {
        let mut mb = module_builder();
        let bar = mb.declare_function(Signature::new("bar", Linkage::External, &[], Type::I32));
        let f = mb.declare_function(Signature::new("f", Linkage::Private, &[], Type::I32));
        let g = mb.declare_function(Signature::new("g", Linkage::Private, &[], Type::I32));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        for func in [f, g] {
            let mut fb = mb.func_builder(func);
            let entry = fb.append_block();
            fb.switch_to_block(entry);
            let ret = fb.call(bar, &[], Type::I32).unwrap();
            fb.ret(Some(ret));
        }

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        fb.ret(None);

        let mut module = mb.build();
        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert_eq!(stats.removed_calls, 2);
        assert_eq!(stats.distinct_callees, 1);
        assert_eq!(stats.globals_created, 1);

        // Exactly one seeding call in the entry function.
        let main_dump = dump_func(&module, main);
        assert_eq!(main_dump.matches(MAKE_SYMBOLIC).count(), 1);

        // And no uniquified second global.
        module.ctx.with_gv_store(|s| {
            assert!(s.gv_by_symbol(NONDET_GLOBAL_TAG).is_some());
            assert!(s.gv_by_symbol("nondet_gl_undef.1").is_none());
        });

        for func in [f, g] {
            assert_eq!(
                dump_func(&module, func),
                format!(
                    "func private %{}() -> i32 {{
    block0:
        v2.i32 = load %nondet_gl_undef;
        return v2;
}}
",
                    if func == f { "f" } else { "g" }
                )
            );
        }
    }

    #[test]
    fn void_call_is_erased() {
        let mut mb = module_builder();
        let log = mb.declare_function(Signature::new(
            "log_undefined",
            Linkage::External,
            &[],
            Type::Unit,
        ));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        fb.call(log, &[], Type::Unit);
        fb.ret(None);

        let mut module = mb.build();
        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert_eq!(stats.removed_calls, 1);
        assert_eq!(stats.globals_created, 0);

        assert_eq!(
            dump_func(&module, main),
            "func public %main() -> unit {
    block0:
        return;
}
"
        );
    }

    #[test]
    fn rerun_is_a_nop() {
        let mut mb = module_builder();
        let main = undefined_call_module(&mut mb);
        let mut module = mb.build();

        run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        let after_first = dump_func(&module, main);

        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert!(!stats.is_changed());
        assert_eq!(dump_func(&module, main), after_first);
    }

    #[test]
    fn defined_callee_is_kept() {
        let mut mb = module_builder();
        let helper =
            mb.declare_function(Signature::new("helper", Linkage::Private, &[], Type::I32));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(helper);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let zero = fb.make_imm_value(0i32);
        fb.ret(Some(zero));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        fb.call(helper, &[], Type::I32);
        fb.ret(None);

        let mut module = mb.build();
        let before = dump_func(&module, main);

        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert!(!stats.is_changed());
        assert_eq!(dump_func(&module, main), before);
    }

    #[test]
    fn intrinsic_callee_is_kept() {
        let mut mb = module_builder();
        let ctpop = mb.declare_function(Signature::new_intrinsic("ctpop", &[Type::I32], Type::I32));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let arg = fb.make_imm_value(7i32);
        fb.call(ctpop, &[arg], Type::I32);
        fb.ret(None);

        let mut module = mb.build();
        let before = dump_func(&module, main);

        // Bodyless, but recognized through the signature rather than the
        // allow list.
        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert!(!stats.is_changed());
        assert_eq!(stats.globals_created, 0);
        assert_eq!(dump_func(&module, main), before);
    }

    #[test]
    fn indirect_and_asm_sites_are_kept() {
        let mut mb = module_builder();
        let i8_ptr = mb.ptr_type(Type::I8);
        let main = mb.declare_function(Signature::new(
            "main",
            Linkage::Public,
            &[i8_ptr],
            Type::Unit,
        ));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let target = fb.args()[0];
        fb.call_indirect(target, &[], Type::I32);
        fb.inline_asm("nop", &[]);
        fb.ret(None);

        let mut module = mb.build();
        let before = dump_func(&module, main);

        let stats = run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
        assert!(!stats.is_changed());
        assert_eq!(dump_func(&module, main), before);
    }

    #[test]
    fn callee_is_reported_once() {
        let mut mb = module_builder();
        let foo = mb.declare_function(Signature::new("foo", Linkage::External, &[], Type::I32));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let a = fb.call(foo, &[], Type::I32).unwrap();
        let b = fb.call(foo, &[], Type::I32).unwrap();
        fb.add(a, b);
        fb.ret(None);

        let mut module = mb.build();
        let stats = run_delete_undefined(&mut module, &zero_config());
        assert_eq!(stats.removed_calls, 2);
        assert_eq!(stats.distinct_callees, 1);

        assert_eq!(
            dump_func(&module, main),
            "func public %main() -> unit {
    block0:
        v2.i32 = add 0.i32 0.i32;
        return;
}
"
        );
    }

    #[test]
    fn injected_call_carries_entry_src_loc() {
        let mut mb = module_builder();
        let main = undefined_call_module(&mut mb);

        mb.func_builder(main).func.subprogram = Some(Subprogram {
            file: "main.c".to_string(),
            line: 3,
        });

        let mut module = mb.build();
        run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());

        let func = &module.funcs[main];
        let entry = func.layout.entry_block().unwrap();
        let seed_call = func
            .layout
            .iter_insn(entry)
            .find(|insn| matches!(func.dfg.insn_data(*insn), InsnData::Call { .. }))
            .unwrap();
        assert_eq!(func.dfg.src_loc(seed_call), Some(SrcLoc { line: 3, col: 0 }));
    }

    #[test]
    #[should_panic(expected = "unsized type")]
    fn unsized_result_is_fatal() {
        let mut mb = module_builder();
        let fn_ty = mb
            .ctx()
            .with_ty_store_mut(|s| s.make_func(&[], Type::I32));
        let mystery =
            mb.declare_function(Signature::new("mystery", Linkage::External, &[], fn_ty));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        fb.call(mystery, &[], fn_ty);
        fb.ret(None);

        let mut module = mb.build();
        run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
    }

    #[test]
    #[should_panic(expected = "unsized type")]
    fn unsized_result_is_fatal_under_zero_policy() {
        let mut mb = module_builder();
        let fn_ty = mb
            .ctx()
            .with_ty_store_mut(|s| s.make_func(&[], Type::I32));
        let mystery =
            mb.declare_function(Signature::new("mystery", Linkage::External, &[], fn_ty));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(main);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        fb.call(mystery, &[], fn_ty);
        fb.ret(None);

        let mut module = mb.build();
        run_delete_undefined(&mut module, &zero_config());
    }

    #[test]
    #[should_panic(expected = "entry function")]
    fn missing_entry_is_fatal() {
        let mut mb = module_builder();
        let bar = mb.declare_function(Signature::new("bar", Linkage::External, &[], Type::I32));
        let f = mb.declare_function(Signature::new("f", Linkage::Private, &[], Type::I32));

        let mut fb = mb.func_builder(f);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let ret = fb.call(bar, &[], Type::I32).unwrap();
        fb.ret(Some(ret));

        let mut module = mb.build();
        run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
    }

    #[test]
    #[should_panic(expected = "no instructions")]
    fn empty_entry_is_fatal() {
        let mut mb = module_builder();
        let bar = mb.declare_function(Signature::new("bar", Linkage::External, &[], Type::I32));
        let f = mb.declare_function(Signature::new("f", Linkage::Private, &[], Type::I32));
        let main = mb.declare_function(Signature::new("main", Linkage::Public, &[], Type::Unit));

        let mut fb = mb.func_builder(f);
        let entry = fb.append_block();
        fb.switch_to_block(entry);
        let ret = fb.call(bar, &[], Type::I32).unwrap();
        fb.ret(Some(ret));

        // The entry exists but has nowhere to anchor the seeding call.
        mb.func_builder(main).append_block();

        let mut module = mb.build();
        run_delete_undefined(&mut module, &DeleteUndefinedConfig::default());
    }
}
