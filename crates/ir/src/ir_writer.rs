//! Human readable text emission for modules and functions.
use std::fmt;

use crate::{
    dfg::Block,
    global_variable::GlobalVariableStore,
    insn::{Insn, InsnData},
    module::{FuncRef, Module},
    types::{CompoundType, Type, TypeStore},
    value::Value,
    Function, ValueId,
};

/// Renders a single function to the canonical text form.
pub fn dump_func(module: &Module, func_ref: FuncRef) -> String {
    let mut s = String::new();
    module.ctx.with_ty_store(|ty_store| {
        module.ctx.with_gv_store(|gv_store| {
            let writer = FuncWriter {
                module,
                func_ref,
                ty_store,
                gv_store,
            };
            writer.write(&mut s)
        })
    })
    .unwrap();
    s
}

pub struct ModuleWriter<'a> {
    module: &'a Module,
}

impl<'a> ModuleWriter<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self { module }
    }

    pub fn dump(&self) -> String {
        let mut s = String::new();
        self.write(&mut s).unwrap();
        s
    }

    pub fn write(&self, w: &mut impl fmt::Write) -> fmt::Result {
        let module = self.module;
        module.ctx.with_ty_store(|ty_store| {
            module.ctx.with_gv_store(|gv_store| {
                writeln!(w, "target = \"{}\"", module.ctx.isa.triple())?;

                for def in ty_store.all_struct_data() {
                    writeln!(w)?;
                    write!(w, "type %{} = ", def.name)?;
                    if def.packed {
                        write!(w, "<{{")?;
                    } else {
                        write!(w, "{{")?;
                    }
                    for (i, field) in def.fields.iter().enumerate() {
                        if i > 0 {
                            write!(w, ", ")?;
                        }
                        write_type(w, *field, ty_store)?;
                    }
                    if def.packed {
                        writeln!(w, "}}>;")?;
                    } else {
                        writeln!(w, "}};")?;
                    }
                }

                if gv_store.all_gvs().next().is_some() {
                    writeln!(w)?;
                }
                for gv in gv_store.all_gvs() {
                    write_gv(w, gv_store, gv, ty_store)?;
                    writeln!(w)?;
                }

                for func_ref in module.iter_functions() {
                    writeln!(w)?;
                    if module.is_external(func_ref) {
                        write_declaration(w, &module.funcs[func_ref], ty_store)?;
                    } else {
                        let writer = FuncWriter {
                            module,
                            func_ref,
                            ty_store,
                            gv_store,
                        };
                        writer.write(w)?;
                    }
                }

                Ok(())
            })
        })
    }
}

pub struct FuncWriter<'a> {
    module: &'a Module,
    func_ref: FuncRef,
    ty_store: &'a TypeStore,
    gv_store: &'a GlobalVariableStore,
}

impl<'a> FuncWriter<'a> {
    pub fn write(&self, w: &mut impl fmt::Write) -> fmt::Result {
        let func = &self.module.funcs[self.func_ref];
        let sig = &func.sig;

        write!(w, "func {} %{}(", sig.linkage(), sig.name())?;
        for (i, arg) in func.arg_values.iter().enumerate() {
            if i > 0 {
                write!(w, ", ")?;
            }
            write!(w, "{}.", arg)?;
            write_type(w, func.dfg.value_ty(*arg), self.ty_store)?;
        }
        write!(w, ") -> ")?;
        write_type(w, sig.ret_ty(), self.ty_store)?;
        writeln!(w, " {{")?;

        let mut first = true;
        for block in func.layout.iter_block() {
            if !first {
                writeln!(w)?;
            }
            first = false;
            self.write_block(w, func, block)?;
        }

        writeln!(w, "}}")
    }

    fn write_block(&self, w: &mut impl fmt::Write, func: &Function, block: Block) -> fmt::Result {
        writeln!(w, "    {block}:")?;
        for insn in func.layout.iter_insn(block) {
            write!(w, "        ")?;
            self.write_insn(w, func, insn)?;
            writeln!(w)?;
        }
        Ok(())
    }

    fn write_insn(&self, w: &mut impl fmt::Write, func: &Function, insn: Insn) -> fmt::Result {
        if let Some(result) = func.dfg.insn_result(insn) {
            write!(w, "{result}.")?;
            write_type(w, func.dfg.value_ty(result), self.ty_store)?;
            write!(w, " = ")?;
        }

        match func.dfg.insn_data(insn) {
            InsnData::Binary { code, args } => {
                write!(w, "{}", code.as_str())?;
                self.write_args(w, func, args)?;
            }
            InsnData::Cast { code, args, ty } => {
                write!(w, "{}", code.as_str())?;
                self.write_args(w, func, args)?;
                write!(w, " ")?;
                write_type(w, *ty, self.ty_store)?;
            }
            InsnData::Load { args } => {
                write!(w, "load")?;
                self.write_args(w, func, args)?;
            }
            InsnData::Store { args } => {
                write!(w, "store")?;
                self.write_args(w, func, args)?;
            }
            InsnData::Call { func: callee, args, .. } => {
                let callee_name = self.module.funcs[*callee].sig.name();
                write!(w, "call %{callee_name}")?;
                self.write_args(w, func, args)?;
            }
            InsnData::CallIndirect { callee, args, .. } => {
                write!(w, "call_indirect ")?;
                self.write_value(w, func, *callee)?;
                self.write_args(w, func, args)?;
            }
            InsnData::InlineAsm { asm, args } => {
                write!(w, "asm \"{asm}\"")?;
                self.write_args(w, func, args)?;
            }
            InsnData::Jump { dest } => {
                write!(w, "jump {dest}")?;
            }
            InsnData::Br { cond, dests } => {
                write!(w, "br ")?;
                self.write_value(w, func, *cond)?;
                write!(w, " {} {}", dests[0], dests[1])?;
            }
            InsnData::Return { arg } => {
                write!(w, "return")?;
                if let Some(arg) = arg {
                    write!(w, " ")?;
                    self.write_value(w, func, *arg)?;
                }
            }
            InsnData::Phi { values, blocks, .. } => {
                write!(w, "phi")?;
                for (value, block) in values.iter().zip(blocks.iter()) {
                    write!(w, " (")?;
                    self.write_value(w, func, *value)?;
                    write!(w, " {block})")?;
                }
            }
            InsnData::Alloca { ty } => {
                write!(w, "alloca ")?;
                write_type(w, *ty, self.ty_store)?;
            }
        }

        write!(w, ";")
    }

    fn write_args(&self, w: &mut impl fmt::Write, func: &Function, args: &[ValueId]) -> fmt::Result {
        for arg in args {
            write!(w, " ")?;
            self.write_value(w, func, *arg)?;
        }
        Ok(())
    }

    fn write_value(&self, w: &mut impl fmt::Write, func: &Function, value: ValueId) -> fmt::Result {
        match func.dfg.value(value) {
            Value::Inst { .. } | Value::Arg { .. } => write!(w, "{value}"),
            Value::Immediate { imm, ty } => {
                write!(w, "{imm}.")?;
                write_type(w, *ty, self.ty_store)
            }
            Value::Global { gv, .. } => {
                write!(w, "%{}", self.gv_store.gv_data(*gv).symbol)
            }
            Value::Zero { ty } => {
                write!(w, "zero.")?;
                write_type(w, *ty, self.ty_store)
            }
        }
    }
}

fn write_declaration(w: &mut impl fmt::Write, func: &Function, store: &TypeStore) -> fmt::Result {
    let sig = &func.sig;
    write!(w, "declare %{}(", sig.name())?;
    for (i, arg) in sig.args().iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write_type(w, *arg, store)?;
    }
    write!(w, ") -> ")?;
    write_type(w, sig.ret_ty(), store)?;
    writeln!(w, ";")
}

/// Writes the text form of a global variable definition, e.g.
/// `global private const [i32; 3] %arr = [8, 4, 2];`.
pub fn write_gv(
    w: &mut impl fmt::Write,
    gv_store: &GlobalVariableStore,
    gv: crate::GlobalVariableRef,
    ty_store: &TypeStore,
) -> fmt::Result {
    let data = gv_store.gv_data(gv);
    write!(w, "global {} ", data.linkage)?;
    if data.is_const {
        write!(w, "const ")?;
    }
    write_type(w, data.ty, ty_store)?;
    write!(w, " %{}", data.symbol)?;
    if let Some(init) = &data.data {
        write!(w, " = {init}")?;
    }
    write!(w, ";")
}

pub fn write_type(w: &mut impl fmt::Write, ty: Type, store: &TypeStore) -> fmt::Result {
    match ty {
        Type::I1 => write!(w, "i1"),
        Type::I8 => write!(w, "i8"),
        Type::I16 => write!(w, "i16"),
        Type::I32 => write!(w, "i32"),
        Type::I64 => write!(w, "i64"),
        Type::Unit => write!(w, "unit"),
        Type::Compound(cmpd_ref) => match store.resolve_compound(cmpd_ref) {
            CompoundType::Ptr(inner) => {
                write!(w, "*")?;
                write_type(w, *inner, store)
            }
            CompoundType::Array { elem, len } => {
                write!(w, "[")?;
                write_type(w, *elem, store)?;
                write!(w, "; {len}]")
            }
            CompoundType::Struct(def) => write!(w, "%{}", def.name),
            CompoundType::Func { args, ret_ty } => {
                write!(w, "func(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(w, ", ")?;
                    }
                    write_type(w, *arg, store)?;
                }
                write!(w, ") -> ")?;
                write_type(w, *ret_ty, store)
            }
        },
    }
}

/// Displays a type against a store without going through a formatter at the
/// call site.
pub fn type_to_string(ty: Type, store: &TypeStore) -> String {
    let mut s = String::new();
    // Writing into a `String` can't fail.
    let _ = write_type(&mut s, ty, store);
    s
}
