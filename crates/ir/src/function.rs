use smallvec::SmallVec;

use crate::{module::ModuleCtx, DataFlowGraph, Layout, Linkage, Type, ValueId};

pub struct Function {
    pub sig: Signature,
    pub arg_values: SmallVec<[ValueId; 8]>,
    pub dfg: DataFlowGraph,
    pub layout: Layout,

    /// Debug scope of the function, if the front end provided one.
    pub subprogram: Option<Subprogram>,
}

impl Function {
    pub fn new(ctx: &ModuleCtx, sig: Signature) -> Self {
        let mut dfg = DataFlowGraph::new(ctx.clone());
        let arg_values = sig
            .args()
            .iter()
            .enumerate()
            .map(|(idx, arg_ty)| {
                let value = dfg.make_arg_value(*arg_ty, idx);
                dfg.make_value(value)
            })
            .collect();

        Self {
            sig,
            arg_values,
            dfg,
            layout: Layout::default(),
            subprogram: None,
        }
    }

    pub fn ctx(&self) -> &ModuleCtx {
        &self.dfg.ctx
    }
}

/// Debug scope metadata for a function, mirroring what a front end would
/// attach from source-level debug info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subprogram {
    pub file: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Name of the function.
    name: String,

    /// Linkage of the function.
    linkage: Linkage,

    args: SmallVec<[Type; 8]>,
    ret_ty: Type,

    /// `true` for compiler intrinsics; those never have an IR body and are
    /// understood natively by consumers.
    intrinsic: bool,
}

impl Signature {
    pub fn new(name: &str, linkage: Linkage, args: &[Type], ret_ty: Type) -> Self {
        Self {
            name: name.to_string(),
            linkage,
            args: args.into(),
            ret_ty,
            intrinsic: false,
        }
    }

    pub fn new_intrinsic(name: &str, args: &[Type], ret_ty: Type) -> Self {
        Self {
            name: name.to_string(),
            linkage: Linkage::External,
            args: args.into(),
            ret_ty,
            intrinsic: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    pub fn args(&self) -> &[Type] {
        &self.args
    }

    pub fn ret_ty(&self) -> Type {
        self.ret_ty
    }

    pub fn is_intrinsic(&self) -> bool {
        self.intrinsic
    }
}
