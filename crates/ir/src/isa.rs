//! Target description: pointer width and type layout queries.
use crate::{
    triple::TargetTriple,
    types::{CompoundType, Type, TypeStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetIsa {
    triple: TargetTriple,
}

impl TargetIsa {
    pub fn new(triple: TargetTriple) -> Self {
        Self { triple }
    }

    pub fn triple(&self) -> TargetTriple {
        self.triple
    }

    /// Pointer width of the target in bits.
    pub fn pointer_width(&self) -> usize {
        self.triple.pointer_width()
    }

    pub fn pointer_bytes(&self) -> usize {
        self.pointer_width() / 8
    }

    /// Allocation size of `ty` in bytes, including alignment padding.
    /// Returns `None` for unsized types (`unit`, function types, and
    /// compounds containing them).
    pub fn size_of(&self, ty: Type, store: &TypeStore) -> Option<usize> {
        match ty {
            Type::I1 | Type::I8 => Some(1),
            Type::I16 => Some(2),
            Type::I32 => Some(4),
            Type::I64 => Some(8),
            Type::Unit => None,
            Type::Compound(cmpd_ref) => match store.resolve_compound(cmpd_ref) {
                CompoundType::Ptr(..) => Some(self.pointer_bytes()),
                CompoundType::Array { elem, len } => {
                    let elem_size = self.size_of(*elem, store)?;
                    Some(elem_size * len)
                }
                CompoundType::Struct(def) => {
                    let mut size = 0;
                    let mut align = 1;
                    for &field in &def.fields {
                        let field_size = self.size_of(field, store)?;
                        let field_align = if def.packed {
                            1
                        } else {
                            self.align_of(field, store)?
                        };
                        size = round_up(size, field_align) + field_size;
                        align = align.max(field_align);
                    }
                    Some(round_up(size, align))
                }
                CompoundType::Func { .. } => None,
            },
        }
    }

    /// Alignment of `ty` in bytes. `None` for unsized types.
    pub fn align_of(&self, ty: Type, store: &TypeStore) -> Option<usize> {
        match ty {
            Type::I1 | Type::I8 | Type::I16 | Type::I32 | Type::I64 => self.size_of(ty, store),
            Type::Unit => None,
            Type::Compound(cmpd_ref) => match store.resolve_compound(cmpd_ref) {
                CompoundType::Ptr(..) => Some(self.pointer_bytes()),
                CompoundType::Array { elem, .. } => self.align_of(*elem, store),
                CompoundType::Struct(def) => {
                    if def.packed {
                        return Some(1);
                    }
                    let mut align = 1;
                    for &field in &def.fields {
                        align = align.max(self.align_of(field, store)?);
                    }
                    Some(align)
                }
                CompoundType::Func { .. } => None,
            },
        }
    }
}

fn round_up(size: usize, align: usize) -> usize {
    debug_assert!(align > 0);
    size.div_ceil(align) * align
}
