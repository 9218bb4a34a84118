use std::fmt;

use cranelift_entity::PrimaryMap;
use rustc_hash::FxHashMap;

use crate::{Immediate, Linkage, Type};

#[derive(Debug, Default)]
pub struct GlobalVariableStore {
    gv_data: PrimaryMap<GlobalVariableRef, GlobalVariableData>,
    symbols: FxHashMap<String, GlobalVariableRef>,
}

impl GlobalVariableStore {
    pub fn make_gv(&mut self, gv_data: GlobalVariableData) -> GlobalVariableRef {
        match self.symbols.entry(gv_data.symbol.to_string()) {
            std::collections::hash_map::Entry::Occupied(_) => {
                panic!("duplicate global symbol `{}`", gv_data.symbol);
            }
            std::collections::hash_map::Entry::Vacant(v) => {
                let gv = self.gv_data.push(gv_data);
                v.insert(gv);
                gv
            }
        }
    }

    /// Like [`Self::make_gv`], but uniquifies the symbol with a numeric
    /// suffix if it is already taken.
    pub fn make_gv_unique(&mut self, mut gv_data: GlobalVariableData) -> GlobalVariableRef {
        if self.symbols.contains_key(&gv_data.symbol) {
            let base = gv_data.symbol.clone();
            let mut n = 1;
            while self.symbols.contains_key(&gv_data.symbol) {
                gv_data.symbol = format!("{base}.{n}");
                n += 1;
            }
        }

        self.make_gv(gv_data)
    }

    pub fn gv_data(&self, gv: GlobalVariableRef) -> &GlobalVariableData {
        &self.gv_data[gv]
    }

    pub fn gv_by_symbol(&self, symbol: &str) -> Option<GlobalVariableRef> {
        self.symbols.get(symbol).copied()
    }

    pub fn init_data(&self, gv: GlobalVariableRef) -> Option<&GvInitializer> {
        self.gv_data[gv].data.as_ref()
    }

    pub fn is_const(&self, gv: GlobalVariableRef) -> bool {
        self.gv_data[gv].is_const
    }

    pub fn ty(&self, gv: GlobalVariableRef) -> Type {
        self.gv_data[gv].ty
    }

    pub fn all_gvs(&self) -> impl Iterator<Item = GlobalVariableRef> {
        self.gv_data.keys()
    }
}

/// An opaque reference to [`GlobalVariableData`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Copy, Hash)]
pub struct GlobalVariableRef(pub u32);
cranelift_entity::entity_impl!(GlobalVariableRef);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalVariableData {
    pub symbol: String,
    pub ty: Type,
    pub linkage: Linkage,
    pub is_const: bool,
    pub data: Option<GvInitializer>,
}

impl GlobalVariableData {
    pub fn new(
        symbol: String,
        ty: Type,
        linkage: Linkage,
        is_const: bool,
        data: Option<GvInitializer>,
    ) -> Self {
        Self {
            symbol,
            ty,
            linkage,
            is_const,
            data,
        }
    }

    pub fn constant(symbol: String, ty: Type, linkage: Linkage, data: GvInitializer) -> Self {
        Self {
            symbol,
            ty,
            linkage,
            is_const: true,
            data: Some(data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GvInitializer {
    /// Every byte of the storage is zero.
    Zeroed,
    Immediate(Immediate),
    Array(Vec<GvInitializer>),
    Bytes(Vec<u8>),
}

impl GvInitializer {
    pub fn make_imm(data: impl Into<Immediate>) -> Self {
        Self::Immediate(data.into())
    }

    pub fn make_array(data: Vec<GvInitializer>) -> Self {
        Self::Array(data)
    }

    pub fn make_string(data: &str) -> Self {
        let mut bytes = data.as_bytes().to_vec();
        bytes.push(0);
        Self::Bytes(bytes)
    }
}

impl fmt::Display for GvInitializer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Zeroed => write!(f, "zeroed"),
            Self::Immediate(data) => write!(f, "{}", data),
            Self::Array(data) => {
                write!(f, "[")?;
                for (i, v) in data.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Self::Bytes(data) => {
                write!(f, "\"")?;
                for b in data {
                    write!(f, "{}", b.escape_ascii())?;
                }
                write!(f, "\"")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_symbols() {
        let mut store = GlobalVariableStore::default();

        let g0 = store.make_gv_unique(GlobalVariableData::new(
            "nondet".into(),
            Type::I32,
            Linkage::Private,
            false,
            Some(GvInitializer::Zeroed),
        ));
        let g1 = store.make_gv_unique(GlobalVariableData::new(
            "nondet".into(),
            Type::I64,
            Linkage::Private,
            false,
            Some(GvInitializer::Zeroed),
        ));

        assert_ne!(g0, g1);
        assert_eq!(store.gv_data(g0).symbol, "nondet");
        assert_eq!(store.gv_data(g1).symbol, "nondet.1");
        assert_eq!(store.gv_by_symbol("nondet.1"), Some(g1));
    }

    #[test]
    fn display_initializer() {
        let init = GvInitializer::make_array(vec![
            GvInitializer::make_imm(8i32),
            GvInitializer::make_imm(4i32),
        ]);
        assert_eq!(init.to_string(), "[8, 4]");

        let init = GvInitializer::make_string("nondet");
        assert_eq!(init.to_string(), "\"nondet\\x00\"");

        assert_eq!(GvInitializer::Zeroed.to_string(), "zeroed");
    }
}
