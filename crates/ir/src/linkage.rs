use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Linkage of symbols.
pub enum Linkage {
    /// The symbol is defined in the module, and can be used from the outside of the module.
    Public,

    #[default]
    /// The symbol is defined in the module, and can NOT be used from another module.
    Private,

    /// The symbol is declared in the module but defined outside of it.
    External,
}

impl Linkage {
    /// Returns `true` if the symbol carries a definition in this module.
    pub fn has_definition(self) -> bool {
        !self.is_external()
    }

    pub fn is_external(self) -> bool {
        matches!(self, Self::External)
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
            Self::External => write!(f, "external"),
        }
    }
}
