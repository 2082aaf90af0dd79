#![forbid(unsafe_code)]

use weft_decl::Declaration;

/// Computed view of a declaration as seen through its owning type.
///
/// A `legacy` type makes its whole public surface effectively threadsafe
/// without per-member annotation; this wrapper layers that rule over the
/// stored declaration without mutating or copying it.
#[derive(Clone, Copy, Debug)]
pub struct EffectiveDecl<'a> {
    decl: &'a Declaration,
    owner_legacy: bool,
}

impl<'a> EffectiveDecl<'a> {
    pub fn new(decl: &'a Declaration, owner_legacy: bool) -> Self {
        EffectiveDecl { decl, owner_legacy }
    }

    /// The underlying declaration, qualifiers as written.
    pub fn declared(&self) -> &'a Declaration {
        self.decl
    }

    pub fn shared(&self) -> bool {
        self.decl.qualifiers.shared
    }

    pub fn threadsafe(&self) -> bool {
        self.decl.qualifiers.threadsafe || self.owner_legacy
    }
}
