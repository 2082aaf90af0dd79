#![forbid(unsafe_code)]

use std::collections::HashMap;

use weft_decl::{Declaration, TypeId};

use crate::error::ModelError;
use crate::legacy::EffectiveDecl;

/// One struct/class-like type: an ordered member table, names unique,
/// fields and methods in a single namespace.
#[derive(Debug)]
pub struct TypeDef {
    pub name: String,
    pub legacy: bool,
    members: Vec<Declaration>,
    by_name: HashMap<String, usize>,
    finalized: bool,
}

impl TypeDef {
    fn new(name: &str, legacy: bool) -> Self {
        TypeDef {
            name: name.to_string(),
            legacy,
            members: Vec::new(),
            by_name: HashMap::new(),
            finalized: false,
        }
    }

    pub fn member(&self, name: &str) -> Option<&Declaration> {
        self.by_name.get(name).map(|&i| &self.members[i])
    }

    pub fn members(&self) -> &[Declaration] {
        &self.members
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

/// The read model consumed by the checker: every type's member table,
/// built once by the front end and immutable for the duration of a
/// checking pass. Checking a type before it is finalized is a protocol
/// error; the batch driver defers such chains instead of guessing.
#[derive(Debug, Default)]
pub struct DeclModel {
    types: Vec<TypeDef>,
}

impl DeclModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, name: &str) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDef::new(name, false));
        id
    }

    /// Register a type lacking qualifier annotations. Every member it
    /// contains is treated as effectively threadsafe by the resolver; the
    /// stored declarations are not touched.
    pub fn add_legacy_type(&mut self, name: &str) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDef::new(name, true));
        id
    }

    pub fn add_member(&mut self, ty: TypeId, decl: Declaration) -> Result<(), ModelError> {
        let def = self
            .types
            .get_mut(ty.0 as usize)
            .ok_or(ModelError::UnknownType { id: ty.0 })?;
        if def.finalized {
            return Err(ModelError::TypeFinalized {
                ty: def.name.clone(),
            });
        }
        if def.by_name.contains_key(&decl.name.node) {
            return Err(ModelError::DuplicateMember {
                ty: def.name.clone(),
                member: decl.name.node.clone(),
            });
        }
        def.by_name.insert(decl.name.node.clone(), def.members.len());
        def.members.push(decl);
        Ok(())
    }

    /// Mark a type's member table complete. Idempotent.
    pub fn finalize_type(&mut self, ty: TypeId) -> Result<(), ModelError> {
        let def = self
            .types
            .get_mut(ty.0 as usize)
            .ok_or(ModelError::UnknownType { id: ty.0 })?;
        def.finalized = true;
        Ok(())
    }

    pub fn lookup_member(&self, ty: TypeId, name: &str) -> Option<&Declaration> {
        self.types.get(ty.0 as usize).and_then(|def| def.member(name))
    }

    /// Look up a member together with the legacy-ness of its owner, as the
    /// resolver consumes it.
    pub fn effective(&self, ty: TypeId, name: &str) -> Option<EffectiveDecl<'_>> {
        let def = self.types.get(ty.0 as usize)?;
        def.member(name)
            .map(|decl| EffectiveDecl::new(decl, def.legacy))
    }

    pub fn is_legacy(&self, ty: TypeId) -> bool {
        self.types.get(ty.0 as usize).is_some_and(|def| def.legacy)
    }

    pub fn is_finalized(&self, ty: TypeId) -> bool {
        self.types
            .get(ty.0 as usize)
            .is_some_and(|def| def.finalized)
    }

    pub fn type_name(&self, ty: TypeId) -> Option<&str> {
        self.types.get(ty.0 as usize).map(|def| def.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_decl::{span, Declaration, Ident, Qualifiers, Spanned};

    fn ident(name: &str) -> Ident {
        Spanned::new(span(0, name.len()), name.to_string())
    }

    #[test]
    fn duplicate_member_is_rejected() {
        let mut model = DeclModel::new();
        let x = model.add_type("X");
        model
            .add_member(x, Declaration::field(ident("f"), Qualifiers::NONE, None))
            .unwrap();
        let err = model
            .add_member(x, Declaration::field(ident("f"), Qualifiers::SHARED, None))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateMember {
                ty: "X".to_string(),
                member: "f".to_string(),
            }
        );
    }

    #[test]
    fn member_insertion_after_finalize_is_rejected() {
        let mut model = DeclModel::new();
        let x = model.add_type("X");
        model.finalize_type(x).unwrap();
        let err = model
            .add_member(x, Declaration::field(ident("f"), Qualifiers::NONE, None))
            .unwrap_err();
        assert!(matches!(err, ModelError::TypeFinalized { .. }));
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut model = DeclModel::new();
        let x = model.add_type("X");
        model.finalize_type(x).unwrap();
        model.finalize_type(x).unwrap();
        assert!(model.is_finalized(x));
    }

    #[test]
    fn legacy_flag_is_a_view_not_an_edit() {
        let mut model = DeclModel::new();
        let q = model.add_legacy_type("OldQueue");
        model
            .add_member(q, Declaration::method(ident("pop"), Qualifiers::NONE, None))
            .unwrap();

        // The stored declaration keeps its written qualifiers.
        let stored = model.lookup_member(q, "pop").unwrap();
        assert_eq!(stored.qualifiers, Qualifiers::NONE);

        // The effective view reports it threadsafe.
        let eff = model.effective(q, "pop").unwrap();
        assert!(eff.threadsafe());
        assert!(!eff.shared());
    }

    #[test]
    fn unknown_type_id_is_a_typed_error() {
        let mut model = DeclModel::new();
        let err = model
            .add_member(
                TypeId(7),
                Declaration::field(ident("f"), Qualifiers::NONE, None),
            )
            .unwrap_err();
        assert_eq!(err, ModelError::UnknownType { id: 7 });
        assert!(model.lookup_member(TypeId(7), "f").is_none());
        assert!(!model.is_legacy(TypeId(7)));
    }
}
