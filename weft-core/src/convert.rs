#![forbid(unsafe_code)]

use weft_decl::{Span, TypeId};

use crate::error::{Violation, ViolationKind};
use crate::model::DeclModel;

/// A reference to a value of some type, tagged with whether it currently
/// carries the `shared` obligation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QualifiedRef {
    pub ty: TypeId,
    pub shared: bool,
}

impl QualifiedRef {
    pub fn shared(ty: TypeId) -> Self {
        QualifiedRef { ty, shared: true }
    }

    pub fn non_shared(ty: TypeId) -> Self {
        QualifiedRef { ty, shared: false }
    }
}

/// Implicit widening: treating a non-shared reference as possibly
/// concurrently accessed is always safe. Identity on an already-shared
/// reference.
pub fn widen(reference: QualifiedRef) -> QualifiedRef {
    QualifiedRef {
        shared: true,
        ..reference
    }
}

/// Check an implicit conversion between two references to the same type.
/// Widening is permitted; narrowing is rejected unconditionally, since
/// accepting it would silently drop the shared obligation.
pub fn convert_implicit(
    model: &DeclModel,
    from: QualifiedRef,
    to_shared: bool,
    span: Span,
) -> Result<QualifiedRef, Violation> {
    if from.shared && !to_shared {
        return Err(Violation {
            step: 0,
            member: model
                .type_name(from.ty)
                .unwrap_or("<unknown type>")
                .to_string(),
            kind: ViolationKind::IllegalNarrowingConversion,
            span,
        });
    }
    Ok(QualifiedRef {
        shared: to_shared,
        ..from
    })
}

/// The single sanctioned narrowing conversion: strips the `shared`
/// qualifier from a reference.
///
/// The caller asserts that no concurrent access exists at this point.
/// That guarantee is a trust boundary, not a checked one; keeping this
/// the only narrowing entry point makes every use grep-able in review.
pub fn assume_unshared(reference: QualifiedRef) -> QualifiedRef {
    QualifiedRef {
        shared: false,
        ..reference
    }
}
