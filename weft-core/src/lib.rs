#![forbid(unsafe_code)]

mod checker;
mod convert;
mod error;
mod legacy;
mod model;
mod resolver;

pub use checker::{CheckQueue, Checker};
pub use convert::{assume_unshared, convert_implicit, widen, QualifiedRef};
pub use error::{ModelError, QualifierError, Violation, ViolationKind};
pub use legacy::EffectiveDecl;
pub use model::{DeclModel, TypeDef};
pub use resolver::{next_context, reachable, ContextState};
