#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;
use weft_decl::Span;

/// Reason code attached to a rejected access chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// The member at this step lacks the self-synchronization qualifier
    /// required by the current shared context.
    InaccessibleInSharedContext,
    /// An implicit conversion from a shared reference to a non-shared one.
    IllegalNarrowingConversion,
    /// The step names something absent from the type's member table. A
    /// naming defect, not a concurrency one; reported distinctly.
    UnresolvedMember,
}

impl ViolationKind {
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::InaccessibleInSharedContext => "inaccessible-in-shared-context",
            ViolationKind::IllegalNarrowingConversion => "illegal-narrowing-conversion",
            ViolationKind::UnresolvedMember => "unresolved-member",
        }
    }
}

/// Machine-readable rejection record for one access chain.
///
/// `step` is 1-based: step 1 is the first member after the root. Step 0
/// marks violations with no chain position (conversion checks, unresolved
/// method-body roots).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub step: usize,
    pub member: String,
    pub kind: ViolationKind,
    pub span: Span,
}

impl Violation {
    pub fn message(&self) -> String {
        match self.kind {
            ViolationKind::InaccessibleInSharedContext => format!(
                "'{}' is not accessible from a shared context (step {}): member is neither threadsafe nor of a legacy type",
                self.member, self.step
            ),
            ViolationKind::IllegalNarrowingConversion => format!(
                "implicit conversion of shared '{}' to non-shared is not allowed; use assume_unshared to escape explicitly",
                self.member
            ),
            ViolationKind::UnresolvedMember => {
                format!("unresolved member '{}' (step {})", self.member, self.step)
            }
        }
    }
}

/// Diagnostic-facing wrapper around a [`Violation`], labeled with the
/// offending span so a front end can render it against source text.
#[derive(Debug, Error, Diagnostic)]
#[error("qualifier error: {message}")]
#[diagnostic(code(weft::qualifiers))]
pub struct QualifierError {
    pub message: String,
    #[label]
    pub span: Span,
}

impl From<Violation> for QualifierError {
    fn from(violation: Violation) -> Self {
        QualifierError {
            message: violation.message(),
            span: violation.span,
        }
    }
}

/// Misuse of the declaration model during construction. Distinct from
/// chain violations: these indicate a front-end defect, not rejected
/// source under analysis.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
#[diagnostic(code(weft::model))]
pub enum ModelError {
    #[error("duplicate member '{member}' in type '{ty}'")]
    DuplicateMember { ty: String, member: String },
    #[error("type '{ty}' is already finalized; members cannot be added")]
    TypeFinalized { ty: String },
    #[error("unknown type id {id}")]
    UnknownType { id: u32 },
}
