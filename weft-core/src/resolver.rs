#![forbid(unsafe_code)]

use weft_decl::ChainRoot;

use crate::legacy::EffectiveDecl;

/// Shared-ness at one position in an access chain. A property of the
/// access path, not of any type: computed left to right per check, never
/// cached across unrelated accesses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContextState {
    pub shared: bool,
}

impl ContextState {
    pub const NON_SHARED: ContextState = ContextState { shared: false };
    pub const SHARED: ContextState = ContextState { shared: true };

    /// Initial context at a chain root: the root declaration's declared
    /// `shared` flag, or, inside a method body, whether the enclosing
    /// method is threadsafe (a threadsafe method's receiver is shared).
    pub fn at_root(root: &ChainRoot) -> ContextState {
        let shared = match root {
            ChainRoot::Decl(decl) => decl.qualifiers.shared,
            ChainRoot::This {
                method_threadsafe, ..
            } => *method_threadsafe,
        };
        ContextState { shared }
    }
}

/// Whether `member` may be accessed at all from `ctx`: inside a shared
/// context, only self-synchronized members (or members of legacy types)
/// are permitted entry points.
pub fn reachable(ctx: ContextState, member: &EffectiveDecl<'_>) -> bool {
    !ctx.shared || member.threadsafe()
}

/// The context for anything accessed *through* `member`. A sub-access is
/// shared if the member is explicitly declared `shared`, or if it was
/// reached threadsafe-ly from an already-shared context: stepping through
/// the synchronized entry point of a shared object does not escape
/// sharedness.
pub fn next_context(ctx: ContextState, member: &EffectiveDecl<'_>) -> ContextState {
    ContextState {
        shared: member.shared() || (ctx.shared && member.threadsafe()),
    }
}
