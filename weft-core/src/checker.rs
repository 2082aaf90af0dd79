#![forbid(unsafe_code)]

use rayon::prelude::*;

use weft_decl::{AccessChain, AccessStep, ChainRoot, TypeId};

use crate::error::{Violation, ViolationKind};
use crate::model::DeclModel;
use crate::resolver::{next_context, reachable, ContextState};

/// Walks access chains against a declaration model, one verdict per
/// chain. Pure: never mutates the model, never recovers from a violation
/// by guessing; the first failing step aborts that chain only.
pub struct Checker<'m> {
    model: &'m DeclModel,
}

impl<'m> Checker<'m> {
    pub fn new(model: &'m DeclModel) -> Self {
        Checker { model }
    }

    /// Check one chain. Steps are evaluated left to right; the running
    /// context starts at the root's declared shared-ness. Field reads,
    /// address-of, and method calls all use the same reachability test.
    pub fn check(&self, chain: &AccessChain) -> Result<(), Violation> {
        let mut ctx = ContextState::at_root(&chain.root);
        let mut current = root_type(&chain.root);

        for (i, step) in chain.steps.iter().enumerate() {
            let step_index = i + 1;

            // A root or member of non-struct type has no member table;
            // naming anything through it is the same defect class as a
            // typo: an unresolved name.
            let Some(owner) = current else {
                return Err(unresolved(step_index, step));
            };
            let Some(member) = self.model.effective(owner, &step.member.node) else {
                return Err(unresolved(step_index, step));
            };

            if !reachable(ctx, &member) {
                return Err(Violation {
                    step: step_index,
                    member: step.member.node.clone(),
                    kind: ViolationKind::InaccessibleInSharedContext,
                    span: step.member.span,
                });
            }

            ctx = next_context(ctx, &member);
            current = member.declared().ty;
        }

        Ok(())
    }

    /// Build the synthetic `this` root for checking a method's body: its
    /// shared-ness equals the method's declared `threadsafe` flag. The
    /// body's chains are then checked independently, rooted here.
    pub fn synthetic_this(&self, receiver: TypeId, method: &str) -> Result<ChainRoot, Violation> {
        let decl = self
            .model
            .lookup_member(receiver, method)
            .ok_or_else(|| Violation {
                step: 0,
                member: method.to_string(),
                kind: ViolationKind::UnresolvedMember,
                span: weft_decl::span(0, 0),
            })?;
        Ok(ChainRoot::This {
            receiver,
            method_threadsafe: decl.qualifiers.threadsafe,
        })
    }

    /// Check every chain of a translation unit. Chains are independent
    /// and the model is read-only, so verdicts are computed in parallel;
    /// one rejected chain never affects the others.
    pub fn check_all(&self, chains: &[AccessChain]) -> Vec<Result<(), Violation>> {
        chains.par_iter().map(|chain| self.check(chain)).collect()
    }
}

fn unresolved(step_index: usize, step: &AccessStep) -> Violation {
    Violation {
        step: step_index,
        member: step.member.node.clone(),
        kind: ViolationKind::UnresolvedMember,
        span: step.member.span,
    }
}

fn root_type(root: &ChainRoot) -> Option<TypeId> {
    match root {
        ChainRoot::Decl(decl) => decl.ty,
        ChainRoot::This { receiver, .. } => Some(*receiver),
    }
}

/// Holding area for chains submitted while declarations are still being
/// streamed in. A chain that would consult a not-yet-finalized member
/// table is queued rather than checked against a partial type; it is
/// released once every type along its path is complete.
#[derive(Debug, Default)]
pub struct CheckQueue {
    pending: Vec<AccessChain>,
}

impl CheckQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a chain: returned immediately when checkable now, queued
    /// otherwise.
    pub fn submit(&mut self, model: &DeclModel, chain: AccessChain) -> Option<AccessChain> {
        if is_ready(model, &chain) {
            Some(chain)
        } else {
            self.pending.push(chain);
            None
        }
    }

    /// Release every queued chain whose types have since been finalized.
    pub fn drain_ready(&mut self, model: &DeclModel) -> Vec<AccessChain> {
        let (ready, pending) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|chain| is_ready(model, chain));
        self.pending = pending;
        ready
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// A chain is ready when no step would consult an unfinalized member
/// table. An absent member in a *finalized* table is ready too: that is a
/// definitive `UnresolvedMember` verdict, not missing data.
fn is_ready(model: &DeclModel, chain: &AccessChain) -> bool {
    let mut current = root_type(&chain.root);
    for step in &chain.steps {
        let Some(owner) = current else {
            return true;
        };
        if !model.is_finalized(owner) {
            return false;
        }
        match model.lookup_member(owner, &step.member.node) {
            Some(member) => current = member.ty,
            None => return true,
        }
    }
    true
}
