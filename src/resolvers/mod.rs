// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Conflict resolvers.
//!
//! After a proposal phase drains, a resolver removes the remaining ambiguity
//! in the engagement relation by resetting women: clearing their engagements
//! and deleting the tail group of their live lists.
//!
//! # Organization
//!
//! - `weak`: [`SuperStableResolver`], resets every multiply-engaged woman
//! - `strong`: [`StronglyStableResolver`], resets only women engaged to a
//!   man of the critical set, and reports a perfect matching when one exists

pub mod strong;
pub mod weak;

pub use strong::StronglyStableResolver;
pub use weak::SuperStableResolver;

use crate::agents::{ManId, WomanId};
use crate::context::MatchingContext;
use std::fmt::Debug;

/// What a resolver did in one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Woman-indexed perfect matching found in the engagement relation, if
    /// the resolver decided the run is over.
    pub matching: Option<Vec<ManId>>,
    /// Critical set of the round, for resolvers that compute one.
    pub critical: Option<Vec<ManId>>,
    /// Women whose engagements were cleared, in order.
    pub reset: Vec<WomanId>,
    /// Men those women held, in order.
    pub freed: Vec<ManId>,
    /// Pairs severed by this resolution.
    pub deleted: usize,
}

/// A conflict-resolution strategy.
///
/// # Lifecycle
///
/// 1. The solver runs a proposal phase to exhaustion
/// 2. The solver calls `resolve` exactly once
/// 3. A returned `matching` ends the run; otherwise the solver checks for an
///    exhausted free man and starts another round
pub trait ConflictResolver: Debug {
    fn resolve(&mut self, ctx: &mut MatchingContext, round: usize) -> Resolution;

    /// Name for logging; defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Reset each woman in turn, recording what happened.
pub(crate) fn reset_women(ctx: &mut MatchingContext, women: Vec<WomanId>) -> Resolution {
    let deleted_before = ctx.preferences.deletions();
    let mut resolution = Resolution::default();
    for woman in women {
        resolution.freed.extend(ctx.reset_woman(woman));
        resolution.reset.push(woman);
    }
    resolution.deleted = ctx.preferences.deletions() - deleted_before;
    resolution
}
