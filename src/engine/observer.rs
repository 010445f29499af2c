// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Phase-boundary hooks.
//!
//! The solver also emits `tracing` events at the same points; an observer is
//! for callers who need the state itself, e.g. to record list lengths.

use crate::agents::ManId;
use crate::context::MatchingContext;
use crate::proposal::ProposalSummary;
use crate::resolvers::Resolution;

/// Callbacks at the three phase boundaries of a round.
///
/// All methods default to doing nothing.
#[allow(unused)]
pub trait PhaseObserver {
    /// A round is about to start; `free` is the proposal queue.
    fn round_started(&mut self, ctx: &MatchingContext, round: usize, free: &[ManId]) {}

    /// The proposal phase of `round` has drained.
    fn proposals_settled(&mut self, ctx: &MatchingContext, round: usize, summary: &ProposalSummary) {}

    /// The conflict resolver of `round` has run.
    fn resolver_applied(&mut self, ctx: &MatchingContext, round: usize, resolution: &Resolution) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {}
