// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Proposal phase.
//!
//! # Algorithm Overview
//!
//! While the free-men queue is non-empty:
//! 1. Pop the front man `m`. If his list is empty he is dropped.
//! 2. Snapshot his top tied group `G`; he proposes to every woman in `G`.
//! 3. Each woman `w` adds `m` to her engaged men.
//! 4. Every man still on `w`'s list whose original rank is strictly worse
//!    than `m`'s is rejected: his engagement to `w` (if any) is broken and
//!    the pair is severed. A man left engaged to nobody joins the back of
//!    the queue.
//!
//! The queue is FIFO so that freed men wait behind those already queued.
//! Lists only shrink, so the phase always drains.

use crate::agents::{ManId, WomanId};
use crate::context::MatchingContext;
use crate::state::Counters;
use std::collections::VecDeque;
use tracing::trace;

/// Drives proposals until nobody in the queue can propose.
#[derive(Debug, Default)]
pub struct ProposalEngine {
    queue: VecDeque<ManId>,
}

/// What one proposal phase did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProposalSummary {
    pub proposals: usize,
    pub rejections: usize,
    pub deleted: usize,
    /// Men popped with an empty list.
    pub dropped: usize,
}

impl ProposalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a man to the back of the queue.
    pub fn enqueue(&mut self, man: ManId) {
        self.queue.push_back(man);
    }

    pub fn queued(&self) -> impl Iterator<Item = ManId> + '_ {
        self.queue.iter().copied()
    }

    /// Run proposals to exhaustion.
    pub fn run(&mut self, ctx: &mut MatchingContext) -> ProposalSummary {
        let mut summary = ProposalSummary::default();
        let deleted_before = ctx.preferences.deletions();

        while let Some(man) = self.queue.pop_front() {
            let group: Vec<WomanId> = ctx.preferences.top_group(man).to_vec();
            if group.is_empty() {
                trace!(%man, "list exhausted, dropped");
                summary.dropped += 1;
                continue;
            }
            for woman in group {
                summary.proposals += 1;
                summary.rejections += self.propose(ctx, man, woman);
            }
        }

        summary.deleted = ctx.preferences.deletions() - deleted_before;
        summary
    }

    /// One proposal and its cascade of rejections. Returns the number of
    /// engagements broken.
    fn propose(&mut self, ctx: &mut MatchingContext, man: ManId, woman: WomanId) -> usize {
        ctx.statistics.increment(Counters::Proposals);
        ctx.engagements.engage(man, woman);

        // Validated instances are mutually acceptable, so the proposer is ranked.
        let Some(rank) = ctx.preferences.woman_rank(woman, man) else {
            return 0;
        };
        trace!(%man, %woman, rank, "proposal");

        let dominated: Vec<ManId> = ctx
            .preferences
            .woman_list(woman)
            .iter()
            .filter(|&other| {
                ctx.preferences
                    .woman_rank(woman, other)
                    .map_or(true, |r| r > rank)
            })
            .collect();

        let mut rejections = 0;
        for other in dominated {
            if ctx.engagements.break_engagement(other, woman) {
                rejections += 1;
                ctx.statistics.increment(Counters::Rejections);
                trace!(man = %other, %woman, "rejected");
                if ctx.engagements.is_free(other) {
                    self.queue.push_back(other);
                }
            }
            ctx.sever(other, woman);
        }
        rejections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PreferenceStore;

    fn m(i: usize) -> ManId {
        ManId::new(i)
    }

    fn w(i: usize) -> WomanId {
        WomanId::new(i)
    }

    fn run_all(ctx: &mut MatchingContext) -> ProposalSummary {
        let mut engine = ProposalEngine::new();
        for man in ctx.engagements.free_men().collect::<Vec<_>>() {
            engine.enqueue(man);
        }
        engine.run(ctx)
    }

    #[test]
    fn test_strict_preferences_behave_like_gale_shapley() {
        // m0: w0 > w1, m1: w0 > w1; w0 prefers m1.
        let mut ctx = MatchingContext::new(PreferenceStore::new(
            vec![vec![vec![w(0)], vec![w(1)]], vec![vec![w(0)], vec![w(1)]]],
            vec![vec![vec![m(1)], vec![m(0)]], vec![vec![m(0)], vec![m(1)]]],
        ));
        let summary = run_all(&mut ctx);

        assert_eq!(ctx.engagements.suitors(w(0)), &[m(1)]);
        assert_eq!(ctx.engagements.suitors(w(1)), &[m(0)]);
        assert_eq!(summary.proposals, 3);
        assert_eq!(summary.rejections, 1);
        // (m0, w0) when m1 proposed, then (m1, w1) when m0 proposed to w1.
        assert_eq!(summary.deleted, 2);
    }

    #[test]
    fn test_proposal_goes_to_whole_tied_group() {
        let mut ctx = MatchingContext::new(PreferenceStore::new(
            vec![vec![vec![w(0), w(1)]]],
            vec![vec![vec![m(0)]], vec![vec![m(0)]]],
        ));
        let summary = run_all(&mut ctx);
        assert_eq!(summary.proposals, 2);
        assert_eq!(ctx.engagements.engagement_count(m(0)), 2);
        assert_eq!(summary.deleted, 0);
    }

    #[test]
    fn test_ties_on_womans_side_keep_both() {
        let mut ctx = MatchingContext::new(PreferenceStore::new(
            vec![vec![vec![w(0)]], vec![vec![w(0)]]],
            vec![vec![vec![m(0), m(1)]]],
        ));
        run_all(&mut ctx);
        assert_eq!(ctx.engagements.suitors(w(0)), &[m(0), m(1)]);
        assert_eq!(ctx.engagements.multiply_engaged(), vec![w(0)]);
    }

    #[test]
    fn test_better_proposal_deletes_unengaged_successors() {
        // w0: m0 > m1 > m2. Only m0 proposes, yet m1 and m2 lose w0.
        let mut ctx = MatchingContext::new(PreferenceStore::new(
            vec![
                vec![vec![w(0)], vec![w(1)], vec![w(2)]],
                vec![vec![w(1)], vec![w(0)], vec![w(2)]],
                vec![vec![w(2)], vec![w(1)], vec![w(0)]],
            ],
            vec![
                vec![vec![m(0)], vec![m(1)], vec![m(2)]],
                vec![vec![m(1)], vec![m(0)], vec![m(2)]],
                vec![vec![m(2)], vec![m(0)], vec![m(1)]],
            ],
        ));
        let summary = run_all(&mut ctx);
        assert_eq!(summary.rejections, 0);
        assert!(!ctx.preferences.man_list(m(1)).contains(w(0)));
        assert!(!ctx.preferences.man_list(m(2)).contains(w(0)));
        assert_eq!(ctx.engagements.as_perfect_matching(), Some(vec![m(0), m(1), m(2)]));
    }

    #[test]
    fn test_exhausted_man_is_dropped() {
        let mut ctx = MatchingContext::new(PreferenceStore::new(
            vec![vec![vec![w(0)]], vec![vec![w(0)]]],
            vec![vec![vec![m(1)], vec![m(0)]]],
        ));
        let summary = run_all(&mut ctx);
        assert_eq!(summary.dropped, 1);
        assert!(ctx.engagements.is_free(m(0)));
        assert_eq!(ctx.exhausted_free_man(), Some(m(0)));
    }
}
