// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Strong-stability resolver.

use super::{reset_women, ConflictResolver, Resolution};
use crate::context::MatchingContext;
use crate::graph::{critical_set, BipartiteMatcher, EngagementGraph, HopcroftKarp};
use crate::state::Counters;
use tracing::debug;

/// Resets women engaged to a man of the critical set.
///
/// 1. Find a maximum matching of the engagement graph. If it is perfect it
///    is returned and nothing is deleted.
/// 2. Otherwise compute the critical set `Z`.
/// 3. Every woman engaged to at least one man of `Z` is reset, even if her
///    engagements are the same as when she was last reset.
#[derive(Debug, Default, Clone)]
pub struct StronglyStableResolver<B = HopcroftKarp> {
    matcher: B,
}

impl StronglyStableResolver<HopcroftKarp> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: BipartiteMatcher> StronglyStableResolver<B> {
    /// Use a different maximum-matching oracle.
    pub fn with_matcher(matcher: B) -> Self {
        Self { matcher }
    }
}

impl<B: BipartiteMatcher> ConflictResolver for StronglyStableResolver<B> {
    fn resolve(&mut self, ctx: &mut MatchingContext, round: usize) -> Resolution {
        let graph = EngagementGraph::from_engagements(&ctx.engagements);
        ctx.statistics.increment(Counters::MatcherCalls);
        let matching = self.matcher.maximum_matching(&graph);

        if let Some(assignment) = matching.assignment() {
            debug!(round, matcher = self.matcher.name(), "engagement graph has a perfect matching");
            return Resolution {
                matching: Some(assignment),
                ..Resolution::default()
            };
        }

        let critical = critical_set(&graph, &matching);
        let women: Vec<_> = ctx
            .engagements
            .iter()
            .filter(|(_, suitors)| suitors.iter().any(|&m| critical.contains(m)))
            .map(|(woman, _)| woman)
            .collect();

        let mut resolution = reset_women(ctx, women);
        debug!(
            round,
            matched = matching.size(),
            critical = critical.len(),
            reset = resolution.reset.len(),
            deleted = resolution.deleted,
            "strong-stability resolution"
        );
        resolution.critical = Some(critical.men());
        resolution
    }

    fn name(&self) -> &str {
        "StronglyStable"
    }
}
