// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The solver loop.
//!
//! # Architecture
//!
//! Each round moves through three states:
//!
//! ```text
//! Proposing -> Resolving -> { Proposing, Success, Failure }
//! ```
//!
//! 1. Every man engaged to nobody is queued, in input order
//! 2. The [`ProposalEngine`] runs until the queue drains
//! 3. The configured [`ConflictResolver`] runs once
//! 4. The round ends the run if:
//!    - the resolver found a perfect matching (strong stability), or
//!    - some free man has an empty list (no stable matching exists), or
//!    - the engagement relation is a perfect matching (super-stability), or
//!    - nothing was deleted, so no later round could differ
//!
//! Each non-terminal round deletes at least one pair, so a run ends within
//! `n² + 1` rounds. Strong stability enforces `n²` rounds by default and
//! reports [`MatchingError::NonConvergence`] past it.
//!
//! # Example
//!
//! ```
//! use tied_marriage::{Instance, Outcome, Solver, SolverConfig};
//!
//! let instance = Instance::new(
//!     vec![("a", vec![vec!["x", "y"]]), ("b", vec![vec!["x"], vec!["y"]])],
//!     vec![("x", vec![vec!["a"], vec!["b"]]), ("y", vec![vec!["a", "b"]])],
//! )
//! .unwrap();
//!
//! let report = Solver::new(SolverConfig::strong()).solve(&instance).unwrap();
//! match report.outcome {
//!     Outcome::Stable(matching) => assert_eq!(matching.pairs(), &[("x", "a"), ("y", "b")]),
//!     Outcome::NoStableMatching(reason) => panic!("unexpected {:?}", reason),
//! }
//! ```

pub mod config;
pub mod observer;

pub use config::{RoundLimit, SolverConfig, Stability};
pub use observer::{NoopObserver, PhaseObserver};

use crate::agents::ManId;
use crate::context::MatchingContext;
use crate::error::{MatchingError, MatchingResult};
use crate::instance::Instance;
use crate::outcome::{Impossibility, Outcome, Report};
use crate::proposal::ProposalEngine;
use crate::resolvers::{ConflictResolver, StronglyStableResolver, SuperStableResolver};
use crate::state::Counters;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, info, warn};

/// Terminal state of a run, in dense indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Woman-indexed perfect matching.
    Matched(Vec<ManId>),
    /// This free man has nobody left to propose to.
    Exhausted(ManId),
    /// A round changed nothing.
    Stalled,
}

/// Runs the propose/resolve loop with one conflict-resolution strategy.
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    resolver: Box<dyn ConflictResolver>,
}

impl Solver {
    /// Create a solver using the resolver for `config.stability`.
    pub fn new(config: SolverConfig) -> Self {
        let resolver: Box<dyn ConflictResolver> = match config.stability {
            Stability::Super => Box::new(SuperStableResolver::new()),
            Stability::Strong => Box::new(StronglyStableResolver::new()),
        };
        Self { config, resolver }
    }

    /// Create a solver with a custom resolver, e.g. a strong resolver
    /// with another matching oracle.
    pub fn with_resolver(config: SolverConfig, resolver: Box<dyn ConflictResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve an instance.
    ///
    /// # Errors
    ///
    /// - [`MatchingError::InputShape`] for strong stability with unequal sides
    /// - [`MatchingError::NonConvergence`] if the round limit is reached
    pub fn solve<M, W>(&mut self, instance: &Instance<M, W>) -> MatchingResult<Report<M, W>>
    where
        M: Clone + Eq + Hash + Debug,
        W: Clone + Eq + Hash + Debug,
    {
        self.solve_observed(instance, &mut NoopObserver)
    }

    /// Solve an instance, reporting phase boundaries to `observer`.
    pub fn solve_observed<M, W>(
        &mut self,
        instance: &Instance<M, W>,
        observer: &mut dyn PhaseObserver,
    ) -> MatchingResult<Report<M, W>>
    where
        M: Clone + Eq + Hash + Debug,
        W: Clone + Eq + Hash + Debug,
    {
        if self.config.stability == Stability::Strong && !instance.is_balanced() {
            return Err(MatchingError::InputShape {
                men: instance.men_count(),
                women: instance.women_count(),
            });
        }

        let mut ctx = MatchingContext::from_instance(instance);
        let verdict = self.run(&mut ctx, observer)?;
        let rounds = ctx.statistics.get(Counters::Rounds) as usize;
        info!(
            stability = %self.config.stability,
            rounds,
            verdict = ?verdict,
            statistics = %ctx.statistics,
            "run finished"
        );

        let outcome = match verdict {
            Verdict::Matched(assignment) => Outcome::Stable(instance.label_assignment(assignment)),
            Verdict::Exhausted(man) => Outcome::NoStableMatching(Impossibility::ExhaustedList {
                man: instance.man(man).clone(),
            }),
            Verdict::Stalled => Outcome::NoStableMatching(Impossibility::Stalled),
        };
        Ok(Report {
            outcome,
            rounds,
            statistics: ctx.statistics,
        })
    }

    /// Run rounds on `ctx` until a verdict is reached.
    pub fn run(
        &mut self,
        ctx: &mut MatchingContext,
        observer: &mut dyn PhaseObserver,
    ) -> MatchingResult<Verdict> {
        let limit = self.config.max_rounds(ctx.preferences.men_count());
        let mut round = 0;

        loop {
            if limit.is_some_and(|limit| round >= limit) {
                warn!(rounds = round, resolver = self.resolver.name(), "round limit reached");
                return Err(MatchingError::NonConvergence { rounds: round });
            }
            round += 1;
            ctx.statistics.increment(Counters::Rounds);

            // Proposing
            let free: Vec<ManId> = ctx.engagements.free_men().collect();
            debug!(round, free = free.len(), "round started");
            observer.round_started(ctx, round, &free);

            let mut proposals = ProposalEngine::new();
            for &man in &free {
                proposals.enqueue(man);
            }
            let summary = proposals.run(ctx);
            debug!(
                round,
                proposals = summary.proposals,
                rejections = summary.rejections,
                deleted = summary.deleted,
                "proposals settled"
            );
            observer.proposals_settled(ctx, round, &summary);

            // Resolving
            let resolution = self.resolver.resolve(ctx, round);
            debug!(
                round,
                resolver = self.resolver.name(),
                reset = resolution.reset.len(),
                deleted = resolution.deleted,
                "resolver applied"
            );
            observer.resolver_applied(ctx, round, &resolution);

            if let Some(assignment) = resolution.matching {
                return Ok(Verdict::Matched(assignment));
            }
            if let Some(man) = ctx.exhausted_free_man() {
                return Ok(Verdict::Exhausted(man));
            }
            if let Some(assignment) = ctx.engagements.as_perfect_matching() {
                return Ok(Verdict::Matched(assignment));
            }
            if summary.deleted == 0 && resolution.deleted == 0 {
                return Ok(Verdict::Stalled);
            }
        }
    }
}

/// Find a super-stable matching, or prove none exists.
pub fn super_stable_matching<M, W>(instance: &Instance<M, W>) -> MatchingResult<Outcome<M, W>>
where
    M: Clone + Eq + Hash + Debug,
    W: Clone + Eq + Hash + Debug,
{
    Ok(Solver::new(SolverConfig::super_stable()).solve(instance)?.outcome)
}

/// Find a strongly stable matching, or prove none exists.
pub fn strongly_stable_matching<M, W>(instance: &Instance<M, W>) -> MatchingResult<Outcome<M, W>>
where
    M: Clone + Eq + Hash + Debug,
    W: Clone + Eq + Hash + Debug,
{
    Ok(Solver::new(SolverConfig::strong()).solve(instance)?.outcome)
}
