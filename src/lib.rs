// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stable marriage with ties: super-stable and strongly stable matchings.
//!
//! Given `n` men and `n` women, each ranking the other side in tied groups,
//! the solver either returns a perfect matching that is stable under the
//! chosen criterion or proves that none exists.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! Precomputed once per instance:
//! - Dense agent indices ([`agents`])
//! - Rank tables of the original preference lists ([`memo`])
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! State owned by one [`MatchingContext`] for the duration of a run:
//! - Live preference lists, which only shrink
//! - The engagement relation, woman -> tentatively engaged men
//! - Statistics
//!
//! # Algorithm
//!
//! Each round has two phases:
//!
//! 1. **Proposals**: every free man proposes to his whole top tied group.
//!    A proposal deletes every pair `(m', w)` with `m'` strictly below the
//!    proposer on `w`'s list.
//! 2. **Conflict resolution**:
//!    - *Super-stability*: every woman holding two or more men loses her
//!      tail group.
//!    - *Strong stability*: if the engagement graph has a perfect matching
//!      it is the answer; otherwise every woman engaged to a man of the
//!      critical set loses her tail group.
//!
//! A free man with an empty list proves that no stable matching exists.
//!
//! # References
//!
//! - Irving, R. W. (1994). "Stable marriage and indifference."
//!   Discrete Applied Mathematics 48, 261-272.

pub mod agents;
pub mod context;
pub mod engine;
pub mod error;
pub mod format;
pub mod graph;
pub mod instance;
pub mod memo;
pub mod outcome;
pub mod proposal;
pub mod resolvers;
pub mod stability;
pub mod state;

// Re-export commonly used types
pub use agents::{ManId, WomanId};
pub use context::MatchingContext;
pub use engine::{
    strongly_stable_matching, super_stable_matching, PhaseObserver, RoundLimit, Solver,
    SolverConfig, Stability, Verdict,
};
pub use error::{InputError, MatchingError, MatchingResult};
pub use format::{InstanceDocument, OutcomeDocument};
pub use instance::Instance;
pub use outcome::{Impossibility, Matching, Outcome, Report};
pub use stability::{blocking_pairs, is_stable, Criterion};
pub use state::{Counters, Statistics};
