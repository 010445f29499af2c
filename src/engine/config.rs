// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Solver configuration.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Which stability notion to compute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// No pair where both sides weakly prefer each other to their partners.
    Super,
    /// No pair where one side strictly and the other weakly prefers.
    Strong,
}

/// Bound on the number of outer rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundLimit {
    /// `n²` rounds for strong stability, unbounded for super-stability.
    #[default]
    Auto,
    Fixed(usize),
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub stability: Stability,
    #[serde(default)]
    pub round_limit: RoundLimit,
}

impl SolverConfig {
    pub fn new(stability: Stability) -> Self {
        Self {
            stability,
            round_limit: RoundLimit::Auto,
        }
    }

    pub fn super_stable() -> Self {
        Self::new(Stability::Super)
    }

    pub fn strong() -> Self {
        Self::new(Stability::Strong)
    }

    pub fn with_round_limit(mut self, round_limit: RoundLimit) -> Self {
        self.round_limit = round_limit;
        self
    }

    /// Maximum rounds for an instance with `men` men, if bounded.
    pub fn max_rounds(&self, men: usize) -> Option<usize> {
        match (self.round_limit, self.stability) {
            (RoundLimit::Fixed(rounds), _) => Some(rounds),
            (RoundLimit::Auto, Stability::Strong) => Some((men * men).max(1)),
            (RoundLimit::Auto, Stability::Super) | (RoundLimit::Unbounded, _) => None,
        }
    }
}
