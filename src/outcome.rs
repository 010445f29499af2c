// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Results of a solver run.

use crate::agents::{Agent, ManId};
use crate::state::Statistics;
use std::fmt;

/// A perfect matching, woman -> man, in woman input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching<M, W> {
    pairs: Vec<(W, M)>,
    /// Woman index -> matched man.
    assignment: Vec<ManId>,
}

impl<M, W> Matching<M, W> {
    pub(crate) fn new(pairs: Vec<(W, M)>, assignment: Vec<ManId>) -> Self {
        Self { pairs, assignment }
    }

    /// `(woman, man)` pairs, one per woman.
    pub fn pairs(&self) -> &[(W, M)] {
        &self.pairs
    }

    pub fn assignment(&self) -> &[ManId] {
        &self.assignment
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Woman index of every man (inverse of [`Matching::assignment`]).
    pub(crate) fn partners_of_men(&self) -> Vec<usize> {
        let mut partners = vec![0; self.assignment.len()];
        for (w, m) in self.assignment.iter().enumerate() {
            partners[m.index()] = w;
        }
        partners
    }
}

impl<M: PartialEq, W: PartialEq> Matching<M, W> {
    pub fn man_of(&self, woman: &W) -> Option<&M> {
        self.pairs.iter().find(|(w, _)| w == woman).map(|(_, m)| m)
    }

    pub fn woman_of(&self, man: &M) -> Option<&W> {
        self.pairs.iter().find(|(_, m)| m == man).map(|(w, _)| w)
    }
}

/// Why no stable matching exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Impossibility<M> {
    /// A free man ran out of women to propose to.
    ExhaustedList { man: M },
    /// A round deleted nothing and left the relation imperfect; only
    /// reachable when the two sides differ in size.
    Stalled,
}

impl<M: fmt::Display> fmt::Display for Impossibility<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impossibility::ExhaustedList { man } => {
                write!(f, "{} has no acceptable partner left", man)
            }
            Impossibility::Stalled => write!(f, "proposals stalled without a perfect matching"),
        }
    }
}

/// Terminal verdict of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<M, W> {
    Stable(Matching<M, W>),
    NoStableMatching(Impossibility<M>),
}

impl<M, W> Outcome<M, W> {
    pub fn is_stable(&self) -> bool {
        matches!(self, Outcome::Stable(_))
    }

    pub fn matching(&self) -> Option<&Matching<M, W>> {
        match self {
            Outcome::Stable(matching) => Some(matching),
            Outcome::NoStableMatching(_) => None,
        }
    }

    pub fn into_matching(self) -> Option<Matching<M, W>> {
        match self {
            Outcome::Stable(matching) => Some(matching),
            Outcome::NoStableMatching(_) => None,
        }
    }
}

/// Outcome plus what it took to reach it.
#[derive(Debug, Clone)]
pub struct Report<M, W> {
    pub outcome: Outcome<M, W>,
    /// Rounds started, including the terminal one.
    pub rounds: usize,
    pub statistics: Statistics,
}
