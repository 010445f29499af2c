// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bipartite views of the engagement relation.
//!
//! - [`EngagementGraph`]: men on the left, women on the right, one edge per
//!   tentative engagement
//! - [`BipartiteMatcher`]: the maximum-cardinality matching oracle used by
//!   the strong-stability resolver. Any maximum matching will do;
//!   [`HopcroftKarp`] is the default.
//! - [`critical_set`]: men reachable by alternating paths from unmatched men

pub mod critical;
pub mod hopcroft_karp;

pub use critical::{critical_set, CriticalSet};
pub use hopcroft_karp::HopcroftKarp;

use crate::agents::{self, Agent, ManId, WomanId};
use crate::state::Engagements;
use std::fmt::Debug;

/// Snapshot of the engagement relation as an adjacency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementGraph {
    /// Man -> engaged women, women in index order.
    adjacency: Vec<Vec<WomanId>>,
    women: usize,
}

impl EngagementGraph {
    pub fn new(men: usize, women: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); men],
            women,
        }
    }

    pub fn from_engagements(engagements: &Engagements) -> Self {
        let mut graph = Self::new(engagements.men_count(), engagements.women_count());
        for (woman, suitors) in engagements.iter() {
            for &man in suitors {
                graph.add_edge(man, woman);
            }
        }
        graph
    }

    pub fn add_edge(&mut self, man: ManId, woman: WomanId) {
        let edges = &mut self.adjacency[man.index()];
        if !edges.contains(&woman) {
            edges.push(woman);
        }
    }

    pub fn men_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn women_count(&self) -> usize {
        self.women
    }

    pub fn men(&self) -> impl Iterator<Item = ManId> {
        agents::men(self.adjacency.len())
    }

    pub fn neighbours(&self, man: ManId) -> &[WomanId] {
        &self.adjacency[man.index()]
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

/// A matching as a symmetric pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaximumMatching {
    man_to_woman: Vec<Option<WomanId>>,
    woman_to_man: Vec<Option<ManId>>,
}

impl MaximumMatching {
    pub fn empty(men: usize, women: usize) -> Self {
        Self {
            man_to_woman: vec![None; men],
            woman_to_man: vec![None; women],
        }
    }

    /// Pair a man and a woman, replacing any previous partners of either.
    pub fn pair(&mut self, man: ManId, woman: WomanId) {
        if let Some(old) = self.man_to_woman[man.index()] {
            self.woman_to_man[old.index()] = None;
        }
        if let Some(old) = self.woman_to_man[woman.index()] {
            self.man_to_woman[old.index()] = None;
        }
        self.man_to_woman[man.index()] = Some(woman);
        self.woman_to_man[woman.index()] = Some(man);
    }

    pub fn partner_of_man(&self, man: ManId) -> Option<WomanId> {
        self.man_to_woman[man.index()]
    }

    pub fn partner_of_woman(&self, woman: WomanId) -> Option<ManId> {
        self.woman_to_man[woman.index()]
    }

    /// Number of matched pairs.
    pub fn size(&self) -> usize {
        self.man_to_woman.iter().flatten().count()
    }

    /// Every man and every woman is matched.
    pub fn is_perfect(&self) -> bool {
        self.man_to_woman.len() == self.woman_to_man.len()
            && self.man_to_woman.iter().all(Option::is_some)
    }

    /// Woman-indexed assignment, if perfect.
    pub fn assignment(&self) -> Option<Vec<ManId>> {
        if !self.is_perfect() {
            return None;
        }
        self.woman_to_man.iter().copied().collect()
    }

    /// Matched `(man, woman)` pairs in man order.
    pub fn pairs(&self) -> impl Iterator<Item = (ManId, WomanId)> + '_ {
        self.man_to_woman
            .iter()
            .enumerate()
            .filter_map(|(m, w)| w.map(|w| (ManId::from_index(m), w)))
    }
}

/// Maximum-cardinality bipartite matching oracle.
///
/// Correctness of the strong-stability algorithm does not depend on which
/// maximum matching is returned.
pub trait BipartiteMatcher: Debug {
    /// Return one maximum matching of `graph`.
    fn maximum_matching(&mut self, graph: &EngagementGraph) -> MaximumMatching;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
