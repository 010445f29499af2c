// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Critical set of men.
//!
//! Given the engagement graph and a maximum matching `M`, the critical set is
//! `Z = U ∪ R`: the unmatched men `U` plus every man reachable from them by
//! an alternating path (non-matching edge from a man, matching edge from a
//! woman). Removing `Z` removes the deficiency of the maximum matching; these
//! are the men whose rejections are forced this round.

use super::{EngagementGraph, MaximumMatching};
use crate::agents::{Agent, ManId, WomanId};
use std::collections::VecDeque;

/// A node of the alternating-path search.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Man about to take a non-matching edge.
    Man(ManId),
    /// Woman about to take her matching edge.
    Woman(WomanId),
}

/// Result of [`critical_set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalSet {
    members: Vec<bool>,
    /// Men absent from the matching (the search seeds), in man order.
    pub unmatched: Vec<ManId>,
    /// Matched men reached by alternating paths, in discovery order.
    pub reachable: Vec<ManId>,
}

impl CriticalSet {
    pub fn contains(&self, man: ManId) -> bool {
        self.members[man.index()]
    }

    pub fn len(&self) -> usize {
        self.unmatched.len() + self.reachable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members in man order.
    pub fn men(&self) -> Vec<ManId> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, &member)| member)
            .map(|(m, _)| ManId::from_index(m))
            .collect()
    }
}

/// Compute the critical set by breadth-first alternating-path search.
pub fn critical_set(graph: &EngagementGraph, matching: &MaximumMatching) -> CriticalSet {
    let mut members = vec![false; graph.men_count()];
    let mut visited_women = vec![false; graph.women_count()];
    let mut unmatched = Vec::new();
    let mut reachable = Vec::new();
    let mut queue = VecDeque::new();

    for man in graph.men() {
        if matching.partner_of_man(man).is_none() {
            members[man.index()] = true;
            unmatched.push(man);
            queue.push_back(Step::Man(man));
        }
    }

    while let Some(step) = queue.pop_front() {
        match step {
            Step::Man(man) => {
                let matched = matching.partner_of_man(man);
                for &woman in graph.neighbours(man) {
                    if matched != Some(woman) && !visited_women[woman.index()] {
                        visited_women[woman.index()] = true;
                        queue.push_back(Step::Woman(woman));
                    }
                }
            }
            Step::Woman(woman) => {
                if let Some(man) = matching.partner_of_woman(woman) {
                    if !members[man.index()] {
                        members[man.index()] = true;
                        reachable.push(man);
                        queue.push_back(Step::Man(man));
                    }
                }
            }
        }
    }

    CriticalSet {
        members,
        unmatched,
        reachable,
    }
}
