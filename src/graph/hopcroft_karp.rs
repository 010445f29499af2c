// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Hopcroft–Karp maximum bipartite matching.
//!
//! Each phase layers the men by BFS from the unmatched men, then augments
//! along vertex-disjoint shortest alternating paths found by DFS. The loop
//! stops after a phase that finds no augmenting path.

use super::{BipartiteMatcher, EngagementGraph, MaximumMatching};
use crate::agents::{Agent, ManId, WomanId};
use std::collections::VecDeque;

const UNREACHED: usize = usize::MAX;

#[derive(Debug, Default, Clone, Copy)]
pub struct HopcroftKarp;

impl HopcroftKarp {
    pub fn new() -> Self {
        Self
    }
}

struct Search<'g> {
    graph: &'g EngagementGraph,
    man_to_woman: Vec<Option<WomanId>>,
    woman_to_man: Vec<Option<ManId>>,
    level: Vec<usize>,
}

impl<'g> Search<'g> {
    fn new(graph: &'g EngagementGraph) -> Self {
        Self {
            graph,
            man_to_woman: vec![None; graph.men_count()],
            woman_to_man: vec![None; graph.women_count()],
            level: vec![UNREACHED; graph.men_count()],
        }
    }

    /// Layer men by alternating distance from the unmatched ones.
    fn layer(&mut self) {
        let graph = self.graph;
        let mut queue = VecDeque::new();
        for man in graph.men() {
            if self.man_to_woman[man.index()].is_none() {
                self.level[man.index()] = 0;
                queue.push_back(man);
            } else {
                self.level[man.index()] = UNREACHED;
            }
        }
        while let Some(man) = queue.pop_front() {
            for &woman in graph.neighbours(man) {
                if let Some(next) = self.woman_to_man[woman.index()] {
                    if self.level[next.index()] == UNREACHED {
                        self.level[next.index()] = self.level[man.index()] + 1;
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    /// Find an augmenting path from `man` along the layers and flip it.
    fn augment(&mut self, man: ManId) -> bool {
        let graph = self.graph;
        for &woman in graph.neighbours(man) {
            let free = match self.woman_to_man[woman.index()] {
                None => true,
                Some(next) => {
                    self.level[next.index()] == self.level[man.index()] + 1 && self.augment(next)
                }
            };
            if free {
                self.man_to_woman[man.index()] = Some(woman);
                self.woman_to_man[woman.index()] = Some(man);
                return true;
            }
        }
        // Dead end for the rest of this phase.
        self.level[man.index()] = UNREACHED;
        false
    }

    fn run(mut self) -> MaximumMatching {
        let graph = self.graph;
        loop {
            self.layer();
            let mut augmented = false;
            for man in graph.men() {
                if self.man_to_woman[man.index()].is_none() && self.augment(man) {
                    augmented = true;
                }
            }
            if !augmented {
                break;
            }
        }

        let mut matching = MaximumMatching::empty(graph.men_count(), graph.women_count());
        for (m, woman) in self.man_to_woman.iter().enumerate() {
            if let Some(woman) = woman {
                matching.pair(ManId::from_index(m), *woman);
            }
        }
        matching
    }
}

impl BipartiteMatcher for HopcroftKarp {
    fn maximum_matching(&mut self, graph: &EngagementGraph) -> MaximumMatching {
        Search::new(graph).run()
    }

    fn name(&self) -> &str {
        "HopcroftKarp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(i: usize) -> ManId {
        ManId::new(i)
    }

    fn w(i: usize) -> WomanId {
        WomanId::new(i)
    }

    fn graph(men: usize, women: usize, edges: &[(usize, usize)]) -> EngagementGraph {
        let mut graph = EngagementGraph::new(men, women);
        for &(a, b) in edges {
            graph.add_edge(m(a), w(b));
        }
        graph
    }

    #[test]
    fn test_empty_graph() {
        let matching = HopcroftKarp.maximum_matching(&graph(2, 2, &[]));
        assert_eq!(matching.size(), 0);
    }

    #[test]
    fn test_complete_graph_is_perfect() {
        let g = graph(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let matching = HopcroftKarp.maximum_matching(&g);
        assert!(matching.is_perfect());
        assert_eq!(matching.assignment(), Some(vec![m(0), m(1)]));
    }

    #[test]
    fn test_needs_augmenting_path() {
        // Greedy m0-w0 blocks m1; the augmenting path m1-w0-m0-w1 fixes it.
        let g = graph(2, 2, &[(0, 0), (0, 1), (1, 0)]);
        let matching = HopcroftKarp.maximum_matching(&g);
        assert!(matching.is_perfect());
        assert_eq!(matching.partner_of_man(m(1)), Some(w(0)));
        assert_eq!(matching.partner_of_man(m(0)), Some(w(1)));
    }

    #[test]
    fn test_deficient_graph() {
        // Three men share two women.
        let g = graph(3, 3, &[(0, 0), (1, 0), (1, 1), (2, 1)]);
        let matching = HopcroftKarp.maximum_matching(&g);
        assert_eq!(matching.size(), 2);
        assert!(!matching.is_perfect());
    }

    #[test]
    fn test_long_augmenting_chain() {
        let g = graph(
            4,
            4,
            &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 3), (3, 0)],
        );
        let matching = HopcroftKarp.maximum_matching(&g);
        assert!(matching.is_perfect());
    }
}
