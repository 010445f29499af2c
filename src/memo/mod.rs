// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 1: MEMO data (immutable, precomputed).
//!
//! Rank tables are computed once from the original preference lists, before
//! any pair is deleted. Domination tests during the proposal phase compare
//! original ranks, so they stay valid after the live lists have shrunk.

use crate::agents::Agent;
use std::marker::PhantomData;

/// Immutable `owner -> candidate -> tied group index` lookup.
///
/// Lower rank is better. `None` means the candidate never appeared on the
/// owner's original list.
#[derive(Debug, Clone)]
pub struct RankTable<O, C> {
    /// Row-major `owners x candidates` table.
    ranks: Vec<Option<usize>>,
    candidates: usize,
    _marker: PhantomData<(O, C)>,
}

impl<O: Agent, C: Agent> RankTable<O, C> {
    /// Build the table from original tied-group lists, one per owner.
    pub fn from_groups(lists: &[Vec<Vec<C>>], candidates: usize) -> Self {
        let mut ranks = vec![None; lists.len() * candidates];
        for (owner, groups) in lists.iter().enumerate() {
            for (rank, group) in groups.iter().enumerate() {
                for candidate in group {
                    ranks[owner * candidates + candidate.index()] = Some(rank);
                }
            }
        }
        Self {
            ranks,
            candidates,
            _marker: PhantomData,
        }
    }

    /// O(1) rank of `candidate` on `owner`'s original list.
    #[inline]
    pub fn rank(&self, owner: O, candidate: C) -> Option<usize> {
        self.ranks[owner.index() * self.candidates + candidate.index()]
    }

    /// Whether `owner` strictly prefers `a` to `b`.
    ///
    /// Unranked candidates lose to every ranked one.
    pub fn strictly_prefers(&self, owner: O, a: C, b: C) -> bool {
        match (self.rank(owner, a), self.rank(owner, b)) {
            (Some(ra), Some(rb)) => ra < rb,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// Number of owners (rows).
    pub fn owners(&self) -> usize {
        if self.candidates == 0 {
            0
        } else {
            self.ranks.len() / self.candidates
        }
    }
}
