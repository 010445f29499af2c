// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The engagement relation.
//!
//! During a proposal phase a woman may hold several tentatively engaged men,
//! and a man may be engaged to every woman of his top group. That ambiguity
//! is what conflict resolution removes.

use crate::agents::{self, Agent, ManId, WomanId};

/// Woman -> engaged men (insertion order), with a per-man count so that
/// "engaged to nobody" is O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engagements {
    suitors: Vec<Vec<ManId>>,
    /// Number of women each man is engaged to.
    counts: Vec<usize>,
}

impl Engagements {
    pub fn new(men: usize, women: usize) -> Self {
        Self {
            suitors: vec![Vec::new(); women],
            counts: vec![0; men],
        }
    }

    pub fn men_count(&self) -> usize {
        self.counts.len()
    }

    pub fn women_count(&self) -> usize {
        self.suitors.len()
    }

    /// Engage `man` to `woman`. Returns false if already engaged.
    pub fn engage(&mut self, man: ManId, woman: WomanId) -> bool {
        let suitors = &mut self.suitors[woman.index()];
        if suitors.contains(&man) {
            return false;
        }
        suitors.push(man);
        self.counts[man.index()] += 1;
        true
    }

    /// Break one engagement. Returns false if there was none.
    pub fn break_engagement(&mut self, man: ManId, woman: WomanId) -> bool {
        let suitors = &mut self.suitors[woman.index()];
        match suitors.iter().position(|&m| m == man) {
            Some(pos) => {
                suitors.remove(pos);
                self.counts[man.index()] -= 1;
                true
            }
            None => false,
        }
    }

    /// Break every engagement of `woman`, returning the men she held.
    pub fn clear_woman(&mut self, woman: WomanId) -> Vec<ManId> {
        let former = std::mem::take(&mut self.suitors[woman.index()]);
        for man in &former {
            self.counts[man.index()] -= 1;
        }
        former
    }

    pub fn suitors(&self, woman: WomanId) -> &[ManId] {
        &self.suitors[woman.index()]
    }

    pub fn is_engaged(&self, man: ManId, woman: WomanId) -> bool {
        self.suitors[woman.index()].contains(&man)
    }

    /// Number of women `man` is engaged to.
    pub fn engagement_count(&self, man: ManId) -> usize {
        self.counts[man.index()]
    }

    /// Engaged to nobody.
    pub fn is_free(&self, man: ManId) -> bool {
        self.counts[man.index()] == 0
    }

    /// Men engaged to nobody, in input order.
    pub fn free_men(&self) -> impl Iterator<Item = ManId> + '_ {
        agents::men(self.counts.len()).filter(|&m| self.is_free(m))
    }

    /// Women holding more than one man, in input order.
    pub fn multiply_engaged(&self) -> Vec<WomanId> {
        agents::women(self.suitors.len())
            .filter(|&w| self.suitors[w.index()].len() > 1)
            .collect()
    }

    /// Iterate over `(woman, engaged men)`.
    pub fn iter(&self) -> impl Iterator<Item = (WomanId, &[ManId])> {
        self.suitors
            .iter()
            .enumerate()
            .map(|(w, s)| (WomanId::from_index(w), s.as_slice()))
    }

    /// The relation as a woman-indexed assignment, if it is a bijection.
    ///
    /// Requires equal side sizes, every woman holding exactly one man, and
    /// every man engaged exactly once.
    pub fn as_perfect_matching(&self) -> Option<Vec<ManId>> {
        if self.suitors.len() != self.counts.len() || self.counts.iter().any(|&c| c != 1) {
            return None;
        }
        self.suitors
            .iter()
            .map(|s| match s.as_slice() {
                [man] => Some(*man),
                _ => None,
            })
            .collect()
    }
}
