// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Live preference lists.
//!
//! Each agent owns a sequence of tied groups which only ever shrinks. The
//! store pairs these live lists with the immutable rank tables from
//! [`crate::memo`], and exposes a single mutation: [`PreferenceStore::sever`].

use crate::agents::{Agent, ManId, WomanId};
use crate::memo::RankTable;

/// One agent's live preference list: tied groups, most preferred first.
///
/// Groups are never empty: a group is pruned as soon as its last member
/// is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceList<T> {
    groups: Vec<Vec<T>>,
}

impl<T: Agent> PreferenceList<T> {
    /// Create a list from tied groups, dropping any empty group.
    pub fn new(groups: Vec<Vec<T>>) -> Self {
        Self {
            groups: groups.into_iter().filter(|g| !g.is_empty()).collect(),
        }
    }

    /// The most preferred remaining group, or an empty slice.
    pub fn top(&self) -> &[T] {
        self.groups.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// The least preferred remaining group, or an empty slice.
    pub fn tail(&self) -> &[T] {
        self.groups.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn groups(&self) -> &[Vec<T>] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of agents still on the list.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, agent: T) -> bool {
        self.groups.iter().any(|g| g.contains(&agent))
    }

    /// Iterate over remaining agents, best group first.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.groups.iter().flatten().copied()
    }

    /// Remove `agent`, pruning its group if it empties.
    ///
    /// Returns false if the agent was not on the list.
    pub(crate) fn remove(&mut self, agent: T) -> bool {
        for g in 0..self.groups.len() {
            if let Some(pos) = self.groups[g].iter().position(|&a| a == agent) {
                self.groups[g].remove(pos);
                if self.groups[g].is_empty() {
                    self.groups.remove(g);
                }
                return true;
            }
        }
        false
    }
}

/// Owner of every live list plus the original rank tables.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    men: Vec<PreferenceList<WomanId>>,
    women: Vec<PreferenceList<ManId>>,
    men_ranks: RankTable<ManId, WomanId>,
    women_ranks: RankTable<WomanId, ManId>,
    /// Pairs severed so far.
    deletions: usize,
}

impl PreferenceStore {
    /// Build the store; rank tables are taken from these original lists.
    pub fn new(men: Vec<Vec<Vec<WomanId>>>, women: Vec<Vec<Vec<ManId>>>) -> Self {
        let men_ranks = RankTable::from_groups(&men, women.len());
        let women_ranks = RankTable::from_groups(&women, men.len());
        Self {
            men: men.into_iter().map(PreferenceList::new).collect(),
            women: women.into_iter().map(PreferenceList::new).collect(),
            men_ranks,
            women_ranks,
            deletions: 0,
        }
    }

    pub fn men_count(&self) -> usize {
        self.men.len()
    }

    pub fn women_count(&self) -> usize {
        self.women.len()
    }

    pub fn man_list(&self, man: ManId) -> &PreferenceList<WomanId> {
        &self.men[man.index()]
    }

    pub fn woman_list(&self, woman: WomanId) -> &PreferenceList<ManId> {
        &self.women[woman.index()]
    }

    /// The man's current most-preferred group.
    pub fn top_group(&self, man: ManId) -> &[WomanId] {
        self.men[man.index()].top()
    }

    /// The woman's current least-preferred group.
    pub fn tail_group(&self, woman: WomanId) -> &[ManId] {
        self.women[woman.index()].tail()
    }

    /// Original rank of `man` on `woman`'s list.
    #[inline]
    pub fn woman_rank(&self, woman: WomanId, man: ManId) -> Option<usize> {
        self.women_ranks.rank(woman, man)
    }

    /// Original rank of `woman` on `man`'s list.
    #[inline]
    pub fn man_rank(&self, man: ManId, woman: WomanId) -> Option<usize> {
        self.men_ranks.rank(man, woman)
    }

    pub fn men_ranks(&self) -> &RankTable<ManId, WomanId> {
        &self.men_ranks
    }

    pub fn women_ranks(&self) -> &RankTable<WomanId, ManId> {
        &self.women_ranks
    }

    /// Remove the pair from both live lists.
    ///
    /// A pair that is already severed is a no-op. Returns whether anything
    /// was removed.
    pub fn sever(&mut self, man: ManId, woman: WomanId) -> bool {
        let from_man = self.men[man.index()].remove(woman);
        let from_woman = self.women[woman.index()].remove(man);
        let severed = from_man || from_woman;
        if severed {
            self.deletions += 1;
        }
        severed
    }

    /// Pairs severed since the store was built.
    pub fn deletions(&self) -> usize {
        self.deletions
    }

    /// Live list lengths, men first then women.
    pub fn list_lengths(&self) -> Vec<usize> {
        self.men
            .iter()
            .map(PreferenceList::len)
            .chain(self.women.iter().map(PreferenceList::len))
            .collect()
    }
}
