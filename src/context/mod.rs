// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Matching context combining MEMO and DYNAMIC state.
//!
//! The MatchingContext owns everything a run mutates:
//! - Preference lists (with their immutable rank tables)
//! - The engagement relation
//! - Statistics
//!
//! A context is built once per run and owned exclusively by the solver, so
//! the proposal phase and conflict resolution never observe each other
//! half-way.

use crate::agents::{ManId, WomanId};
use crate::instance::Instance;
use crate::state::{Counters, Engagements, PreferenceStore, Statistics};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// All mutable state of one run.
///
/// # Memory Model
///
/// ```text
/// MatchingContext {
///     preferences: PreferenceStore,  // live lists (shrink) + rank tables (fixed)
///     engagements: Engagements,      // woman -> tentatively engaged men
///     statistics: Statistics,        // counters
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MatchingContext {
    pub preferences: PreferenceStore,
    pub engagements: Engagements,
    pub statistics: Statistics,
}

impl MatchingContext {
    /// Create a context with every man free.
    pub fn new(preferences: PreferenceStore) -> Self {
        let engagements = Engagements::new(preferences.men_count(), preferences.women_count());
        Self {
            preferences,
            engagements,
            statistics: Statistics::new(),
        }
    }

    pub fn from_instance<M, W>(instance: &Instance<M, W>) -> Self
    where
        M: Clone + Eq + Hash + Debug,
        W: Clone + Eq + Hash + Debug,
    {
        Self::new(instance.preference_store())
    }

    /// Sever a pair, counting the deletion.
    pub fn sever(&mut self, man: ManId, woman: WomanId) -> bool {
        let severed = self.preferences.sever(man, woman);
        if severed {
            trace!(%man, %woman, "pair deleted");
            self.statistics.increment(Counters::PairsDeleted);
        }
        severed
    }

    /// Clear a woman's engagements and delete the tail group of her list.
    ///
    /// Returns the men she held. Her engaged men are all tied at her tail,
    /// so every one of them is severed as well.
    pub fn reset_woman(&mut self, woman: WomanId) -> Vec<ManId> {
        let former = self.engagements.clear_woman(woman);
        let tail = self.preferences.tail_group(woman).to_vec();
        trace!(%woman, held = former.len(), tail = tail.len(), "woman reset");
        for man in tail {
            self.sever(man, woman);
        }
        self.statistics.increment(Counters::WomenReset);
        former
    }

    /// First man, in input order, who is free and has nobody left to propose to.
    pub fn exhausted_free_man(&self) -> Option<ManId> {
        self.engagements
            .free_men()
            .find(|&m| self.preferences.man_list(m).is_empty())
    }
}
