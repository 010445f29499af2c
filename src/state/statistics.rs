// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in the context, and are incremented by the proposal
//! engine, the conflict resolvers and the solver loop.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(Debug, EnumCountMacro, EnumIter, Display, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Outer proposal/resolution rounds started.
    Rounds,
    /// Individual man -> woman proposals.
    Proposals,
    /// Engagements broken because a strictly better man proposed.
    Rejections,
    /// Pairs severed from both preference lists.
    PairsDeleted,
    /// Women whose engagements were cleared by a conflict resolver.
    WomenReset,
    /// Maximum-matching oracle invocations.
    MatcherCalls,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment(&mut self, counter: Counters) {
        self.add(counter, 1);
    }

    pub(crate) fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", counter, self.get(counter))?;
        }
        Ok(())
    }
}
