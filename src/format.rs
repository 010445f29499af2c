// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Serde documents for instances and outcomes.
//!
//! ```json
//! {
//!   "men":   [{"id": "m1", "preferences": [["w1", "w2"], ["w3"]]}],
//!   "women": [{"id": "w1", "preferences": [["m2"], ["m1", "m3"]]}]
//! }
//! ```
//!
//! Outcomes serialize as `{"outcome": "stable", "matching": [...]}` or
//! `{"outcome": "none", "reason": "..."}`.

use crate::agents;
use crate::error::MatchingResult;
use crate::instance::Instance;
use crate::outcome::{Outcome, Report};
use serde::{Deserialize, Serialize};

/// One agent and its tied groups, best group first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub id: String,
    #[serde(default)]
    pub preferences: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstanceDocument {
    pub men: Vec<AgentEntry>,
    pub women: Vec<AgentEntry>,
}

impl InstanceDocument {
    /// Validate into an [`Instance`] labelled by agent id.
    pub fn into_instance(self) -> MatchingResult<Instance<String, String>> {
        Instance::new(
            self.men.into_iter().map(|e| (e.id, e.preferences)),
            self.women.into_iter().map(|e| (e.id, e.preferences)),
        )
    }
}

impl From<&Instance<String, String>> for InstanceDocument {
    fn from(instance: &Instance<String, String>) -> Self {
        let men = agents::men(instance.men_count())
            .map(|m| AgentEntry {
                id: instance.man(m).clone(),
                preferences: labelled(instance.man_groups(m), |w| instance.woman(w)),
            })
            .collect();
        let women = agents::women(instance.women_count())
            .map(|w| AgentEntry {
                id: instance.woman(w).clone(),
                preferences: labelled(instance.woman_groups(w), |m| instance.man(m)),
            })
            .collect();
        Self { men, women }
    }
}

fn labelled<'a, A: Copy>(groups: &[Vec<A>], label: impl Fn(A) -> &'a String) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| group.iter().map(|&a| label(a).clone()).collect())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairEntry {
    pub woman: String,
    pub man: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutcomeDocument {
    Stable {
        matching: Vec<PairEntry>,
    },
    #[serde(rename = "none")]
    NoStableMatching {
        reason: String,
    },
}

impl OutcomeDocument {
    pub fn from_outcome(outcome: &Outcome<String, String>) -> Self {
        match outcome {
            Outcome::Stable(matching) => OutcomeDocument::Stable {
                matching: matching
                    .pairs()
                    .iter()
                    .map(|(woman, man)| PairEntry {
                        woman: woman.clone(),
                        man: man.clone(),
                    })
                    .collect(),
            },
            Outcome::NoStableMatching(reason) => OutcomeDocument::NoStableMatching {
                reason: reason.to_string(),
            },
        }
    }

    pub fn from_report(report: &Report<String, String>) -> Self {
        Self::from_outcome(&report.outcome)
    }
}
