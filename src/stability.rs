// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Blocking-pair checks for any perfect matching of an instance.
//!
//! For an acceptable pair `(m, w)` that is not matched together, compare
//! each side's rank of the other with its rank of its own partner:
//!
//! | criterion | `(m, w)` blocks when                                  |
//! |-----------|--------------------------------------------------------|
//! | weak      | both strictly prefer each other                        |
//! | strong    | one strictly prefers, the other at least ties          |
//! | super     | both at least tie                                      |
//!
//! A partner that is not on an agent's list ranks below everyone listed.

use crate::agents::{self, Agent, ManId, WomanId};
use crate::engine::Stability;
use crate::instance::Instance;
use crate::memo::RankTable;
use crate::outcome::Matching;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;
use strum_macros::{Display, EnumIter};

/// Which kind of blocking pair to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Criterion {
    Weak,
    Strong,
    Super,
}

impl From<Stability> for Criterion {
    fn from(stability: Stability) -> Self {
        match stability {
            Stability::Super => Criterion::Super,
            Stability::Strong => Criterion::Strong,
        }
    }
}

impl Criterion {
    /// Whether a pair with these attitudes blocks. Each argument is how the
    /// agent regards the other compared with its partner; `Less` means the
    /// other is preferred.
    fn blocks(self, man: Ordering, woman: Ordering) -> bool {
        use Ordering::*;
        match self {
            Criterion::Weak => man == Less && woman == Less,
            Criterion::Strong => {
                (man == Less && woman != Greater) || (man != Greater && woman == Less)
            }
            Criterion::Super => man != Greater && woman != Greater,
        }
    }
}

/// Rank-based comparison, with unranked treated as worst.
fn compare(candidate: Option<usize>, partner: Option<usize>) -> Ordering {
    match (candidate, partner) {
        (Some(c), Some(p)) => c.cmp(&p),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Every `(man, woman)` pair blocking `matching` under `criterion`, in man
/// then woman input order.
pub fn blocking_pairs<M, W>(
    instance: &Instance<M, W>,
    matching: &Matching<M, W>,
    criterion: Criterion,
) -> Vec<(M, W)>
where
    M: Clone + Eq + Hash + Debug,
    W: Clone + Eq + Hash + Debug,
{
    let (men_ranks, women_ranks) = rank_tables(instance);
    let assignment = matching.assignment();
    let partners = matching.partners_of_men();

    let mut blocking = Vec::new();
    for man in agents::men(instance.men_count()) {
        let own = WomanId::from_index(partners[man.index()]);
        for &woman in instance.man_groups(man).iter().flatten() {
            if woman == own {
                continue;
            }
            let rival = assignment[woman.index()];
            let man_view = compare(men_ranks.rank(man, woman), men_ranks.rank(man, own));
            let woman_view = compare(women_ranks.rank(woman, man), women_ranks.rank(woman, rival));
            if criterion.blocks(man_view, woman_view) {
                blocking.push((instance.man(man).clone(), instance.woman(woman).clone()));
            }
        }
    }
    blocking
}

/// `matching` uses only acceptable pairs and has no blocking pair under
/// `criterion`.
pub fn is_stable<M, W>(
    instance: &Instance<M, W>,
    matching: &Matching<M, W>,
    criterion: Criterion,
) -> bool
where
    M: Clone + Eq + Hash + Debug,
    W: Clone + Eq + Hash + Debug,
{
    let (men_ranks, _) = rank_tables(instance);
    let acceptable = matching
        .assignment()
        .iter()
        .enumerate()
        .all(|(w, &man)| men_ranks.rank(man, WomanId::from_index(w)).is_some());
    acceptable && blocking_pairs(instance, matching, criterion).is_empty()
}

fn rank_tables<M, W>(
    instance: &Instance<M, W>,
) -> (RankTable<ManId, WomanId>, RankTable<WomanId, ManId>)
where
    M: Clone + Eq + Hash + Debug,
    W: Clone + Eq + Hash + Debug,
{
    let men: Vec<Vec<Vec<WomanId>>> = agents::men(instance.men_count())
        .map(|m| instance.man_groups(m).to_vec())
        .collect();
    let women: Vec<Vec<Vec<ManId>>> = agents::women(instance.women_count())
        .map(|w| instance.woman_groups(w).to_vec())
        .collect();
    (
        RankTable::from_groups(&men, instance.women_count()),
        RankTable::from_groups(&women, instance.men_count()),
    )
}
