// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.
//!
//! Instances are written with 1-based numbers: man `1` is labelled `"m1"`,
//! woman `1` is labelled `"w1"`.

#![allow(dead_code)]

use proptest::prelude::*;
use tied_marriage::agents::{Agent, ManId, WomanId};
use tied_marriage::context::MatchingContext;
use tied_marriage::engine::PhaseObserver;
use tied_marriage::resolvers::Resolution;
use tied_marriage::{is_stable, Criterion, Instance, Matching};

pub type Labelled = Instance<String, String>;

pub fn man(i: usize) -> String {
    format!("m{}", i)
}

pub fn woman(i: usize) -> String {
    format!("w{}", i)
}

/// Build an instance from 1-based tied groups; entry `i` belongs to agent `i + 1`.
pub fn tied(men: &[Vec<Vec<usize>>], women: &[Vec<Vec<usize>>]) -> Labelled {
    Instance::new(
        men.iter()
            .enumerate()
            .map(|(i, groups)| (man(i + 1), label_groups(groups, woman))),
        women
            .iter()
            .enumerate()
            .map(|(i, groups)| (woman(i + 1), label_groups(groups, man))),
    )
    .unwrap()
}

/// Build an instance from 1-based strict lists.
pub fn strict(men: &[Vec<usize>], women: &[Vec<usize>]) -> Labelled {
    let wrap = |lists: &[Vec<usize>]| -> Vec<Vec<Vec<usize>>> {
        lists
            .iter()
            .map(|list| list.iter().map(|&a| vec![a]).collect())
            .collect()
    };
    tied(&wrap(men), &wrap(women))
}

fn label_groups(groups: &[Vec<usize>], label: fn(usize) -> String) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| group.iter().map(|&a| label(a)).collect())
        .collect()
}

/// `(woman, man)` label pairs from 1-based numbers.
pub fn pairs(matching: &[(usize, usize)]) -> Vec<(String, String)> {
    matching.iter().map(|&(w, m)| (woman(w), man(m))).collect()
}

/// Man-proposing Gale–Shapley on 0-based complete strict lists.
/// Returns woman -> man.
pub fn gale_shapley(men: &[Vec<usize>], women: &[Vec<usize>]) -> Vec<usize> {
    let n = men.len();
    let mut rank = vec![vec![0; n]; n];
    for (w, list) in women.iter().enumerate() {
        for (r, &m) in list.iter().enumerate() {
            rank[w][m] = r;
        }
    }
    let mut next = vec![0; n];
    let mut partner: Vec<Option<usize>> = vec![None; n];
    let mut free: Vec<usize> = (0..n).rev().collect();
    while let Some(m) = free.pop() {
        let w = men[m][next[m]];
        next[m] += 1;
        match partner[w] {
            None => partner[w] = Some(m),
            Some(other) if rank[w][m] < rank[w][other] => {
                partner[w] = Some(m);
                free.push(other);
            }
            Some(_) => free.push(m),
        }
    }
    partner.into_iter().map(|m| m.unwrap()).collect()
}

/// Every perfect matching as a woman-indexed permutation of men.
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn extend(prefix: &mut Vec<usize>, used: &mut Vec<bool>, out: &mut Vec<Vec<usize>>) {
        if prefix.len() == used.len() {
            out.push(prefix.clone());
            return;
        }
        for m in 0..used.len() {
            if !used[m] {
                used[m] = true;
                prefix.push(m);
                extend(prefix, used, out);
                prefix.pop();
                used[m] = false;
            }
        }
    }
    let mut out = Vec::new();
    extend(&mut Vec::new(), &mut vec![false; n], &mut out);
    out
}

/// Brute-force: every perfect matching stable under `criterion`.
pub fn stable_matchings(instance: &Labelled, criterion: Criterion) -> Vec<Matching<String, String>> {
    permutations(instance.men_count())
        .into_iter()
        .map(|assignment| {
            let pairs = assignment.iter().enumerate().map(|(w, &m)| {
                (
                    instance.woman(WomanId::from_index(w)).clone(),
                    instance.man(ManId::from_index(m)).clone(),
                )
            });
            instance.matching(pairs).unwrap()
        })
        .filter(|matching| is_stable(instance, matching, criterion))
        .collect()
}

/// Records the state seen at each phase boundary.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// Live list lengths at the start of each round.
    pub lengths: Vec<Vec<usize>>,
    /// Proposal queue of each round.
    pub queues: Vec<Vec<ManId>>,
    /// Women reset in each round.
    pub resets: Vec<Vec<WomanId>>,
    /// Critical set of each round, when computed.
    pub critical: Vec<Option<Vec<ManId>>>,
}

impl PhaseObserver for RecordingObserver {
    fn round_started(&mut self, ctx: &MatchingContext, _round: usize, free: &[ManId]) {
        self.lengths.push(ctx.preferences.list_lengths());
        self.queues.push(free.to_vec());
    }

    fn resolver_applied(&mut self, _ctx: &MatchingContext, _round: usize, resolution: &Resolution) {
        self.resets.push(resolution.reset.clone());
        self.critical.push(resolution.critical.clone());
    }
}

/// Groups `order` into ties, starting a new group wherever `cuts` is set.
pub fn group(order: Vec<usize>, cuts: &[bool]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, a) in order.into_iter().enumerate() {
        if !cuts[i] {
            if let Some(current) = groups.last_mut() {
                current.push(a);
                continue;
            }
        }
        groups.push(vec![a]);
    }
    groups
}

/// `n` complete lists with random ties, 0-based.
pub fn tied_lists(n: usize) -> impl Strategy<Value = Vec<Vec<Vec<usize>>>> {
    prop::collection::vec(
        (
            Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            prop::collection::vec(any::<bool>(), n),
        ),
        n,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(order, cuts)| group(order, &cuts))
            .collect()
    })
}

/// `n` complete strict lists, 0-based.
pub fn strict_lists(n: usize) -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(Just((0..n).collect::<Vec<usize>>()).prop_shuffle(), n)
}

/// Shift 0-based groups to the 1-based numbering used by [`tied`].
pub fn one_based(lists: &[Vec<Vec<usize>>]) -> Vec<Vec<Vec<usize>>> {
    lists
        .iter()
        .map(|groups| {
            groups
                .iter()
                .map(|group| group.iter().map(|a| a + 1).collect())
                .collect()
        })
        .collect()
}

/// Remove pairs not marked acceptable; `accept[m * n + w]`, 0-based.
pub fn restrict(
    men: &[Vec<Vec<usize>>],
    women: &[Vec<Vec<usize>>],
    accept: &[bool],
) -> (Vec<Vec<Vec<usize>>>, Vec<Vec<Vec<usize>>>) {
    let n = men.len();
    let keep = |lists: &[Vec<Vec<usize>>], ok: &dyn Fn(usize, usize) -> bool| {
        lists
            .iter()
            .enumerate()
            .map(|(owner, groups)| {
                groups
                    .iter()
                    .map(|group| group.iter().copied().filter(|&a| ok(owner, a)).collect::<Vec<_>>())
                    .filter(|group: &Vec<usize>| !group.is_empty())
                    .collect()
            })
            .collect::<Vec<Vec<Vec<usize>>>>()
    };
    (
        keep(men, &|m: usize, w: usize| accept[m * n + w]),
        keep(women, &|w: usize, m: usize| accept[m * n + w]),
    )
}
