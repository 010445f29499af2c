// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Validated problem instances.
//!
//! An [`Instance`] maps caller-supplied labels to dense [`ManId`] and
//! [`WomanId`] indices (input order) and keeps the original tied-group
//! preference lists. All validation happens here, so the algorithm itself
//! never sees an unknown agent or a one-sided acceptable pair.

use crate::agents::{self, Agent, ManId, WomanId};
use crate::error::{InputError, MatchingResult};
use crate::memo::RankTable;
use crate::outcome::Matching;
use crate::state::PreferenceStore;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Two sides of labelled agents with tied-group preference lists.
#[derive(Debug, Clone)]
pub struct Instance<M, W> {
    men: Vec<M>,
    women: Vec<W>,
    man_index: HashMap<M, ManId>,
    woman_index: HashMap<W, WomanId>,
    men_groups: Vec<Vec<Vec<WomanId>>>,
    women_groups: Vec<Vec<Vec<ManId>>>,
}

impl<M, W> Instance<M, W>
where
    M: Clone + Eq + Hash + Debug,
    W: Clone + Eq + Hash + Debug,
{
    /// Build an instance from `(agent, tied groups)` entries for each side.
    ///
    /// Entry order fixes the dense indices, and with them the order in
    /// which free men propose.
    ///
    /// # Errors
    ///
    /// [`InputError`] if a label is duplicated, a list names an unknown
    /// agent or repeats one, a tied group is empty, or acceptability is
    /// not mutual.
    ///
    /// # Example
    ///
    /// ```
    /// use tied_marriage::Instance;
    ///
    /// let instance = Instance::new(
    ///     vec![("adam", vec![vec!["eve", "lilith"]])],
    ///     vec![("eve", vec![vec!["adam"]]), ("lilith", vec![vec!["adam"]])],
    /// )
    /// .unwrap();
    /// assert_eq!(instance.men_count(), 1);
    /// assert!(!instance.is_balanced());
    /// ```
    pub fn new<IM, IW>(men: IM, women: IW) -> MatchingResult<Self>
    where
        IM: IntoIterator<Item = (M, Vec<Vec<W>>)>,
        IW: IntoIterator<Item = (W, Vec<Vec<M>>)>,
    {
        let (men, men_lists): (Vec<M>, Vec<Vec<Vec<W>>>) = men.into_iter().unzip();
        let (women, women_lists): (Vec<W>, Vec<Vec<Vec<M>>>) = women.into_iter().unzip();

        let man_index: HashMap<M, ManId> = index_labels(&men, "man")?;
        let woman_index: HashMap<W, WomanId> = index_labels(&women, "woman")?;

        let men_groups = men
            .iter()
            .zip(&men_lists)
            .map(|(owner, groups)| resolve_groups(owner, groups, &woman_index))
            .collect::<Result<Vec<_>, _>>()?;
        let women_groups = women
            .iter()
            .zip(&women_lists)
            .map(|(owner, groups)| resolve_groups(owner, groups, &man_index))
            .collect::<Result<Vec<_>, _>>()?;

        let instance = Self {
            men,
            women,
            man_index,
            woman_index,
            men_groups,
            women_groups,
        };
        instance.check_mutual_acceptability()?;
        Ok(instance)
    }

    fn check_mutual_acceptability(&self) -> Result<(), InputError> {
        let men_ranks: RankTable<ManId, WomanId> =
            RankTable::from_groups(&self.men_groups, self.women.len());
        let women_ranks: RankTable<WomanId, ManId> =
            RankTable::from_groups(&self.women_groups, self.men.len());

        for man in agents::men(self.men.len()) {
            for woman in self.men_groups[man.index()].iter().flatten() {
                if women_ranks.rank(*woman, man).is_none() {
                    return Err(InputError::AsymmetricAcceptability {
                        owner: format!("{:?}", self.man(man)),
                        other: format!("{:?}", self.woman(*woman)),
                    });
                }
            }
        }
        for woman in agents::women(self.women.len()) {
            for man in self.women_groups[woman.index()].iter().flatten() {
                if men_ranks.rank(*man, woman).is_none() {
                    return Err(InputError::AsymmetricAcceptability {
                        owner: format!("{:?}", self.woman(woman)),
                        other: format!("{:?}", self.man(*man)),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn men(&self) -> &[M] {
        &self.men
    }

    pub fn women(&self) -> &[W] {
        &self.women
    }

    pub fn men_count(&self) -> usize {
        self.men.len()
    }

    pub fn women_count(&self) -> usize {
        self.women.len()
    }

    /// Both sides have the same number of agents.
    pub fn is_balanced(&self) -> bool {
        self.men.len() == self.women.len()
    }

    pub fn man(&self, id: ManId) -> &M {
        &self.men[id.index()]
    }

    pub fn woman(&self, id: WomanId) -> &W {
        &self.women[id.index()]
    }

    pub fn man_id(&self, label: &M) -> Option<ManId> {
        self.man_index.get(label).copied()
    }

    pub fn woman_id(&self, label: &W) -> Option<WomanId> {
        self.woman_index.get(label).copied()
    }

    /// Original tied groups of a man.
    pub fn man_groups(&self, id: ManId) -> &[Vec<WomanId>] {
        &self.men_groups[id.index()]
    }

    /// Original tied groups of a woman.
    pub fn woman_groups(&self, id: WomanId) -> &[Vec<ManId>] {
        &self.women_groups[id.index()]
    }

    /// Fresh mutable lists and rank tables for one run.
    pub fn preference_store(&self) -> PreferenceStore {
        PreferenceStore::new(self.men_groups.clone(), self.women_groups.clone())
    }

    /// Label a woman-indexed assignment.
    pub(crate) fn label_assignment(&self, assignment: Vec<ManId>) -> Matching<M, W> {
        let pairs = assignment
            .iter()
            .enumerate()
            .map(|(w, m)| (self.women[w].clone(), self.men[m.index()].clone()))
            .collect();
        Matching::new(pairs, assignment)
    }

    /// Build a perfect matching from labelled `(woman, man)` pairs.
    ///
    /// # Errors
    ///
    /// [`InputError::InvalidMatching`] unless the pairs cover every woman
    /// and every man exactly once with known labels.
    pub fn matching<I>(&self, pairs: I) -> MatchingResult<Matching<M, W>>
    where
        I: IntoIterator<Item = (W, M)>,
    {
        if !self.is_balanced() {
            return Err(InputError::InvalidMatching("sides differ in size".into()).into());
        }
        let mut assignment: Vec<Option<ManId>> = vec![None; self.women.len()];
        let mut taken = vec![false; self.men.len()];
        for (woman, man) in pairs {
            let w = self.woman_id(&woman).ok_or_else(|| {
                InputError::InvalidMatching(format!("unknown woman {:?}", woman))
            })?;
            let m = self
                .man_id(&man)
                .ok_or_else(|| InputError::InvalidMatching(format!("unknown man {:?}", man)))?;
            if assignment[w.index()].is_some() || taken[m.index()] {
                return Err(InputError::InvalidMatching(format!(
                    "{:?} or {:?} matched twice",
                    woman, man
                ))
                .into());
            }
            assignment[w.index()] = Some(m);
            taken[m.index()] = true;
        }
        let assignment = assignment
            .into_iter()
            .enumerate()
            .map(|(w, m)| {
                m.ok_or_else(|| {
                    InputError::InvalidMatching(format!("{:?} is unmatched", self.women[w]))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.label_assignment(assignment))
    }
}

fn index_labels<L, A>(labels: &[L], side: &'static str) -> Result<HashMap<L, A>, InputError>
where
    L: Clone + Eq + Hash + Debug,
    A: Agent,
{
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.clone(), A::from_index(i)).is_some() {
            return Err(InputError::DuplicateAgent {
                side,
                agent: format!("{:?}", label),
            });
        }
    }
    Ok(index)
}

fn resolve_groups<O, L, A>(
    owner: &O,
    groups: &[Vec<L>],
    index: &HashMap<L, A>,
) -> Result<Vec<Vec<A>>, InputError>
where
    O: Debug,
    L: Eq + Hash + Debug,
    A: Agent,
{
    let mut seen = vec![false; index.len()];
    let mut resolved = Vec::with_capacity(groups.len());
    for group in groups {
        if group.is_empty() {
            return Err(InputError::EmptyGroup {
                owner: format!("{:?}", owner),
            });
        }
        let mut ids = Vec::with_capacity(group.len());
        for label in group {
            let id = *index.get(label).ok_or_else(|| InputError::UnknownAgent {
                owner: format!("{:?}", owner),
                agent: format!("{:?}", label),
            })?;
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(InputError::RepeatedPreference {
                    owner: format!("{:?}", owner),
                    agent: format!("{:?}", label),
                });
            }
            ids.push(id);
        }
        resolved.push(ids);
    }
    Ok(resolved)
}
