// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Property tests against brute force on small random instances.

mod common;

use common::{
    gale_shapley, one_based, restrict, stable_matchings, strict, strict_lists, tied, tied_lists,
    RecordingObserver,
};
use proptest::prelude::*;
use tied_marriage::agents::{Agent, ManId};
use tied_marriage::{
    is_stable, Counters, Criterion, Instance, Outcome, Solver, SolverConfig, Stability,
};

type Lists = Vec<Vec<Vec<usize>>>;

/// Complete tied lists for both sides.
fn complete_instance() -> impl Strategy<Value = (Lists, Lists)> {
    (1..=4usize).prop_flat_map(|n| (tied_lists(n), tied_lists(n)))
}

/// Tied lists with some pairs unacceptable to both sides.
fn partial_instance() -> impl Strategy<Value = (Lists, Lists)> {
    (1..=4usize)
        .prop_flat_map(|n| {
            (
                tied_lists(n),
                tied_lists(n),
                prop::collection::vec(prop::bool::weighted(0.8), n * n),
            )
        })
        .prop_map(|(men, women, accept)| restrict(&men, &women, &accept))
}

fn build(men: &Lists, women: &Lists) -> common::Labelled {
    tied(&one_based(men), &one_based(women))
}

/// Solve and cross-check against every perfect matching.
fn check_against_brute_force(
    instance: &common::Labelled,
    stability: Stability,
) -> Result<(), TestCaseError> {
    let criterion = Criterion::from(stability);
    let report = Solver::new(SolverConfig::new(stability))
        .solve(instance)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let expected = stable_matchings(instance, criterion);
    match &report.outcome {
        Outcome::Stable(matching) => {
            prop_assert!(is_stable(instance, matching, criterion));
            prop_assert!(expected.contains(matching));
        }
        Outcome::NoStableMatching(reason) => {
            prop_assert!(expected.is_empty(), "missed a matching, reported {:?}", reason);
        }
    }
    let n = instance.men_count() as u64;
    prop_assert!(report.statistics.get(Counters::PairsDeleted) <= n * n);
    Ok(())
}

proptest! {
    #[test]
    fn strict_preferences_agree_with_gale_shapley(
        (men, women) in (1..=6usize).prop_flat_map(|n| (strict_lists(n), strict_lists(n)))
    ) {
        let expected = gale_shapley(&men, &women);
        let shift = |lists: &[Vec<usize>]| -> Vec<Vec<usize>> {
            lists.iter().map(|l| l.iter().map(|a| a + 1).collect()).collect()
        };
        let instance = strict(&shift(&men), &shift(&women));

        for config in [SolverConfig::super_stable(), SolverConfig::strong()] {
            let report = Solver::new(config).solve(&instance).unwrap();
            let matching = report.outcome.into_matching().expect("strict instances are solvable");
            let assignment: Vec<usize> = matching.assignment().iter().map(|m| m.index()).collect();
            prop_assert_eq!(&assignment, &expected);
        }
    }

    #[test]
    fn super_stability_is_sound_and_complete((men, women) in complete_instance()) {
        check_against_brute_force(&build(&men, &women), Stability::Super)?;
    }

    #[test]
    fn super_stability_with_unacceptable_pairs((men, women) in partial_instance()) {
        check_against_brute_force(&build(&men, &women), Stability::Super)?;
    }

    #[test]
    fn strong_stability_is_sound_and_complete((men, women) in complete_instance()) {
        check_against_brute_force(&build(&men, &women), Stability::Strong)?;
    }

    #[test]
    fn live_lists_never_grow((men, women) in complete_instance(), strong in any::<bool>()) {
        let instance = build(&men, &women);
        let config = if strong { SolverConfig::strong() } else { SolverConfig::super_stable() };
        let mut observer = RecordingObserver::default();
        let report = Solver::new(config).solve_observed(&instance, &mut observer).unwrap();

        prop_assert_eq!(observer.lengths.len(), report.rounds);
        for window in observer.lengths.windows(2) {
            for (before, after) in window[0].iter().zip(&window[1]) {
                prop_assert!(after <= before);
            }
        }
        // Every round but the last deletes something.
        for window in observer.lengths.windows(2) {
            prop_assert!(window[1].iter().sum::<usize>() < window[0].iter().sum::<usize>());
        }
    }

    #[test]
    fn strong_rounds_stay_within_default_limit((men, women) in complete_instance()) {
        let instance = build(&men, &women);
        let n = instance.men_count();
        let report = Solver::new(SolverConfig::strong()).solve(&instance).unwrap();
        prop_assert!(report.rounds <= (n * n).max(1));
    }
}

#[test]
fn resolvers_are_idempotent_on_a_perfect_relation() {
    // Each man's top group is a single woman nobody else wants first.
    let instance: Instance<usize, usize> = Instance::new(
        (0..3).map(|m| (m, vec![vec![m], (0..3).filter(|&w| w != m).collect()])),
        (0..3).map(|w| (w, vec![(0..3).collect()])),
    )
    .unwrap();
    for config in [SolverConfig::super_stable(), SolverConfig::strong()] {
        let report = Solver::new(config).solve(&instance).unwrap();
        assert_eq!(report.statistics.get(Counters::PairsDeleted), 0);
        assert_eq!(report.statistics.get(Counters::WomenReset), 0);
        let matching = report.outcome.into_matching().unwrap();
        assert_eq!(
            matching.assignment(),
            &[ManId::new(0), ManId::new(1), ManId::new(2)]
        );
        assert_eq!(matching.woman_of(&2), Some(&2));
    }
}
