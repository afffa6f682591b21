// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Randomized comparison against exhaustive enumeration.

mod common;

use common::{brute_force, brute_force_compressed, minimize, search, search_compressed};
use mcs_pof::{ReactionSet, Scorer, SearchConfig};
use proptest::prelude::*;

/// A universe size and a minimal, sorted family of cut sets over it.
fn arb_family() -> impl Strategy<Value = (usize, Vec<ReactionSet>)> {
    (2usize..=8).prop_flat_map(|universe| {
        prop::collection::vec(
            prop::collection::btree_set(0..universe, 1..=universe.min(4)),
            1..7,
        )
        .prop_map(move |family| {
            let family: Vec<Vec<usize>> = family.into_iter().map(|s| s.into_iter().collect()).collect();
            (universe, minimize(universe, family))
        })
    })
}

fn arb_compressed() -> impl Strategy<Value = (Vec<ReactionSet>, Vec<u32>)> {
    (2usize..=5).prop_flat_map(|universe| {
        (
            prop::collection::vec(
                prop::collection::btree_set(0..universe, 1..=universe.min(3)),
                1..5,
            ),
            prop::collection::vec(1u32..=3, universe),
        )
            .prop_map(move |(family, multiplicities)| {
                let family: Vec<Vec<usize>> = family.into_iter().map(|s| s.into_iter().collect()).collect();
                (minimize(universe, family), multiplicities)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_scores_match_brute_force((universe, family) in arb_family()) {
        let ctx = search(family.clone(), &SearchConfig::new());
        let scorer = Scorer::new(&ctx.table);
        for d in 1..=universe {
            let expected = brute_force(&family, d);
            prop_assert!((scorer.score(d) - expected).abs() < 1e-9,
                "d = {}: got {}, expected {}", d, scorer.score(d), expected);
        }
    }

    #[test]
    fn prop_bounded_scores_are_exact((universe, family) in arb_family(), bound in 1usize..4) {
        let ctx = search(family.clone(), &SearchConfig::new().with_max_cardinality(bound));
        let scorer = Scorer::new(&ctx.table);
        for d in 1..=bound.min(universe) {
            let expected = brute_force(&family, d);
            prop_assert!((scorer.score(d) - expected).abs() < 1e-9,
                "d = {}: got {}, expected {}", d, scorer.score(d), expected);
        }
    }

    #[test]
    fn prop_compressed_scores_match_brute_force((family, multiplicities) in arb_compressed()) {
        let universe: usize = multiplicities.iter().map(|&m| m as usize).sum();
        let ctx = search_compressed(family.clone(), &multiplicities, &SearchConfig::new());
        let scorer = Scorer::new(&ctx.table);
        for d in 1..=universe {
            let expected = brute_force_compressed(&family, &multiplicities, universe, d);
            prop_assert!((scorer.score(d) - expected).abs() < 1e-9,
                "d = {}: got {}, expected {}", d, scorer.score(d), expected);
        }
    }
}
