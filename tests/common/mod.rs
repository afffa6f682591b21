// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.
//!
//! The reference here enumerates every `d`-subset of a small universe, so it is
//! only usable for universes of a dozen or so reactions.

#![allow(dead_code)]

use mcs_pof::{engine, McsCollection, ReactionSet, SearchConfig, SearchContext};

/// Parse binary-encoded cut sets.
pub fn sets(rows: &[&str]) -> Vec<ReactionSet> {
    rows.iter()
        .map(|r| ReactionSet::from_bit_str(r).unwrap())
        .collect()
}

/// Drop duplicates and supersets, then sort by ascending cardinality.
pub fn minimize(universe: usize, family: Vec<Vec<usize>>) -> Vec<ReactionSet> {
    let mut family: Vec<ReactionSet> = family
        .into_iter()
        .map(|s| ReactionSet::from_indices(universe, s).unwrap())
        .collect();
    family.sort_by_key(|s| (s.cardinality(), s.indices().to_vec()));
    family.dedup();
    let mut minimal: Vec<ReactionSet> = Vec::new();
    for set in family {
        let dominated = minimal
            .iter()
            .any(|m| m.indices().iter().all(|&r| set.contains(r)));
        if !dominated {
            minimal.push(set);
        }
    }
    minimal
}

/// Run a search over an uncompressed collection.
pub fn search(sets: Vec<ReactionSet>, config: &SearchConfig) -> SearchContext {
    let ctx = SearchContext::new(McsCollection::new(sets).unwrap(), config);
    engine::run(&ctx).unwrap();
    ctx
}

/// Run a search over a compressed collection.
pub fn search_compressed(
    sets: Vec<ReactionSet>,
    multiplicities: &[u32],
    config: &SearchConfig,
) -> SearchContext {
    let ctx =
        SearchContext::compressed(McsCollection::new(sets).unwrap(), multiplicities, config)
            .unwrap();
    engine::run(&ctx).unwrap();
    ctx
}

fn subsets_of_size(universe: usize, d: usize) -> impl Iterator<Item = u64> {
    (0u64..1 << universe).filter(move |mask| mask.count_ones() as usize == d)
}

fn mask(set: &ReactionSet) -> u64 {
    set.indices().iter().fold(0, |m, &r| m | 1 << r)
}

/// Exact fraction of `d`-subsets of the universe that contain some cut set.
pub fn brute_force(sets: &[ReactionSet], d: usize) -> f64 {
    let universe = sets[0].universe();
    let masks: Vec<u64> = sets.iter().map(mask).collect();
    let mut total = 0u64;
    let mut lethal = 0u64;
    for deleted in subsets_of_size(universe, d) {
        total += 1;
        if masks.iter().any(|&m| deleted & m == m) {
            lethal += 1;
        }
    }
    lethal as f64 / total as f64
}

/// Exact fraction for a compressed network.
///
/// Compressed reaction `i` stands for a block of `multiplicities[i]`
/// consecutive original reactions; it is deleted when any of them is. Original
/// reactions beyond the blocks (up to `universe`) belong to no cut set.
pub fn brute_force_compressed(
    sets: &[ReactionSet],
    multiplicities: &[u32],
    universe: usize,
    d: usize,
) -> f64 {
    let mut blocks = Vec::new();
    let mut offset = 0;
    for &m in multiplicities {
        blocks.push(((1u64 << m) - 1) << offset);
        offset += m as usize;
    }
    assert!(offset <= universe);

    let mut total = 0u64;
    let mut lethal = 0u64;
    for deleted in subsets_of_size(universe, d) {
        total += 1;
        let hit = sets.iter().any(|set| {
            set.indices()
                .iter()
                .all(|&position| deleted & blocks[position] != 0)
        });
        if hit {
            lethal += 1;
        }
    }
    lethal as f64 / total as f64
}

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{}: got {}, expected {}",
        what,
        actual,
        expected
    );
}
