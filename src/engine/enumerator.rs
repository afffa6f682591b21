// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Recursive enumeration of overlapping minimal cut sets.
//!
//! The probability that a random deletion set contains at least one MCS is
//! split by the first MCS it contains: seed `i` accounts for deletion sets that
//! contain `M_i` but none of `M_0 .. M_{i-1}`. Each earlier `M_j` is compared
//! with the current union `U`:
//!
//! - `M_j ⊆ U`: the frame's event is empty, abandon it.
//! - `M_j \ U = {x}`: avoiding `M_j` means `x` is never deleted; pin `x`.
//! - `|M_j \ U| >= 2`: inclusion-exclusion. Subtract the frame for `U ∪ M_j`,
//!   which in turn only needs to avoid the cut sets before `j`.
//!
//! Each frame contributes one signed term: "`U` deleted, pinned and essential
//! reactions kept". Depth `k` (the number of cut sets in `U`) carries sign
//! `(-1)^(k-1)`.
//!
//! For compressed networks a compressed reaction counts as deleted when at
//! least one of its original reactions is. Expanding that by inclusion-exclusion
//! per compressed reaction multiplies the depth sign by `(-1)^(c_i - 1)` for
//! each choice `c_i` of original reactions, giving sign `(-1)^(J - 1)` with
//! `J = depth + Σc_i - |U|`.

use crate::context::{Compression, SearchContext};
use crate::memo::{CombinationCache, Resolution};
use crate::sets::{Extra, ReactionSet};
use crate::state::{ContributionTable, Counters, Statistics};
use tracing::error;

/// Sign of an inclusion-exclusion term over `depth` cut sets.
#[inline]
pub fn depth_sign(depth: usize) -> i64 {
    if depth % 2 == 1 {
        1
    } else {
        -1
    }
}

/// Sign of one resolved term of a compressed union.
///
/// `resolved` original reactions were chosen across `compressed` compressed
/// reactions; `resolved >= compressed` always holds.
#[inline]
pub fn compressed_sign(depth: usize, resolved: usize, compressed: usize) -> i64 {
    depth_sign(depth + resolved - compressed)
}

/// Read-only view of a run that workers recurse over.
#[derive(Debug, Clone, Copy)]
pub struct Enumerator<'a> {
    mcs: &'a [ReactionSet],
    compression: Option<&'a Compression>,
    max_cardinality: usize,
    essential_count: usize,
    reduced_universe: usize,
    table: &'a ContributionTable,
    cache: &'a CombinationCache,
    statistics: &'a Statistics,
}

impl<'a> Enumerator<'a> {
    pub fn new(ctx: &'a SearchContext) -> Self {
        Self {
            mcs: ctx.collection.reduced(),
            compression: ctx.compression.as_ref(),
            max_cardinality: ctx.max_cardinality,
            essential_count: ctx.essential_count(),
            reduced_universe: ctx.collection.reduced_universe(),
            table: &ctx.table,
            cache: &ctx.cache,
            statistics: &ctx.statistics,
        }
    }

    /// Run the whole subtree rooted at cut set `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is out of range.
    pub fn run_seed(&self, seed: usize) {
        let start = &self.mcs[seed];
        debug_assert!(start.cardinality() <= self.max_cardinality);
        self.enumerate(seed, start, 1, ReactionSet::empty(self.reduced_universe));
    }

    fn enumerate(&self, seed: usize, union: &ReactionSet, depth: usize, mut pinned: ReactionSet) {
        self.statistics.increment(Counters::Frames);
        let cardinality = union.cardinality();
        // smallest extra count that can no longer fit under the bound
        let cap = self.max_cardinality - cardinality + 1;

        let mut candidates = Vec::new();
        for (index, other) in self.mcs[..seed].iter().enumerate() {
            if other.overlaps(&pinned) {
                continue;
            }
            match union.probe_extra_capped(other, cap) {
                Extra::Zero => {
                    self.statistics.increment(Counters::SubsetAborts);
                    return;
                }
                Extra::One(reaction) => {
                    pinned.insert(reaction);
                    self.statistics.increment(Counters::PlusOneReactions);
                }
                Extra::Many(count) if cardinality + count > self.max_cardinality => {
                    self.statistics.increment(Counters::CardinalityPrunes);
                }
                Extra::Many(_) => candidates.push(index),
            }
        }

        let extra = self.extra_count(&pinned);

        if cardinality < self.max_cardinality {
            for index in candidates {
                let other = &self.mcs[index];
                // pinned may have grown after this candidate was classified
                if other.overlaps(&pinned) {
                    continue;
                }
                let extended = union.union(other);
                if extended.cardinality() <= self.max_cardinality {
                    self.enumerate(index, &extended, depth + 1, pinned.clone());
                } else {
                    self.statistics.increment(Counters::CardinalityPrunes);
                }
            }
        }

        self.contribute(union, depth, extra);
    }

    /// Original reactions that must survive: pinned plus essential.
    fn extra_count(&self, pinned: &ReactionSet) -> usize {
        match self.compression {
            Some(compression) => {
                pinned
                    .indices()
                    .iter()
                    .map(|&r| compression.multiplicity(r) as usize)
                    .sum::<usize>()
                    + self.essential_count
            }
            None => pinned.cardinality() + self.essential_count,
        }
    }

    fn contribute(&self, union: &ReactionSet, depth: usize, extra: usize) {
        let Some(compression) = self.compression else {
            self.table.add(union.cardinality(), extra, depth_sign(depth));
            self.statistics.increment(Counters::Contributions);
            return;
        };

        let mut multiplicities: Vec<u32> = union
            .indices()
            .iter()
            .map(|&r| compression.multiplicity(r))
            .collect();
        multiplicities.sort_unstable();
        let resolution = self.cache.resolve(&multiplicities);

        let terms = signed_terms(&resolution, depth, union.cardinality(), self.max_cardinality);
        for (resolved, count) in terms {
            self.table.add(resolved, extra, count);
            self.statistics.increment(Counters::Contributions);
        }
    }
}

/// Sum the signed counts of a resolved compressed union per cardinality, up to
/// `max_cardinality`. Zero sums are dropped.
///
/// Sums are exact in `i128`. A sum outside `i64` means the network is too large
/// for the table; it is clamped and reported.
pub fn signed_terms(
    resolution: &Resolution,
    depth: usize,
    compressed: usize,
    max_cardinality: usize,
) -> Vec<(usize, i64)> {
    let mut by_cardinality = vec![0i128; max_cardinality + 1];
    for (resolved, raw) in resolution.iter() {
        if resolved > max_cardinality {
            continue;
        }
        by_cardinality[resolved] +=
            i128::from(compressed_sign(depth, resolved, compressed)) * i128::from(raw);
    }
    by_cardinality
        .into_iter()
        .enumerate()
        .filter(|&(_, sum)| sum != 0)
        .map(|(resolved, sum)| {
            let count = i64::try_from(sum).unwrap_or_else(|_| {
                error!(
                    "Contribution {} at cardinality {} does not fit the table; clamping",
                    sum, resolved
                );
                if sum < 0 {
                    i64::MIN
                } else {
                    i64::MAX
                }
            });
            (resolved, count)
        })
        .collect()
}
