// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Expansion of compressed cut sets into original-space selections.
//!
//! A compressed reaction with multiplicity `m` stands for `m` original
//! reactions; deleting it means deleting at least one of them. A compressed cut
//! set with multiplicities `[m_1, .., m_k]` therefore corresponds to every
//! choice vector `c` with `1 <= c_i <= m_i`: the choice selects
//! `c_1 + .. + c_k` original reactions in `C(m_1, c_1) * .. * C(m_k, c_k)`
//! distinct ways.
//!
//! The same multiplicity shapes recur constantly during a search, so the
//! expansion is memoized on the sorted multiplicity vector.

use crate::state::{Counters, Statistics};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Binomial coefficient C(n, k), exact, saturating at `u64::MAX`.
pub fn choose(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // exact: result * (n - i) is divisible by (i + 1)
        result = result * u128::from(n - i) / u128::from(i + 1);
        if result > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    result as u64
}

/// Number of choice vectors, or 0 when the product does not fit a `usize`.
fn capacity_hint(multiplicities: &[u32]) -> usize {
    multiplicities
        .iter()
        .try_fold(1usize, |rows, &m| rows.checked_mul(m as usize))
        .unwrap_or(0)
}

/// One `(cardinality, count)` pair per choice vector, in lexicographic order
/// of the choice vectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Number of original reactions selected by each choice vector.
    pub cardinalities: Vec<usize>,
    /// Number of distinct original-space selections for each choice vector.
    pub counts: Vec<u64>,
}

impl Resolution {
    /// Enumerate the full Cartesian product over `[1, m_i]`.
    pub fn compute(multiplicities: &[u32]) -> Self {
        Self::compute_bounded(multiplicities, usize::MAX)
    }

    /// Enumerate the choice vectors selecting at most `max_cardinality`
    /// original reactions, in the same order as [`Resolution::compute`].
    pub fn compute_bounded(multiplicities: &[u32], max_cardinality: usize) -> Self {
        let mut resolution = Resolution::default();
        if multiplicities.is_empty()
            || multiplicities.contains(&0)
            || multiplicities.len() > max_cardinality
        {
            return resolution;
        }
        if max_cardinality == usize::MAX {
            let rows = capacity_hint(multiplicities);
            resolution.cardinalities.reserve(rows);
            resolution.counts.reserve(rows);
        }

        let mut choice = vec![1u32; multiplicities.len()];
        let mut cardinality = choice.len();
        loop {
            if cardinality <= max_cardinality {
                let count = multiplicities
                    .iter()
                    .zip(&choice)
                    .fold(1u64, |acc, (&m, &c)| {
                        acc.saturating_mul(choose(u64::from(m), u64::from(c)))
                    });
                resolution.cardinalities.push(cardinality);
                resolution.counts.push(count);
            }

            // odometer increment, last position fastest; past the bound, every
            // later vector sharing the prefix up to the last non-one position
            // is over the bound too, so carry out of that position
            let mut position = if cardinality > max_cardinality {
                match choice.iter().rposition(|&c| c > 1) {
                    Some(last) => {
                        cardinality -= choice[last] as usize - 1;
                        choice[last] = 1;
                        last
                    }
                    None => return resolution,
                }
            } else {
                choice.len()
            };
            loop {
                if position == 0 {
                    return resolution;
                }
                position -= 1;
                if choice[position] < multiplicities[position] {
                    choice[position] += 1;
                    cardinality += 1;
                    break;
                }
                cardinality -= choice[position] as usize - 1;
                choice[position] = 1;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cardinalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cardinalities.is_empty()
    }

    /// Iterate over `(cardinality, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.cardinalities
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
    }
}

/// Memo of [`Resolution`]s keyed by sorted multiplicity vector.
///
/// Entries are bounded by the cache's cardinality bound, fixed for its lifetime.
///
/// Shared by all workers of a run. Lookups take the read lock; a miss computes
/// the resolution without holding any lock and then inserts it under the write
/// lock, keeping whichever entry got there first so readers only ever see
/// complete entries.
#[derive(Debug)]
pub struct CombinationCache {
    enabled: bool,
    max_cardinality: usize,
    entries: RwLock<FxHashMap<Vec<u32>, Arc<Resolution>>>,
    statistics: Option<Arc<Statistics>>,
}

impl CombinationCache {
    /// Create an empty cache. A disabled cache recomputes on every call.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            max_cardinality: usize::MAX,
            entries: RwLock::new(FxHashMap::default()),
            statistics: None,
        }
    }

    /// Drop choice vectors selecting more than `max_cardinality` originals.
    pub fn with_bound(mut self, max_cardinality: usize) -> Self {
        self.max_cardinality = max_cardinality;
        self
    }

    /// Report hits and misses to the given statistics.
    pub fn with_statistics(mut self, statistics: Arc<Statistics>) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of memoized multiplicity shapes.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn count(&self, counter: Counters) {
        if let Some(statistics) = &self.statistics {
            statistics.increment(counter);
        }
    }

    /// Expand a sorted multiplicity vector.
    ///
    /// Callers sort before calling so that equal shapes share one entry.
    pub fn resolve(&self, multiplicities: &[u32]) -> Arc<Resolution> {
        debug_assert!(
            multiplicities.windows(2).all(|w| w[0] <= w[1]),
            "multiplicities must be sorted before lookup: {:?}",
            multiplicities
        );
        if !self.enabled {
            self.count(Counters::CacheMisses);
            return Arc::new(self.compute(multiplicities));
        }

        if let Some(hit) = self.lookup(multiplicities) {
            self.count(Counters::CacheHits);
            return hit;
        }

        self.count(Counters::CacheMisses);
        let computed = Arc::new(self.compute(multiplicities));
        match self.entries.write() {
            Ok(mut entries) => Arc::clone(
                entries
                    .entry(multiplicities.to_vec())
                    .or_insert(computed),
            ),
            // a poisoned map still holds only complete entries; serve uncached
            Err(_) => computed,
        }
    }

    fn compute(&self, multiplicities: &[u32]) -> Resolution {
        Resolution::compute_bounded(multiplicities, self.max_cardinality)
    }

    fn lookup(&self, multiplicities: &[u32]) -> Option<Arc<Resolution>> {
        self.entries.read().ok()?.get(multiplicities).cloned()
    }
}

impl Default for CombinationCache {
    fn default() -> Self {
        Self::new(true)
    }
}
