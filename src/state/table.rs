// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The contribution table filled by the search.
//!
//! Cell `(mj, a)` holds the signed number of inclusion-exclusion terms whose
//! event is "a fixed set of `mj` reactions is deleted and a fixed, disjoint set
//! of `a` reactions is not". Rows cover `mj` in `1..=max_cardinality`,
//! columns cover `a` in `0..universe`.
//!
//! Cells are atomics so that workers accumulate without a lock. Signed
//! addition commutes, so the final table does not depend on the interleaving.

use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug)]
pub struct ContributionTable {
    max_cardinality: usize,
    universe: usize,
    cells: Vec<AtomicI64>,
}

impl ContributionTable {
    /// Create a zeroed table for cardinalities `1..=max_cardinality` and
    /// `a` in `0..universe`.
    pub fn new(max_cardinality: usize, universe: usize) -> Self {
        let cells = (0..max_cardinality * universe)
            .map(|_| AtomicI64::new(0))
            .collect();
        Self {
            max_cardinality,
            universe,
            cells,
        }
    }

    pub fn max_cardinality(&self) -> usize {
        self.max_cardinality
    }

    /// Number of reactions in the (uncompressed) universe.
    pub fn universe(&self) -> usize {
        self.universe
    }

    #[inline]
    fn slot(&self, mj: usize, a: usize) -> usize {
        assert!(
            (1..=self.max_cardinality).contains(&mj) && a < self.universe,
            "table cell ({}, {}) out of range for {}x{}",
            mj,
            a,
            self.max_cardinality,
            self.universe
        );
        (mj - 1) * self.universe + a
    }

    /// Add `count` to cell `(mj, a)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the table.
    pub fn add(&self, mj: usize, a: usize, count: i64) {
        let slot = self.slot(mj, a);
        self.cells[slot].fetch_add(count, Ordering::Relaxed);
    }

    pub fn get(&self, mj: usize, a: usize) -> i64 {
        self.cells[self.slot(mj, a)].load(Ordering::Relaxed)
    }

    /// Record `essential` cardinality-1 cut sets.
    ///
    /// The `k`-th essential reaction contributes the event "deleted, while the
    /// `k` essential reactions before it are not", i.e. cell `(1, k)`.
    pub fn add_essential(&self, essential: usize) {
        if self.max_cardinality == 0 {
            return;
        }
        for a in 0..essential {
            self.add(1, a, 1);
        }
    }

    /// Non-zero cells as `(mj, a, count)`, by ascending `mj` then `a`.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(slot, cell)| {
            let count = cell.load(Ordering::Relaxed);
            (count != 0).then(|| (slot / self.universe + 1, slot % self.universe, count))
        })
    }

    /// Non-zero cells of a single cardinality row as `(a, count)`.
    pub fn row(&self, mj: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        let start = self.slot(mj, 0);
        self.cells[start..start + self.universe]
            .iter()
            .enumerate()
            .filter_map(|(a, cell)| {
                let count = cell.load(Ordering::Relaxed);
                (count != 0).then_some((a, count))
            })
    }
}
