// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Turning a contribution table into failure probabilities.
//!
//! `F(d)` is the probability that deleting `d` reactions, drawn uniformly
//! without replacement from `R`, hits at least one minimal cut set. Each table
//! cell `(mj, a)` counts signed events "these `mj` reactions are deleted and
//! these `a` are not"; the probability of one such event is [`score_term`].

pub mod polynomial;
pub mod weights;

pub use polynomial::{extrapolate_to_full_space, Polynomial, MAX_DEGREE};
pub use weights::{binomial, check_probability, Weighting};

use crate::state::ContributionTable;

/// Probability that a uniformly random `d`-subset of `universe` reactions
/// contains `mj` given reactions and avoids `a` other given reactions.
///
/// Equals `C(R - a - mj, d - mj) / C(R, d)`, computed as a product of ratios
/// so that it never overflows.
pub fn score_term(universe: usize, a: usize, mj: usize, d: usize) -> f64 {
    if mj > d || d + a > universe {
        return 0.0;
    }
    let mut deleted = 1.0;
    for k in 0..mj {
        deleted *= (d - k) as f64 / (universe - a - k) as f64;
    }
    let mut kept = 1.0;
    for i in 0..a {
        kept *= (universe - d - i) as f64 / (universe - i) as f64;
    }
    deleted * kept
}

/// One line of the result report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRow {
    pub d: usize,
    pub weight: f64,
    pub score: f64,
    pub weighted: f64,
    pub accumulated: f64,
    /// Expected number of lethal `d`-deletions: `score * possible`.
    pub lethal: f64,
    /// Number of `d`-deletions: `C(R, d)`.
    pub possible: f64,
}

/// Read-only evaluation of a filled table.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    table: &'a ContributionTable,
}

impl<'a> Scorer<'a> {
    pub fn new(table: &'a ContributionTable) -> Self {
        Self { table }
    }

    pub fn universe(&self) -> usize {
        self.table.universe()
    }

    /// `F(d)`.
    ///
    /// Exact for `d` up to the table's cardinality bound.
    pub fn score(&self, d: usize) -> f64 {
        let universe = self.table.universe();
        self.table
            .nonzero()
            .map(|(mj, a, count)| count as f64 * score_term(universe, a, mj, d))
            .sum()
    }

    /// The cardinality-1 row alone: a lower bound on `F(d)` that only
    /// accounts for essential reactions.
    pub fn essential_only_score(&self, d: usize) -> f64 {
        if self.table.max_cardinality() == 0 {
            return 0.0;
        }
        let universe = self.table.universe();
        self.table
            .row(1)
            .map(|(a, count)| count as f64 * score_term(universe, a, 1, d))
            .sum()
    }

    /// `(d, F(d))` for every `d` in `1..=max_cardinality`.
    pub fn scores(&self) -> Vec<(usize, f64)> {
        (1..=self.table.max_cardinality())
            .map(|d| (d, self.score(d)))
            .collect()
    }

    /// Weighted report rows for `d` in `1..=max_cardinality`.
    pub fn rows(&self, weighting: Weighting) -> Vec<ScoreRow> {
        let universe = self.table.universe();
        let mut accumulated = 0.0;
        (1..=self.table.max_cardinality())
            .map(|d| {
                let score = self.score(d);
                let weight = weighting.weight(universe, d);
                let weighted = score * weight;
                accumulated += weighted;
                let possible = binomial(universe, d);
                ScoreRow {
                    d,
                    weight,
                    score,
                    weighted,
                    accumulated,
                    lethal: score * possible,
                    possible,
                }
            })
            .collect()
    }

    /// Probability of failure when every reaction fails independently with
    /// probability `p`, along with the polynomial it was evaluated from.
    pub fn extrapolate(&self, p: f64) -> (f64, Polynomial) {
        extrapolate_to_full_space(self.table, p)
    }
}
