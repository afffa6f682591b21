// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Weights over the number of deleted reactions.

use crate::errors::{PofError, Result};
use std::fmt;

/// Accept a per-reaction failure probability in `[0, 1)`.
pub fn check_probability(p: f64) -> Result<f64> {
    if (0.0..1.0).contains(&p) {
        Ok(p)
    } else {
        Err(PofError::InvalidProbability(p))
    }
}

/// Distribution of the deletion count `d` used to weight `F(d)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weighting {
    /// `d ~ Poisson(lambda)`.
    Poisson { lambda: f64 },
    /// `d ~ Binomial(R, p)`: each reaction fails independently.
    Binomial { p: f64 },
}

impl Weighting {
    /// Weight of deleting exactly `d` of `universe` reactions.
    pub fn weight(&self, universe: usize, d: usize) -> f64 {
        match *self {
            Weighting::Poisson { lambda } => {
                if lambda <= 0.0 {
                    return if d == 0 { 1.0 } else { 0.0 };
                }
                (d as f64 * lambda.ln() - lambda - ln_factorial(d)).exp()
            }
            Weighting::Binomial { p } => {
                if d > universe {
                    return 0.0;
                }
                if p <= 0.0 {
                    return if d == 0 { 1.0 } else { 0.0 };
                }
                if p >= 1.0 {
                    return if d == universe { 1.0 } else { 0.0 };
                }
                (ln_binomial(universe, d)
                    + d as f64 * p.ln()
                    + (universe - d) as f64 * (-p).ln_1p())
                .exp()
            }
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weighting::Poisson { lambda } => write!(f, "Poisson(lambda = {})", lambda),
            Weighting::Binomial { p } => write!(f, "Binomial(p = {})", p),
        }
    }
}

fn ln_factorial(n: usize) -> f64 {
    (2..=n).map(|k| (k as f64).ln()).sum()
}

fn ln_binomial(n: usize, k: usize) -> f64 {
    let k = k.min(n - k);
    (0..k)
        .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
        .sum()
}

/// `C(n, k)` as a float; large values lose precision rather than overflow.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}
