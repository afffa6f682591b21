// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Extrapolation from fixed deletion counts to independent failures.
//!
//! If every reaction fails independently with probability `p`, the event
//! "`mj` given reactions fail and `a` others do not" has probability
//! `p^mj (1 - p)^a`. Expanding `(1 - p)^a` binomially turns the table into a
//! polynomial in `p`.

use crate::state::ContributionTable;
use std::fmt;

/// Highest power of `p` retained.
pub const MAX_DEGREE: usize = 100;

/// Polynomial in `p` with `f64` coefficients, lowest degree first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Trailing zero coefficients are dropped.
    pub fn new(mut coefficients: Vec<f64>) -> Self {
        while coefficients.last() == Some(&0.0) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree of the highest non-zero term; 0 for the zero polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn evaluate(&self, p: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * p + c)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (power, &c) in self.coefficients.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
                first = false;
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            match power {
                0 => write!(f, "{}", c.abs())?,
                1 => write!(f, "{}*p", c.abs())?,
                _ => write!(f, "{}*p^{}", c.abs(), power)?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Expand every cell `(mj, a, count)` into
/// `count * p^mj * Σ_k C(a, k) (-p)^k`, dropping powers above [`MAX_DEGREE`],
/// and evaluate the sum at `p`.
pub fn extrapolate_to_full_space(table: &ContributionTable, p: f64) -> (f64, Polynomial) {
    let mut coefficients = vec![0.0; MAX_DEGREE + 1];
    for (mj, a, count) in table.nonzero() {
        let count = count as f64;
        let mut binomial = 1.0;
        for k in 0..=a {
            let power = mj + k;
            if power > MAX_DEGREE {
                break;
            }
            if k > 0 {
                binomial = binomial * (a - k + 1) as f64 / k as f64;
            }
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            coefficients[power] += sign * binomial * count;
        }
    }
    let polynomial = Polynomial::new(coefficients);
    (polynomial.evaluate(p), polynomial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essential_only_is_linear() {
        let table = ContributionTable::new(1, 4);
        table.add(1, 0, 3);
        let (value, polynomial) = extrapolate_to_full_space(&table, 0.01);
        assert_eq!(polynomial.coefficients(), &[0.0, 3.0]);
        assert!((value - 0.03).abs() < 1e-15);
        assert_eq!(polynomial.to_string(), "3*p");
    }

    #[test]
    fn test_kept_reactions_expand_binomially() {
        // p (1 - p)^2 = p - 2p^2 + p^3
        let table = ContributionTable::new(1, 4);
        table.add(1, 2, 1);
        let (_, polynomial) = extrapolate_to_full_space(&table, 0.5);
        assert_eq!(polynomial.coefficients(), &[0.0, 1.0, -2.0, 1.0]);
        assert_eq!(polynomial.to_string(), "1*p - 2*p^2 + 1*p^3");
    }

    #[test]
    fn test_matches_independent_failure_probability() {
        // three essential reactions: 1 - (1 - p)^3
        let table = ContributionTable::new(2, 5);
        table.add_essential(3);
        let p = 0.1;
        let (value, _) = extrapolate_to_full_space(&table, p);
        assert!((value - (1.0 - (1.0 - p).powi(3))).abs() < 1e-12);
    }

    #[test]
    fn test_degree_is_capped() {
        let table = ContributionTable::new(1, 200);
        table.add(1, 150, 1);
        let (_, polynomial) = extrapolate_to_full_space(&table, 0.0);
        assert_eq!(polynomial.degree(), MAX_DEGREE);
    }

    #[test]
    fn test_zero_polynomial() {
        let polynomial = Polynomial::new(vec![0.0, 0.0]);
        assert_eq!(polynomial.degree(), 0);
        assert_eq!(polynomial.evaluate(0.3), 0.0);
        assert_eq!(polynomial.to_string(), "0");
    }
}
