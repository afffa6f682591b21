// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Memoized combinatorics.
//!
//! - CombinationCache: expansion of compressed multiplicity vectors, memoized per run
//! - choose: exact binomial coefficients

pub mod combinations;

pub use combinations::{choose, CombinationCache, Resolution};
