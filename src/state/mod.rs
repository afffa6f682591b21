// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable state shared by the workers of one run.
//!
//! - ContributionTable: signed inclusion-exclusion counts per (cardinality, extra reactions)
//! - Statistics: search counters

pub mod statistics;
pub mod table;

pub use statistics::{Counters, Statistics};
pub use table::ContributionTable;
