// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Probability of failure of metabolic networks from minimal cut sets.
//!
//! Given the minimal cut sets (MCSs) of a network with `R` reactions, the
//! crate computes `F(d)`: the probability that deleting `d` reactions chosen
//! uniformly at random disables the network, i.e. hits at least one MCS.
//! Only MCSs up to a cardinality bound are needed for `F(d)` with `d` up to
//! that bound.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: Input (Immutable)
//!
//! Prepared once and read by every worker:
//! - [`sets::McsCollection`] - MCSs sorted by cardinality, essential reactions split off
//! - [`context::Compression`] - multiplicities when the network was compressed
//!
//! ## Tier 2: Shared State (Concurrent)
//!
//! Written by all workers during the search:
//! - [`state::ContributionTable`] - signed counts per `(cardinality, kept reactions)`
//! - [`memo::CombinationCache`] - expansions of compressed multiplicity vectors
//! - [`state::Statistics`] - search counters
//!
//! # Search Algorithm
//!
//! 1. Essential reactions go straight into the cardinality-1 row
//! 2. Every remaining MCS within the bound seeds an inclusion-exclusion
//!    recursion over the MCSs before it ([`engine::Enumerator`])
//! 3. [`scoring::Scorer`] turns the table into `F(d)`, weighted rows and a
//!    polynomial in the per-reaction failure probability
//!
//! # Parallelization
//!
//! Seeds are independent and run on a rayon pool ([`engine::SearchEngine`]).
//! Table cells are atomics, so results do not depend on the thread count.
//!
//! # Example
//!
//! ```
//! use mcs_pof::input::parse_mcs;
//! use mcs_pof::{SearchConfig, SearchContext, Scorer};
//! use mcs_pof::sets::McsCollection;
//!
//! let sets = parse_mcs("10000\n01000\n00100\n".as_bytes()).unwrap();
//! let ctx = SearchContext::new(McsCollection::new(sets).unwrap(), &SearchConfig::new());
//! mcs_pof::engine::run(&ctx).unwrap();
//!
//! let scorer = Scorer::new(&ctx.table);
//! assert!((scorer.score(1) - 0.6).abs() < 1e-12);
//! assert!((scorer.score(2) - 0.9).abs() < 1e-12);
//! ```

pub mod context;
pub mod engine;
pub mod errors;
pub mod input;
pub mod memo;
pub mod report;
pub mod scoring;
pub mod sets;
pub mod state;

// Re-export commonly used types
pub use context::{SearchConfig, SearchContext};
pub use engine::SearchEngine;
pub use errors::{PofError, Result};
pub use scoring::Scorer;
pub use sets::{McsCollection, ReactionSet};
