// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for preparing and running a failure-probability search.
//!
//! Every variant is a violated precondition on data handed to the library. None
//! of them can be fixed by retrying; callers report them and stop.

use thiserror::Error;

/// Errors raised while validating input or setting up a run.
#[derive(Debug, Error)]
pub enum PofError {
    /// The MCS collection has no members.
    #[error("MCS collection is empty")]
    EmptyCollection,

    /// Cut sets must be sorted by ascending cardinality.
    #[error("MCS {index} has cardinality {found}, smaller than the previous MCS ({previous})")]
    UnsortedCollection {
        index: usize,
        previous: usize,
        found: usize,
    },

    /// All cut sets must be defined over the same number of reactions.
    #[error("MCS {index} is defined over {found} reactions, expected {expected}")]
    UniverseMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A reaction index does not fit the declared universe.
    #[error("reaction index {index} out of range for {universe} reactions")]
    IndexOutOfRange { index: usize, universe: usize },

    /// A cut set contains no reactions.
    #[error("MCS {index} contains no reactions")]
    EmptyCutset { index: usize },

    /// A cut set of cardinality >= 2 contains an essential reaction, so it is
    /// not minimal.
    #[error("MCS {index} contains an essential reaction and is not minimal")]
    NonMinimal { index: usize },

    /// One multiplicity per compressed reaction is required.
    #[error("expected {expected} compression multiplicities, found {found}")]
    MultiplicityLength { expected: usize, found: usize },

    /// Every compressed reaction stands for at least one original reaction.
    #[error("compressed reaction {position} has multiplicity 0")]
    ZeroMultiplicity { position: usize },

    /// An explicit universe size cannot be smaller than the reactions it must hold.
    #[error("universe of {given} reactions is smaller than the {required} reactions in the input")]
    UniverseTooSmall { given: usize, required: usize },

    /// Reindexing needs its deletion list in strictly ascending order.
    #[error("deletion list is not strictly ascending at position {position}")]
    UnsortedDeletions { position: usize },

    /// A probability parameter outside its admissible range.
    #[error("probability {0} must lie in [0, 1)")]
    InvalidProbability(f64),

    /// Malformed line in an input file.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, PofError>;
