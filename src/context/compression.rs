// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compression of the reaction universe.
//!
//! Before cut sets were computed, linear chains of reactions may have been
//! merged into single compressed reactions. The multiplicity of a compressed
//! reaction is the number of original reactions merged into it.

use crate::errors::{PofError, Result};
use crate::sets::McsCollection;

/// Multiplicities of the reduced universe, plus the uncompressed totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compression {
    /// Multiplicity of each reduced position (essential reactions removed).
    reduced: Vec<u32>,

    /// Original reactions merged into essential compressed reactions.
    essential_count: usize,

    /// Reactions in the uncompressed network.
    full_universe: usize,
}

impl Compression {
    /// Validate `multiplicities` against the collection and reduce it.
    ///
    /// # Errors
    ///
    /// - [`PofError::MultiplicityLength`] unless there is one entry per reaction
    ///   of the collection's input universe
    /// - [`PofError::ZeroMultiplicity`] for a zero entry
    /// - [`PofError::UniverseTooSmall`] if `universe` is below the multiplicity sum
    pub fn new(
        collection: &McsCollection,
        multiplicities: &[u32],
        universe: Option<usize>,
    ) -> Result<Self> {
        if multiplicities.len() != collection.universe() {
            return Err(PofError::MultiplicityLength {
                expected: collection.universe(),
                found: multiplicities.len(),
            });
        }
        if let Some(position) = multiplicities.iter().position(|&m| m == 0) {
            return Err(PofError::ZeroMultiplicity { position });
        }

        let total: usize = multiplicities.iter().map(|&m| m as usize).sum();
        let full_universe = match universe {
            Some(given) if given < total => {
                return Err(PofError::UniverseTooSmall {
                    given,
                    required: total,
                })
            }
            Some(given) => given,
            None => total,
        };

        let essential = collection.essential();
        let essential_count = essential
            .iter()
            .map(|&r| multiplicities[r] as usize)
            .sum();
        let reduced = multiplicities
            .iter()
            .enumerate()
            .filter(|(r, _)| essential.binary_search(r).is_err())
            .map(|(_, &m)| m)
            .collect();

        Ok(Self {
            reduced,
            essential_count,
            full_universe,
        })
    }

    /// Multiplicity of a reduced position.
    #[inline]
    pub fn multiplicity(&self, position: usize) -> u32 {
        self.reduced[position]
    }

    /// Multiplicities of the reduced universe.
    pub fn reduced(&self) -> &[u32] {
        &self.reduced
    }

    /// Number of original reactions that are essential.
    pub fn essential_count(&self) -> usize {
        self.essential_count
    }

    pub fn full_universe(&self) -> usize {
        self.full_universe
    }
}
