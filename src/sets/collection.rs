// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The ordered collection of minimal cut sets a search runs over.
//!
//! Minimal cut sets arrive sorted by ascending cardinality. Every cardinality-1
//! MCS names an essential reaction; those are split off up front because they
//! need no recursion, and the remaining cut sets are reindexed over the
//! universe with the essential reactions removed.

use crate::errors::{PofError, Result};
use crate::sets::{ReactionId, ReactionSet};
use tracing::{info, warn};

/// Minimal cut sets after essential reactions have been extracted.
#[derive(Debug, Clone)]
pub struct McsCollection {
    /// Size of the universe the input cut sets were defined over.
    universe: usize,

    /// Essential reactions, ascending, in input indices.
    essential: Vec<ReactionId>,

    /// Cut sets of cardinality >= 2, reindexed over `reduced_universe`.
    reduced: Vec<ReactionSet>,
}

impl McsCollection {
    /// Validate and reduce a sorted list of minimal cut sets.
    ///
    /// # Errors
    ///
    /// - [`PofError::EmptyCollection`] if `sets` is empty
    /// - [`PofError::EmptyCutset`] if any set has no reactions
    /// - [`PofError::UniverseMismatch`] if the sets disagree on the universe size
    /// - [`PofError::UnsortedCollection`] if cardinalities are not ascending
    /// - [`PofError::NonMinimal`] if a larger set contains an essential reaction
    pub fn new(sets: Vec<ReactionSet>) -> Result<Self> {
        let universe = sets.first().ok_or(PofError::EmptyCollection)?.universe();
        let mut previous = 0;
        for (index, set) in sets.iter().enumerate() {
            if set.universe() != universe {
                return Err(PofError::UniverseMismatch {
                    index,
                    expected: universe,
                    found: set.universe(),
                });
            }
            if set.is_empty() {
                return Err(PofError::EmptyCutset { index });
            }
            if set.cardinality() < previous {
                return Err(PofError::UnsortedCollection {
                    index,
                    previous,
                    found: set.cardinality(),
                });
            }
            previous = set.cardinality();
        }

        let split = sets
            .iter()
            .position(|s| s.cardinality() > 1)
            .unwrap_or(sets.len());
        let mut essential: Vec<ReactionId> =
            sets[..split].iter().filter_map(ReactionSet::first).collect();
        essential.sort_unstable();
        essential.dedup();

        if let Some(offset) = sets[split..].iter().position(|s| {
            s.indices()
                .iter()
                .any(|r| essential.binary_search(r).is_ok())
        }) {
            return Err(PofError::NonMinimal {
                index: split + offset,
            });
        }

        if split == sets.len() {
            warn!(
                "All {} MCSs are essential reactions; no recursion required",
                sets.len()
            );
        } else if split > 0 {
            info!(
                "Reducing MCS collection: removing {} essential reactions",
                essential.len()
            );
        }

        let reduced = sets[split..]
            .iter()
            .map(|s| s.remove_and_reindex(&essential))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            universe,
            essential,
            reduced,
        })
    }

    /// Number of reactions the input cut sets were defined over.
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Number of reactions left after removing the essential ones.
    pub fn reduced_universe(&self) -> usize {
        self.universe - self.essential.len()
    }

    /// Essential reactions (input indices, ascending).
    pub fn essential(&self) -> &[ReactionId] {
        &self.essential
    }

    pub fn essential_count(&self) -> usize {
        self.essential.len()
    }

    /// Non-essential cut sets over the reduced universe, ascending cardinality.
    pub fn reduced(&self) -> &[ReactionSet] {
        &self.reduced
    }

    /// Number of reduced cut sets with cardinality at most `max_cardinality`.
    ///
    /// These are the ones that can seed a search bounded by `max_cardinality`.
    pub fn seed_count(&self, max_cardinality: usize) -> usize {
        self.reduced
            .partition_point(|s| s.cardinality() <= max_cardinality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> ReactionSet {
        ReactionSet::from_bit_str(s).unwrap()
    }

    #[test]
    fn test_reduction_removes_essential_reactions() {
        let c = McsCollection::new(vec![
            bits("010000"),
            bits("000100"),
            bits("101000"),
            bits("100011"),
        ])
        .unwrap();

        assert_eq!(c.universe(), 6);
        assert_eq!(c.essential(), &[1, 3]);
        assert_eq!(c.reduced_universe(), 4);
        assert_eq!(c.reduced().len(), 2);
        assert_eq!(c.reduced()[0].indices(), &[0, 1]);
        assert_eq!(c.reduced()[1].indices(), &[0, 2, 3]);
        assert_eq!(c.reduced()[1].universe(), 4);
    }

    #[test]
    fn test_all_essential_reduces_to_nothing() {
        let c = McsCollection::new(vec![bits("100"), bits("001")]).unwrap();
        assert_eq!(c.essential_count(), 2);
        assert!(c.reduced().is_empty());
        assert_eq!(c.reduced_universe(), 1);
    }

    #[test]
    fn test_no_essential_keeps_indices() {
        let c = McsCollection::new(vec![bits("1100"), bits("0011")]).unwrap();
        assert_eq!(c.essential_count(), 0);
        assert_eq!(c.reduced()[1].indices(), &[2, 3]);
    }

    #[test]
    fn test_seed_count() {
        let c = McsCollection::new(vec![bits("1100"), bits("0011"), bits("1011")]).unwrap();
        assert_eq!(c.seed_count(2), 2);
        assert_eq!(c.seed_count(3), 3);
        assert_eq!(c.seed_count(1), 0);
    }

    #[test]
    fn test_contract_violations() {
        assert!(matches!(
            McsCollection::new(vec![]),
            Err(PofError::EmptyCollection)
        ));
        assert!(matches!(
            McsCollection::new(vec![bits("110"), bits("001")]),
            Err(PofError::UnsortedCollection { index: 1, previous: 2, found: 1 })
        ));
        assert!(matches!(
            McsCollection::new(vec![bits("110"), bits("0011")]),
            Err(PofError::UniverseMismatch { index: 1, expected: 3, found: 4 })
        ));
        assert!(matches!(
            McsCollection::new(vec![bits("000")]),
            Err(PofError::EmptyCutset { index: 0 })
        ));
    }

    #[test]
    fn test_superset_of_essential_is_rejected() {
        assert!(matches!(
            McsCollection::new(vec![bits("1000"), bits("0110"), bits("1100")]),
            Err(PofError::NonMinimal { index: 2 })
        ));
        assert!(matches!(
            McsCollection::new(vec![bits("100"), bits("010"), bits("110")]),
            Err(PofError::NonMinimal { index: 2 })
        ));
        // overlap among non-essential sets is fine
        assert!(McsCollection::new(vec![bits("1000"), bits("0110"), bits("0011")]).is_ok());
    }
}
