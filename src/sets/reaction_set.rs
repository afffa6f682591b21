// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! ReactionSet type for representing sets of deleted reactions.
//!
//! A ReactionSet stores the indices of its reactions as a strictly increasing
//! list. Cut sets are very sparse (a handful of deletions among thousands of
//! reactions), so a sorted index list beats a bitset for every operation the
//! search needs: all of them are linear merges over the two index lists.
//!
//! # Examples
//!
//! ```
//! use mcs_pof::sets::{Extra, ReactionSet};
//!
//! let a = ReactionSet::from_indices(10, [1, 4]).unwrap();
//! let b = ReactionSet::from_indices(10, [4, 7, 9]).unwrap();
//!
//! assert!(a.overlaps(&b));
//! assert_eq!(a.union(&b).indices(), &[1, 4, 7, 9]);
//! assert_eq!(a.probe_extra(&b), Extra::Many(2));
//! assert_eq!(format!("{}", a), "{1,4}");
//! ```

use crate::errors::{PofError, Result};
use std::fmt;

/// Index of a reaction within its universe.
pub type ReactionId = usize;

/// Outcome of [`ReactionSet::probe_extra`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    /// The probed set is contained in this one.
    Zero,
    /// Exactly one reaction of the probed set is missing from this one.
    One(ReactionId),
    /// At least two reactions are missing. The count is exact up to the probe cap.
    Many(usize),
}

/// A set of reactions represented as a sorted index list.
///
/// Invariant: indices are strictly increasing and smaller than `universe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReactionSet {
    universe: usize,
    indices: Vec<ReactionId>,
}

impl ReactionSet {
    /// Create an empty set over `universe` reactions.
    pub fn empty(universe: usize) -> Self {
        Self {
            universe,
            indices: Vec::new(),
        }
    }

    /// Create a set from arbitrary indices; they are sorted and deduplicated.
    pub fn from_indices(
        universe: usize,
        indices: impl IntoIterator<Item = ReactionId>,
    ) -> Result<Self> {
        let mut indices: Vec<ReactionId> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        if let Some(&last) = indices.last() {
            if last >= universe {
                return Err(PofError::IndexOutOfRange {
                    index: last,
                    universe,
                });
            }
        }
        Ok(Self { universe, indices })
    }

    /// Parse a set from its binary encoding, e.g. `"0010010"`.
    ///
    /// The universe is the length of the string. Characters other than `'0'`
    /// and `'1'` are rejected with their position.
    pub fn from_bit_str(bits: &str) -> std::result::Result<Self, usize> {
        let mut set = Self::empty(bits.len());
        for (position, byte) in bits.bytes().enumerate() {
            match byte {
                b'1' => set.indices.push(position),
                b'0' => {}
                _ => return Err(position),
            }
        }
        Ok(set)
    }

    /// Number of reactions in the universe this set lives in.
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Number of reactions in the set.
    pub fn cardinality(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The reaction indices, ascending.
    pub fn indices(&self) -> &[ReactionId] {
        &self.indices
    }

    /// Smallest index in the set, if any.
    pub fn first(&self) -> Option<ReactionId> {
        self.indices.first().copied()
    }

    pub fn contains(&self, reaction: ReactionId) -> bool {
        self.indices.binary_search(&reaction).is_ok()
    }

    /// Add a reaction, keeping the index list sorted. Adding a present
    /// reaction is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `reaction >= universe`.
    pub fn insert(&mut self, reaction: ReactionId) {
        assert!(
            reaction < self.universe,
            "ReactionId out of range: {} >= {}",
            reaction,
            self.universe
        );
        if let Err(slot) = self.indices.binary_search(&reaction) {
            self.indices.insert(slot, reaction);
        }
    }

    /// Compute the union of two reaction sets by merging the index lists.
    pub fn union(&self, other: &Self) -> Self {
        let (a, b) = (&self.indices, &other.indices);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        Self {
            universe: self.universe.max(other.universe),
            indices: merged,
        }
    }

    /// Whether the two sets share at least one reaction.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (a, b) = (&self.indices, &other.indices);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    /// Classify `other` by the reactions it has that `self` lacks.
    ///
    /// Stops as soon as a second extra reaction is seen, so `Extra::Many`
    /// carries 2 here. Use [`probe_extra_capped`](Self::probe_extra_capped)
    /// when a larger count matters.
    pub fn probe_extra(&self, other: &Self) -> Extra {
        self.probe_extra_capped(other, 2)
    }

    /// Like [`probe_extra`](Self::probe_extra), but keeps counting extra
    /// reactions until `cap` of them have been seen (`cap` is raised to 2).
    ///
    /// `Extra::Many(n)` reports `n = min(true count, cap)`.
    pub fn probe_extra_capped(&self, other: &Self, cap: usize) -> Extra {
        let cap = cap.max(2);
        let (a, b) = (&self.indices, &other.indices);
        let (mut i, mut j) = (0, 0);
        let mut count = 0;
        let mut last_extra = 0;
        while j < b.len() {
            if i < a.len() && a[i] < b[j] {
                i += 1;
                continue;
            }
            if i < a.len() && a[i] == b[j] {
                i += 1;
            } else {
                count += 1;
                last_extra = b[j];
                if count == cap {
                    return Extra::Many(count);
                }
            }
            j += 1;
        }
        match count {
            0 => Extra::Zero,
            1 => Extra::One(last_extra),
            n => Extra::Many(n),
        }
    }

    /// Drop the reactions in `deleted` from the universe and shift the
    /// surviving indices down by the number of deleted reactions before them.
    ///
    /// `deleted` must be strictly ascending.
    pub fn remove_and_reindex(&self, deleted: &[ReactionId]) -> Result<Self> {
        if let Some(position) = deleted.windows(2).position(|w| w[0] >= w[1]) {
            return Err(PofError::UnsortedDeletions {
                position: position + 1,
            });
        }
        let mut indices = Vec::with_capacity(self.indices.len());
        let mut shift = 0;
        for &reaction in &self.indices {
            while shift < deleted.len() && deleted[shift] < reaction {
                shift += 1;
            }
            if shift < deleted.len() && deleted[shift] == reaction {
                continue;
            }
            indices.push(reaction - shift);
        }
        let removed = deleted.iter().filter(|&&r| r < self.universe).count();
        Ok(Self {
            universe: self.universe - removed,
            indices,
        })
    }
}

impl fmt::Display for ReactionSet {
    /// Format a reaction set as "{1,4,7}".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (n, reaction) in self.indices.iter().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", reaction)?;
        }
        write!(f, "}}")
    }
}
