// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are shared by every worker of a run and incremented from inside
//! the recursion, so each counter is an atomic.

use std::sync::atomic::{AtomicU64, Ordering};
use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Recursive frames entered.
    Frames,
    /// Frames abandoned because a smaller cut set was already contained.
    SubsetAborts,
    /// Plus-one reactions pinned as never deleted.
    PlusOneReactions,
    /// Candidates dropped because their union would exceed the bound.
    CardinalityPrunes,
    /// Table cells written.
    Contributions,
    CacheHits,
    CacheMisses,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default)]
pub struct Statistics {
    stats: [AtomicU64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&self, counter: Counters) {
        self.add(counter, 1);
    }

    pub fn add(&self, counter: Counters, n: u64) {
        self.stats[counter as usize].fetch_add(n, Ordering::Relaxed);
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize].load(Ordering::Relaxed)
    }

    /// All counters with their names, in declaration order.
    pub fn snapshot(&self) -> Vec<(&'static str, u64)> {
        use strum::IntoEnumIterator;
        Counters::iter()
            .map(|counter| (counter.into(), self.get(counter)))
            .collect()
    }
}
