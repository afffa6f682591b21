// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining immutable input and shared mutable state.
//!
//! The SearchContext is the core data structure that combines:
//! - Tier 1 (input): the reduced MCS collection and optional compression,
//!   read-only during the search
//! - Tier 2 (shared): the contribution table, the combination cache and the
//!   statistics, written concurrently by the workers
//!
//! A context lives for exactly one run. The cache is owned by the context, so
//! its lifetime is the run's; pass a fresh context for an independent run.

pub mod compression;

pub use compression::Compression;

use crate::errors::Result;
use crate::memo::CombinationCache;
use crate::sets::McsCollection;
use crate::state::{ContributionTable, Statistics};
use std::sync::Arc;
use tracing::debug;

/// Parameters of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Largest cut set cardinality to search for. 0 means the whole universe.
    pub max_cardinality: usize,

    /// Worker threads for the recursion seeds.
    pub threads: usize,

    /// Memoize expansions of compressed cut sets.
    pub cache_enabled: bool,

    /// Reactions in the uncompressed network, if not the multiplicity sum.
    /// Only consulted for compressed networks.
    pub universe_size: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_cardinality: 0,
            threads: 1,
            cache_enabled: true,
            universe_size: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_cardinality(mut self, max_cardinality: usize) -> Self {
        self.max_cardinality = max_cardinality;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_cache(mut self, cache_enabled: bool) -> Self {
        self.cache_enabled = cache_enabled;
        self
    }

    pub fn with_universe_size(mut self, universe_size: Option<usize>) -> Self {
        self.universe_size = universe_size;
        self
    }

    /// The effective bound for a universe of `universe` reactions: zero or
    /// anything larger than the universe is clamped to the universe.
    pub fn resolve_bound(&self, universe: usize) -> usize {
        if self.max_cardinality == 0 || self.max_cardinality > universe {
            universe
        } else {
            self.max_cardinality
        }
    }
}

/// Everything one run reads and writes.
#[derive(Debug)]
pub struct SearchContext {
    /// Reduced minimal cut sets (Tier 1)
    pub collection: McsCollection,

    /// Compression of the reduced universe, if the network was compressed (Tier 1)
    pub compression: Option<Compression>,

    /// Effective cardinality bound (Tier 1)
    pub max_cardinality: usize,

    /// Worker threads (Tier 1)
    pub threads: usize,

    /// Signed counts (Tier 2)
    pub table: ContributionTable,

    /// Memoized expansions (Tier 2)
    pub cache: CombinationCache,

    /// Counters (Tier 2)
    pub statistics: Arc<Statistics>,
}

impl SearchContext {
    /// Create a context for an uncompressed network.
    pub fn new(collection: McsCollection, config: &SearchConfig) -> Self {
        let universe = collection.universe();
        Self::build(collection, None, universe, config)
    }

    /// Create a context for a compressed network.
    ///
    /// `multiplicities` has one entry per reaction of the collection's input
    /// universe; `config.universe_size` overrides the uncompressed reaction
    /// count, which otherwise is the sum of the multiplicities.
    pub fn compressed(
        collection: McsCollection,
        multiplicities: &[u32],
        config: &SearchConfig,
    ) -> Result<Self> {
        let compression = Compression::new(&collection, multiplicities, config.universe_size)?;
        let universe = compression.full_universe();
        Ok(Self::build(collection, Some(compression), universe, config))
    }

    fn build(
        collection: McsCollection,
        compression: Option<Compression>,
        universe: usize,
        config: &SearchConfig,
    ) -> Self {
        let max_cardinality = config.resolve_bound(universe);
        let statistics = Arc::new(Statistics::new());
        let cache = CombinationCache::new(config.cache_enabled)
            .with_bound(max_cardinality)
            .with_statistics(Arc::clone(&statistics));
        debug!(
            "Search context: {} reactions, bound {}, {} reduced MCSs, compressed: {}",
            universe,
            max_cardinality,
            collection.reduced().len(),
            compression.is_some()
        );
        Self {
            collection,
            compression,
            max_cardinality,
            threads: config.threads.max(1),
            table: ContributionTable::new(max_cardinality, universe),
            cache,
            statistics,
        }
    }

    /// Number of reactions in the uncompressed network.
    pub fn universe(&self) -> usize {
        self.table.universe()
    }

    /// Number of essential reactions, counted in the uncompressed network.
    pub fn essential_count(&self) -> usize {
        match &self.compression {
            Some(compression) => compression.essential_count(),
            None => self.collection.essential_count(),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.compression.is_some()
    }
}
