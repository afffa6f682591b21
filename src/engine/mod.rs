// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parallel search engine.
//!
//! The engine fills a context's contribution table in two steps:
//! 1. Record the essential reactions as cardinality-1 terms
//! 2. Run one recursion per seed MCS on a rayon worker pool
//!
//! Seeds are the reduced cut sets whose cardinality is within the bound. They
//! are spawned into a FIFO scope from the largest index down, so workers start
//! them in descending order. High-index seeds compare against more earlier cut
//! sets and dominate the run time.
//!
//! Progress is counted per finished seed on an `indicatif` bar, hidden unless
//! the engine is built [`SearchEngine::with_progress`].
//!
//! Seeds share only the table, the combination cache and the statistics; each
//! recursion owns its pinned sets.
//!
//! # Example
//!
//! ```
//! use mcs_pof::context::{SearchConfig, SearchContext};
//! use mcs_pof::engine::SearchEngine;
//! use mcs_pof::sets::{McsCollection, ReactionSet};
//!
//! let sets = ["11000", "00110"]
//!     .iter()
//!     .map(|bits| ReactionSet::from_bit_str(bits).unwrap())
//!     .collect();
//! let collection = McsCollection::new(sets).unwrap();
//! let ctx = SearchContext::new(collection, &SearchConfig::new().with_max_cardinality(4));
//!
//! SearchEngine::new(ctx.threads).unwrap().search(&ctx);
//! assert_eq!(ctx.table.get(2, 0), 2);
//! assert_eq!(ctx.table.get(4, 0), -1);
//! ```

pub mod enumerator;

pub use enumerator::Enumerator;

use crate::context::SearchContext;
use crate::errors::Result;
use crate::state::Counters;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A worker pool that runs searches.
pub struct SearchEngine {
    pool: rayon::ThreadPool,
    threads: usize,
    show_progress: bool,
}

impl SearchEngine {
    /// Create an engine with `threads` workers (at least one).
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PofError::ThreadPool`] if the pool cannot be built.
    pub fn new(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        Ok(Self {
            pool,
            threads,
            show_progress: false,
        })
    }

    /// Draw a per-seed progress bar on stderr while searching.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    fn progress_bar(&self, seeds: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(seeds as u64);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg} ({eta})")
        {
            Ok(style) => bar.set_style(style.progress_chars("█▓▒░  ")),
            Err(e) => warn!("Falling back to the default progress style: {}", e),
        }
        bar.set_message("seed MCSs");
        bar
    }

    /// Fill `ctx.table`.
    ///
    /// Running twice on the same context accumulates twice; use a fresh
    /// context per run.
    pub fn search(&self, ctx: &SearchContext) {
        if ctx.max_cardinality == 0 {
            return;
        }
        let start = Instant::now();

        ctx.table.add_essential(ctx.essential_count());

        let seeds = ctx.collection.seed_count(ctx.max_cardinality);
        if seeds == 0 {
            info!("No MCS above cardinality 1 within the bound; nothing to enumerate");
            return;
        }
        info!(
            "Enumerating {} seed MCSs up to cardinality {} on {} threads",
            seeds, ctx.max_cardinality, self.threads
        );

        let enumerator = Enumerator::new(ctx);
        let completed = AtomicUsize::new(0);
        let progress = self.progress_bar(seeds);
        spawn_descending(&self.pool, seeds, |seed| {
            enumerator.run_seed(seed);
            progress.inc(1);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("Seed {} finished ({}/{})", seed, done, seeds);
        });
        progress.finish_and_clear();

        info!(
            "Search finished in {:.2?}: {} frames, {} contributions",
            start.elapsed(),
            ctx.statistics.get(Counters::Frames),
            ctx.statistics.get(Counters::Contributions)
        );
    }
}

/// Run `task` once per seed, starting seeds from the largest index down.
fn spawn_descending<F>(pool: &rayon::ThreadPool, seeds: usize, task: F)
where
    F: Fn(usize) + Sync,
{
    pool.scope_fifo(|scope| {
        for seed in (0..seeds).rev() {
            let task = &task;
            scope.spawn_fifo(move |_| task(seed));
        }
    });
}

/// Build an engine sized by the context and run it.
pub fn run(ctx: &SearchContext) -> Result<()> {
    SearchEngine::new(ctx.threads)?.search(ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SearchConfig;
    use crate::sets::{McsCollection, ReactionSet};

    fn context(rows: &[&str], max_cardinality: usize) -> SearchContext {
        let sets = rows
            .iter()
            .map(|r| ReactionSet::from_bit_str(r).unwrap())
            .collect();
        SearchContext::new(
            McsCollection::new(sets).unwrap(),
            &SearchConfig::new().with_max_cardinality(max_cardinality),
        )
    }

    #[test]
    fn test_disjoint_pairs() {
        let ctx = context(&["11000", "00110"], 4);
        run(&ctx).unwrap();
        assert_eq!(ctx.table.get(2, 0), 2);
        assert_eq!(ctx.table.get(4, 0), -1);
        assert_eq!(ctx.table.nonzero().count(), 2);
    }

    #[test]
    fn test_union_beyond_bound_is_pruned() {
        let ctx = context(&["11000", "00110"], 3);
        run(&ctx).unwrap();
        assert_eq!(ctx.table.get(2, 0), 2);
        assert_eq!(ctx.table.nonzero().count(), 1);
        assert!(ctx.statistics.get(Counters::CardinalityPrunes) > 0);
    }

    #[test]
    fn test_one_extra_reaction_is_pinned() {
        // {0,1} then {1,2}: the second seed must avoid {0,1}, so reaction 0 stays
        let ctx = context(&["1100", "0110"], 4);
        run(&ctx).unwrap();
        assert_eq!(ctx.table.get(2, 0), 1);
        assert_eq!(ctx.table.get(2, 1), 1);
        assert_eq!(ctx.table.nonzero().count(), 2);
        assert_eq!(ctx.statistics.get(Counters::PlusOneReactions), 1);
    }

    #[test]
    fn test_seeds_above_bound_are_skipped() {
        let ctx = context(&["1100", "0111"], 2);
        run(&ctx).unwrap();
        let cells: Vec<_> = ctx.table.nonzero().collect();
        assert_eq!(cells, vec![(2, 0, 1)]);
    }

    #[test]
    fn test_only_essentials() {
        let ctx = context(&["10000", "01000", "00100"], 0);
        run(&ctx).unwrap();
        let cells: Vec<_> = ctx.table.nonzero().collect();
        assert_eq!(cells, vec![(1, 0, 1), (1, 1, 1), (1, 2, 1)]);
    }

    #[test]
    fn test_essentials_shift_extra_count() {
        let ctx = context(&["10000", "01100"], 3);
        run(&ctx).unwrap();
        assert_eq!(ctx.table.get(1, 0), 1);
        assert_eq!(ctx.table.get(2, 1), 1);
    }

    #[test]
    fn test_engine_threads() {
        assert_eq!(SearchEngine::new(0).unwrap().threads(), 1);
        assert_eq!(SearchEngine::new(3).unwrap().threads(), 3);
    }

    #[test]
    fn test_seeds_start_from_the_largest_index() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let started = std::sync::Mutex::new(Vec::new());
        spawn_descending(&pool, 5, |seed| started.lock().unwrap().push(seed));
        assert_eq!(started.into_inner().unwrap(), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_progress_bar_is_hidden_by_default() {
        let engine = SearchEngine::new(1).unwrap();
        assert!(engine.progress_bar(5).is_hidden());

        let bar = engine.with_progress(true).progress_bar(5);
        assert_eq!(bar.length(), Some(5));
        bar.inc(2);
        assert_eq!(bar.position(), 2);
    }

    #[test]
    fn test_progress_does_not_change_table() {
        let rows = ["110000", "011000", "000110", "100001", "001011"];
        let quiet = context(&rows, 6);
        SearchEngine::new(2).unwrap().search(&quiet);
        let shown = context(&rows, 6);
        SearchEngine::new(2)
            .unwrap()
            .with_progress(true)
            .search(&shown);
        let a: Vec<_> = quiet.table.nonzero().collect();
        let b: Vec<_> = shown.table.nonzero().collect();
        assert_eq!(a, b);
        assert_eq!(
            quiet.statistics.get(Counters::Frames),
            shown.statistics.get(Counters::Frames)
        );
    }
}
