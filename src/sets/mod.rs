// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reaction sets and the minimal cut set collection.
//!
//! - ReactionSet: sorted index list with union, overlap and extra-reaction probes
//! - McsCollection: validated input with essential reactions split off

pub mod collection;
pub mod reaction_set;

pub use collection::McsCollection;
pub use reaction_set::{Extra, ReactionId, ReactionSet};
