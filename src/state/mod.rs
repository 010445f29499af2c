// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 2: DYNAMIC state (mutable during a run).
//!
//! - Live preference lists, which only ever shrink
//! - The engagement relation
//! - Run statistics

pub mod engagements;
pub mod preferences;
pub mod statistics;

pub use engagements::Engagements;
pub use preferences::{PreferenceList, PreferenceStore};
pub use statistics::{Counters, Statistics};
