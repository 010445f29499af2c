// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Dense agent identifiers.
//!
//! Callers label agents with any hashable type; internally every man and
//! every woman is a dense index assigned in input order. Separate newtypes
//! for the two sides prevent indexing a woman's table with a man.

use std::fmt;
use std::hash::Hash;

/// Common behaviour of [`ManId`] and [`WomanId`].
///
/// Lets preference lists and rank tables be written once for both sides.
pub trait Agent: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// Create an identifier from its dense index.
    fn from_index(index: usize) -> Self;

    /// Get the dense index (for array indexing).
    fn index(self) -> usize;
}

/// A man, identified by his position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManId(usize);

/// A woman, identified by her position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WomanId(usize);

impl ManId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl WomanId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl Agent for ManId {
    #[inline]
    fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

impl Agent for WomanId {
    #[inline]
    fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ManId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

impl fmt::Display for WomanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Iterate over the first `count` men.
pub fn men(count: usize) -> impl Iterator<Item = ManId> {
    (0..count).map(ManId)
}

/// Iterate over the first `count` women.
pub fn women(count: usize) -> impl Iterator<Item = WomanId> {
    (0..count).map(WomanId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_index() {
        assert_eq!(ManId::from_index(3).index(), 3);
        assert_eq!(WomanId::new(2).as_usize(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(ManId::new(0).to_string(), "m0");
        assert_eq!(WomanId::new(4).to_string(), "w4");
    }

    #[test]
    fn test_iterators_follow_input_order() {
        let ids: Vec<ManId> = men(3).collect();
        assert_eq!(ids, vec![ManId::new(0), ManId::new(1), ManId::new(2)]);
        assert_eq!(women(0).count(), 0);
    }
}
