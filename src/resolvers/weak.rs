// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Super-stability resolver.

use super::{reset_women, ConflictResolver, Resolution};
use crate::context::MatchingContext;
use tracing::debug;

/// Resets every woman holding more than one man.
///
/// A super-stable matching cannot leave any woman indifferent between two
/// engaged men, so each such woman loses her whole tail group.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuperStableResolver;

impl SuperStableResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ConflictResolver for SuperStableResolver {
    fn resolve(&mut self, ctx: &mut MatchingContext, round: usize) -> Resolution {
        let women = ctx.engagements.multiply_engaged();
        let resolution = reset_women(ctx, women);
        debug!(
            round,
            reset = resolution.reset.len(),
            deleted = resolution.deleted,
            "super-stability resolution"
        );
        resolution
    }

    fn name(&self) -> &str {
        "SuperStable"
    }
}
