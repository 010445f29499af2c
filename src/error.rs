// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! An instance with no stable matching is not an error: it is reported as
//! [`crate::Outcome::NoStableMatching`]. Errors are reserved for malformed
//! input and for a run that fails to terminate within its round limit.

use thiserror::Error;

pub type MatchingResult<T> = Result<T, MatchingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Strong stability needs both sides to have the same size.
    #[error("instance has {men} men but {women} women")]
    InputShape { men: usize, women: usize },

    /// The round counter ran out before success or proven impossibility.
    #[error("no verdict after {rounds} rounds")]
    NonConvergence { rounds: usize },
}

/// Problems found while validating an instance or a matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{side} {agent} is listed more than once")]
    DuplicateAgent { side: &'static str, agent: String },

    #[error("preference list of {owner} names unknown agent {agent}")]
    UnknownAgent { owner: String, agent: String },

    #[error("preference list of {owner} names {agent} more than once")]
    RepeatedPreference { owner: String, agent: String },

    #[error("preference list of {owner} contains an empty tied group")]
    EmptyGroup { owner: String },

    #[error("{owner} lists {other} but {other} does not list {owner}")]
    AsymmetricAcceptability { owner: String, other: String },

    #[error("not a perfect matching: {0}")]
    InvalidMatching(String),
}
