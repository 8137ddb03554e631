//! Error types for citegate.
//!
//! Checkers themselves do not fail on bad document data; bad data becomes
//! findings. Errors here are reserved for contract violations and for
//! misconfigured external capabilities, which are setup defects and must
//! surface to the caller.

use thiserror::Error;

/// Convenience result alias used across both citegate crates.
pub type CitegateResult<T> = Result<T, CitegateError>;

#[derive(Debug, Error)]
pub enum CitegateError {
    /// A caller supplied an argument that violates the API contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal invariant was violated.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A required external capability is missing or misconfigured.
    #[error("capability unavailable: {0}")]
    Capability(String),

    /// The URL probe layer could not be constructed or used.
    #[error("probe error: {0}")]
    Probe(String),

    /// The text-completion capability failed.
    #[error("completion error: {0}")]
    Completion(String),
}

impl CitegateError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    pub fn completion(msg: impl Into<String>) -> Self {
        Self::Completion(msg.into())
    }
}
