//! Domain error types.
//!
//! Every failure path in the core surfaces one of these kinds. Nothing is
//! retried here and nothing is swallowed; the transport boundary decides how
//! each kind maps to a response.

use std::fmt;

use thiserror::Error;

/// The kind of entity a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A story aggregate.
    Story,
    /// A chapter node.
    Chapter,
    /// A pull request.
    PullRequest,
    /// A user account.
    User,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Story => "story",
            Self::Chapter => "chapter",
            Self::PullRequest => "pull request",
            Self::User => "user",
        };
        f.write_str(name)
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing input, detected before any state was touched.
    #[error("validation failed [{code}]: {message}")]
    Validation {
        /// Machine-readable code for the specific validation failure.
        code: &'static str,
        /// Human-readable description.
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("{kind} not found: {reference}")]
    NotFound {
        /// What kind of entity was looked up.
        kind: ResourceKind,
        /// The id or slug that failed to resolve.
        reference: String,
    },

    /// The caller lacks the role or permission the operation requires.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The operation lost to a uniqueness constraint, a concurrent write, or
    /// an already-finalized state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A domain rule rejected an otherwise well-formed request.
    #[error("rule violation: {0}")]
    RuleViolation(String),

    /// A storage or transport failure. Propagated unchanged for the boundary
    /// to classify.
    #[error("storage error: {0}")]
    Storage(String),
}
