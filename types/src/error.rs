//! Shared error taxonomy.
//!
//! Every service crate keeps its own `thiserror` enum with precise variants;
//! each maps onto one of these kinds so the boundary can turn any failure into
//! a discriminated outcome without matching crate-specific types.

use serde::{Deserialize, Serialize};

/// The caller-facing classification of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No or invalid session credential.
    Unauthenticated,
    /// Authenticated but lacking the capability or family scope.
    Forbidden,
    /// Entity absent.
    NotFound,
    /// Missing or malformed fields.
    InvalidInput,
    /// Uniqueness violation (duplicate family code, duplicate node).
    Conflict,
    /// Illegal status change.
    InvalidTransition,
    /// Infrastructure failure; detail stays in the logs.
    StoreUnavailable,
    /// Bounded store call timed out; retry belongs to the caller.
    Timeout,
}

impl ErrorKind {
    /// Whether the boundary may safely retry the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
