//! Engine error contract
//!
//! Two tiers only: bad caller input (`InvalidParameter`) and violated growth
//! invariants (`Internal`). The second always means an engine defect, never
//! a usage error, so callers can tell the two apart.

use thiserror::Error;

/// Result alias used throughout the engine.
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Non-positive dimension or point count, or points outside the
    /// configured growth domain. No partial result is produced.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// A growth invariant failed mid-run (overlap after resolution, negative
    /// radius, regressing freeze times, stuck active set). Not recoverable;
    /// retrying with the same inputs will fail the same way.
    #[error("internal invariant violation: {reason}")]
    Internal { reason: String },
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn internal(reason: impl Into<String>) -> Self {
        SimError::Internal {
            reason: reason.into(),
        }
    }

    /// True for the input-validation tier.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SimError::InvalidParameter { .. })
    }
}
