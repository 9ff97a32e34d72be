//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Series violates its ordering or range invariants
    #[error("Invalid series at index {index}: {reason}")]
    InvalidSeries { index: usize, reason: String },

    /// Detection thresholds are unusable
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// Coordinates outside the valid range
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Unknown IANA timezone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid series error
    pub fn invalid_series(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            index,
            reason: reason.into(),
        }
    }
}
