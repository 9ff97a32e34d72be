//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation not valid for the given input
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::ExternalService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_are_retryable() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::ExternalService("timeout".into()).is_retryable());
    }

    #[test]
    fn local_failures_are_not_retryable() {
        assert!(!ApplicationError::Configuration("bad".into()).is_retryable());
        assert!(!ApplicationError::Internal("oops".into()).is_retryable());
        let domain = DomainError::InvalidThresholds("strong <= 0".into());
        assert!(!ApplicationError::from(domain).is_retryable());
    }

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::invalid_series(2, "bad order"));
        assert_eq!(err.to_string(), "Invalid series at index 2: bad order");
    }
}
