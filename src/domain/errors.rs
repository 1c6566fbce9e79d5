//! Shared error taxonomy for services built on the bootstrap layer.

use thiserror::Error;

/// Generic service-level errors.
///
/// These variants cover the common cases every service shares. A service
/// whose errors need extra response fields, or a different HTTP mapping,
/// defines its own error type and installs a handler for it with
/// [`crate::adapters::http::AppBuilder::register_error_handler`].
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable identifier used in error response bodies.
    pub fn id(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_failed",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result alias for service operations.
pub type DomainResult<T> = Result<T, ServiceError>;
