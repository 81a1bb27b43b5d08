//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur while the comparison
//! service executes a use case.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Business rule violations
//! ├── Repository(RepositoryError)  - Storage failures
//! ├── Validation(String)           - Request validation failures
//! ├── NotFound { .. }              - Comparison absent for the tenant
//! └── Internal(String)             - Anything else
//! ```
//!
//! # Examples
//!
//! ```
//! use procure_compare::application::error::ApplicationError;
//! use procure_compare::domain::DomainError;
//!
//! let err = ApplicationError::not_found("Comparison", "c-123");
//! assert!(err.is_not_found());
//!
//! let err: ApplicationError = DomainError::NoQuotes.into();
//! assert!(err.is_validation());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Storage error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if retrying the whole use case may succeed.
    ///
    /// Only optimistic concurrency conflicts qualify.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_version_conflict())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Repository(e) => e.is_not_found(),
            Self::Domain(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Domain(e) => e.is_validation(),
            _ => false,
        }
    }

    /// Returns true if the operation is not allowed in the current state.
    #[must_use]
    pub fn is_state_violation(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_state_violation())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ComparisonStatus, QuoteId};

    #[test]
    fn validation_error() {
        let err = ApplicationError::validation("name must not be blank");
        assert!(err.is_validation());
        assert!(err.to_string().contains("name must not be blank"));
    }

    #[test]
    fn not_found_error() {
        let err = ApplicationError::not_found("Comparison", "c-1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: Comparison with id c-1");
    }

    #[test]
    fn domain_errors_keep_their_class() {
        let err: ApplicationError = DomainError::invalid_criteria("bad").into();
        assert!(err.is_validation());
        assert!(!err.is_state_violation());

        let err: ApplicationError = DomainError::InvalidStateTransition {
            from: ComparisonStatus::Archived,
            to: ComparisonStatus::Active,
        }
        .into();
        assert!(err.is_state_violation());

        let err: ApplicationError = DomainError::QuoteNotFound(QuoteId::new_v4()).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn only_version_conflicts_are_retryable() {
        let err: ApplicationError =
            RepositoryError::version_conflict("Comparison", "c-1", 2, 3).into();
        assert!(err.is_retryable());

        let err: ApplicationError = RepositoryError::not_found("Comparison", "c-1").into();
        assert!(!err.is_retryable());
        assert!(err.is_not_found());

        assert!(!ApplicationError::internal("boom").is_retryable());
    }
}
