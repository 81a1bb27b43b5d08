//! # Domain Errors
//!
//! Error types for business rule violations in the comparison domain.
//!
//! Errors fall into three groups:
//!
//! - **validation**: bad input (empty quote list, weights not summing to 100,
//!   too few quotes at creation)
//! - **state violation**: operation invalid for the current status or quote set
//! - **not found**: a referenced quote is not part of the comparison
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::errors::DomainError;
//!
//! let err = DomainError::NoQuotes;
//! assert!(err.is_validation());
//! ```

use crate::domain::value_objects::{ComparisonStatus, QuoteId};
use thiserror::Error;

/// Minimum number of quotes a comparison must hold.
pub const MIN_QUOTES: usize = 2;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Scoring was requested with an empty quote list.
    #[error("no quotes provided for scoring")]
    NoQuotes,

    /// Scoring weights are out of range or do not sum to 100.
    #[error("invalid scoring criteria: {0}")]
    InvalidCriteria(String),

    /// Generic input validation failure.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The requested status transition is not allowed.
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Current status.
        from: ComparisonStatus,
        /// Requested status.
        to: ComparisonStatus,
    },

    /// The operation is not allowed in the current status.
    #[error("cannot {operation} a comparison in {status} status")]
    InvalidState {
        /// Current status.
        status: ComparisonStatus,
        /// Operation attempted.
        operation: &'static str,
    },

    /// The quote set would drop below the minimum size.
    #[error("comparison must contain at least {minimum} quotes")]
    InsufficientQuotes {
        /// Required minimum.
        minimum: usize,
        /// Quotes present.
        actual: usize,
    },

    /// The quote is already part of the comparison.
    #[error("quote {0} is already in the comparison")]
    DuplicateQuote(QuoteId),

    /// The quote is not part of the comparison.
    #[error("quote not found in comparison: {0}")]
    QuoteNotFound(QuoteId),
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Creates an invalid criteria error.
    #[must_use]
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self::InvalidCriteria(message.into())
    }

    /// Returns true for input validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoQuotes | Self::InvalidCriteria(_) | Self::ValidationError(_)
        )
    }

    /// Returns true for operations rejected by the aggregate's current state.
    #[must_use]
    pub fn is_state_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidStateTransition { .. }
                | Self::InvalidState { .. }
                | Self::InsufficientQuotes { .. }
                | Self::DuplicateQuote(_)
        )
    }

    /// Returns true when a referenced item is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::QuoteNotFound(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
