//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ComparisonId`], [`RfqId`], [`QuoteId`], [`EventId`]: UUID-based identifiers
//! - [`TenantId`], [`SupplierId`], [`UserId`]: String-based identifiers
//!
//! ## Scoring
//!
//! - [`Criterion`]: The four scoring axes
//! - [`ScoringCriteria`]: Validated weights for the axes
//! - [`QuoteScore`], [`PriceDifference`], [`ItemComparison`]: Scoring outputs
//!
//! ## Lifecycle
//!
//! - [`ComparisonStatus`]: Comparison state machine
//! - [`Timestamp`]: UTC timestamps for audit fields

pub mod comparison_results;
pub mod comparison_status;
pub mod ids;
pub mod scoring_criteria;
pub mod timestamp;

pub use comparison_results::{ItemComparison, ItemDetails, PriceDifference, QuoteScore};
pub use comparison_status::{ComparisonStatus, InvalidComparisonStatusError};
pub use ids::{ComparisonId, EventId, QuoteId, RfqId, SupplierId, TenantId, UserId};
pub use scoring_criteria::{Criterion, ScoringCriteria, WEIGHT_SUM_TOLERANCE};
pub use timestamp::Timestamp;
