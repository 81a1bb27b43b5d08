//! # Domain Events
//!
//! Events emitted during comparison operations for the audit trail.
//!
//! ## Comparison Events
//!
//! - [`ComparisonEvent`]: One audit record, carrying a [`ComparisonEventKind`]
//! - [`DomainEvent`]: Accessors shared by all events

pub mod comparison_events;
pub mod domain_event;

pub use comparison_events::{ComparisonEvent, ComparisonEventKind};
pub use domain_event::{DomainEvent, EventMetadata, EventType};
