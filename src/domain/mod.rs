//! # Domain Layer
//!
//! Core business logic for quote comparison.
//!
//! - [`entities`]: The [`Comparison`](entities::Comparison) aggregate and quote read models
//! - [`value_objects`]: Identifiers, weights, scores and status
//! - [`services`]: The scoring engine
//! - [`events`]: Audit events
//! - [`errors`]: Domain error type

pub mod entities;
pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
