//! # Domain Entities
//!
//! Aggregate roots and entities representing core business concepts.
//!
//! ## Aggregates
//!
//! - [`Comparison`]: Quote comparison aggregate with state machine
//!
//! ## Read Models
//!
//! - [`QuoteRecord`]: Supplier quote as supplied to the scoring engine
//! - [`QuoteLineItem`]: One priced line of a quote

pub mod comparison;
pub mod quote;

pub use comparison::{Comparison, ComparisonBuilder};
pub use quote::{QuoteLineItem, QuoteRecord, QuoteRecordBuilder};
