//! # procure-compare
//!
//! Quote comparison core for a multi-tenant procurement backend.
//!
//! Given the supplier quotes that answer one request-for-quotation (RFQ),
//! the crate scores each quote on price, quality, delivery and compliance,
//! combines the sub-scores with configurable weights, ranks the quotes and
//! writes a plain-language recommendation. Results live on the
//! [`Comparison`](domain::entities::Comparison) aggregate, which carries a
//! small lifecycle state machine.
//!
//! # Layers
//!
//! - [`domain`]: aggregate, value objects, scoring engine, events
//! - [`application`]: orchestrating service, audit observers, errors
//! - [`infrastructure`]: repository port and in-memory adapter
//! - [`config`] and [`telemetry`]: ambient configuration and logging
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::entities::{QuoteLineItem, QuoteRecord};
//! use procure_compare::domain::services::ComparisonEngine;
//! use procure_compare::domain::value_objects::{QuoteId, ScoringCriteria, SupplierId};
//! use rust_decimal::Decimal;
//!
//! let quotes = vec![
//!     QuoteRecord::builder(QuoteId::new_v4(), "Q-001", SupplierId::new("sup-1"), "Acme")
//!         .total_amount(Decimal::from(1000))
//!         .build(),
//!     QuoteRecord::builder(QuoteId::new_v4(), "Q-002", SupplierId::new("sup-2"), "Globex")
//!         .total_amount(Decimal::from(2000))
//!         .build(),
//! ];
//!
//! let outcome = ComparisonEngine::default()
//!     .evaluate(&quotes, &ScoringCriteria::default())
//!     .unwrap();
//! assert_eq!(outcome.scores.len(), 2);
//! assert_eq!(outcome.scores[0].rank, 1);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
