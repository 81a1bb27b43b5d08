//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`ComparisonService`]: Comparison use cases over a repository
//! - [`ComparisonObserver`]: Audit event receivers

pub mod audit;
pub mod comparison_service;

pub use audit::{ComparisonObserver, RecordingObserver, TracingObserver};
pub use comparison_service::{ComparisonService, CreateComparisonRequest};
