//! # Application Layer
//!
//! Use-case orchestration on top of the domain.
//!
//! - [`services`]: The comparison service and audit observers
//! - [`error`]: Application error type

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
