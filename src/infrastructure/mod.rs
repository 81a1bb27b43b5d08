//! # Infrastructure Layer
//!
//! Adapters behind the domain's ports.
//!
//! - [`persistence`]: Comparison repository port and storage adapters

pub mod persistence;
