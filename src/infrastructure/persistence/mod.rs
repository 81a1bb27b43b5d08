//! # Persistence Layer
//!
//! Repository port and adapters for the comparison aggregate.
//!
//! ## Repository Traits (Ports)
//!
//! - [`ComparisonRepository`]: Tenant-scoped comparison storage
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory adapter for tests and embedding
//! - `records`: Flat record with JSON blobs shared by adapters

pub mod in_memory;
pub mod records;
pub mod traits;

pub use records::ComparisonRecord;
pub use traits::{ComparisonFilter, ComparisonRepository, RepositoryError, RepositoryResult};
