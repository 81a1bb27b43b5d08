//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository trait (port) that abstracts
//! comparison storage. Every operation is scoped to a tenant; a comparison
//! is never visible across tenants.
//!
//! # Available Repositories
//!
//! - [`ComparisonRepository`]: Persistence for the comparison aggregate
//!
//! # Examples
//!
//! ```ignore
//! use procure_compare::infrastructure::persistence::traits::{ComparisonFilter, ComparisonRepository};
//!
//! async fn active_for_tenant(repo: &impl ComparisonRepository, tenant: TenantId) {
//!     let filter = ComparisonFilter::for_tenant(tenant).with_status(ComparisonStatus::Active);
//!     let active = repo.list(&filter).await?;
//!     println!("Found {} active comparisons", active.len());
//! }
//! ```

use crate::domain::entities::comparison::Comparison;
use crate::domain::value_objects::{ComparisonId, ComparisonStatus, RfqId, TenantId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Optimistic locking conflict.
    #[error("Version conflict: {entity_type} with id {id} has been modified")]
    VersionConflict {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
        /// Version carried by the update.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a version conflict error.
    #[must_use]
    pub fn version_conflict(
        entity_type: &'static str,
        id: impl Into<String>,
        expected: u64,
        actual: u64,
    ) -> Self {
        Self::VersionConflict {
            entity_type,
            id: id.into(),
            expected,
            actual,
        }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns true if this is a version conflict error.
    #[must_use]
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Query parameters for listing comparisons.
///
/// The tenant is mandatory. Results are ordered newest first, then
/// windowed by `offset` and `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonFilter {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Restrict to one RFQ.
    pub rfq_id: Option<RfqId>,
    /// Restrict to one status.
    pub status: Option<ComparisonStatus>,
    /// Number of matches to skip.
    pub offset: usize,
    /// Maximum number of matches to return.
    pub limit: Option<usize>,
}

impl ComparisonFilter {
    /// Creates a filter matching every comparison of a tenant.
    #[must_use]
    pub fn for_tenant(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            rfq_id: None,
            status: None,
            offset: 0,
            limit: None,
        }
    }

    /// Restricts to one RFQ.
    #[must_use]
    pub fn with_rfq(mut self, rfq_id: RfqId) -> Self {
        self.rfq_id = Some(rfq_id);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub fn with_status(mut self, status: ComparisonStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the page window.
    #[must_use]
    pub fn with_page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// Returns true if the comparison passes the tenant, RFQ and status
    /// conditions.
    #[must_use]
    pub fn matches(&self, comparison: &Comparison) -> bool {
        comparison.tenant_id() == &self.tenant_id
            && self.rfq_id.is_none_or(|rfq| comparison.rfq_id() == rfq)
            && self.status.is_none_or(|status| comparison.status() == status)
    }
}

/// Repository for the comparison aggregate.
///
/// # Examples
///
/// ```ignore
/// use procure_compare::infrastructure::persistence::traits::ComparisonRepository;
///
/// async fn example(repo: &impl ComparisonRepository) {
///     let comparison = repo.get_by_id(&tenant, id).await?;
///     let for_rfq = repo.get_by_rfq(&tenant, rfq_id).await?;
/// }
/// ```
#[async_trait]
pub trait ComparisonRepository: Send + Sync + fmt::Debug {
    /// Stores a new comparison.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the id is already taken.
    async fn create(&self, comparison: &Comparison) -> RepositoryResult<()>;

    /// Gets a comparison by ID.
    ///
    /// Returns `None` if it does not exist or belongs to another tenant.
    async fn get_by_id(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
    ) -> RepositoryResult<Option<Comparison>>;

    /// Gets every comparison of a tenant for one RFQ, newest first.
    async fn get_by_rfq(
        &self,
        tenant_id: &TenantId,
        rfq_id: RfqId,
    ) -> RepositoryResult<Vec<Comparison>>;

    /// Lists comparisons matching a filter.
    async fn list(&self, filter: &ComparisonFilter) -> RepositoryResult<Vec<Comparison>>;

    /// Replaces a stored comparison.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is nothing to replace,
    /// or `RepositoryError::VersionConflict` if the stored version is not
    /// older than the incoming one.
    async fn update(&self, comparison: &Comparison) -> RepositoryResult<()>;

    /// Deletes a comparison.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is nothing to delete.
    async fn delete(&self, tenant_id: &TenantId, id: ComparisonId) -> RepositoryResult<()>;

    /// Counts the comparisons of a tenant.
    async fn count(&self, tenant_id: &TenantId) -> RepositoryResult<u64>;
}
