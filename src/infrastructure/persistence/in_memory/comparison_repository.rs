//! # In-Memory Comparison Repository
//!
//! In-memory implementation of [`ComparisonRepository`].
//!
//! Comparisons are stored as [`ComparisonRecord`]s so every write and read
//! goes through the same blob encoding a database adapter would use.

use crate::domain::entities::comparison::Comparison;
use crate::domain::value_objects::{ComparisonId, RfqId, TenantId};
use crate::infrastructure::persistence::records::ComparisonRecord;
use crate::infrastructure::persistence::traits::{
    ComparisonFilter, ComparisonRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const ENTITY: &str = "Comparison";

/// In-memory implementation of [`ComparisonRepository`].
///
/// Uses a thread-safe `HashMap` keyed by comparison id. Updates are
/// accepted only when they carry a newer version than the stored record.
#[derive(Debug, Clone)]
pub struct InMemoryComparisonRepository {
    storage: Arc<RwLock<HashMap<ComparisonId, ComparisonRecord>>>,
}

impl InMemoryComparisonRepository {
    /// Creates a new empty in-memory comparison repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of comparisons across all tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all comparisons from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }

    async fn matching(&self, filter: &ComparisonFilter) -> RepositoryResult<Vec<Comparison>> {
        let storage = self.storage.read().await;
        let tenant = filter.tenant_id.as_str();
        let mut found = Vec::new();
        for record in storage.values().filter(|r| r.tenant_id == tenant) {
            let comparison = record.clone().try_into_comparison()?;
            if filter.matches(&comparison) {
                found.push(comparison);
            }
        }
        drop(storage);

        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        let page = found.into_iter().skip(filter.offset);
        Ok(match filter.limit {
            Some(limit) => page.take(limit).collect(),
            None => page.collect(),
        })
    }
}

impl Default for InMemoryComparisonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComparisonRepository for InMemoryComparisonRepository {
    async fn create(&self, comparison: &Comparison) -> RepositoryResult<()> {
        let record = ComparisonRecord::from_comparison(comparison)?;
        let mut storage = self.storage.write().await;
        if storage.contains_key(&comparison.id()) {
            return Err(RepositoryError::duplicate(ENTITY, comparison.id().to_string()));
        }
        storage.insert(comparison.id(), record);
        Ok(())
    }

    async fn get_by_id(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
    ) -> RepositoryResult<Option<Comparison>> {
        let storage = self.storage.read().await;
        storage
            .get(&id)
            .filter(|record| record.tenant_id == tenant_id.as_str())
            .cloned()
            .map(ComparisonRecord::try_into_comparison)
            .transpose()
    }

    async fn get_by_rfq(
        &self,
        tenant_id: &TenantId,
        rfq_id: RfqId,
    ) -> RepositoryResult<Vec<Comparison>> {
        self.matching(&ComparisonFilter::for_tenant(tenant_id.clone()).with_rfq(rfq_id))
            .await
    }

    async fn list(&self, filter: &ComparisonFilter) -> RepositoryResult<Vec<Comparison>> {
        self.matching(filter).await
    }

    async fn update(&self, comparison: &Comparison) -> RepositoryResult<()> {
        let record = ComparisonRecord::from_comparison(comparison)?;
        let mut storage = self.storage.write().await;
        let stored = storage
            .get_mut(&comparison.id())
            .filter(|stored| stored.tenant_id == record.tenant_id)
            .ok_or_else(|| RepositoryError::not_found(ENTITY, comparison.id().to_string()))?;

        if record.version <= stored.version {
            return Err(RepositoryError::version_conflict(
                ENTITY,
                comparison.id().to_string(),
                record.version,
                stored.version,
            ));
        }
        *stored = record;
        Ok(())
    }

    async fn delete(&self, tenant_id: &TenantId, id: ComparisonId) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        let owned = storage
            .get(&id)
            .is_some_and(|record| record.tenant_id == tenant_id.as_str());
        if !owned {
            return Err(RepositoryError::not_found(ENTITY, id.to_string()));
        }
        storage.remove(&id);
        Ok(())
    }

    async fn count(&self, tenant_id: &TenantId) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|record| record.tenant_id == tenant_id.as_str())
            .count() as u64)
    }
}
