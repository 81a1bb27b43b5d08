//! # Comparison Service
//!
//! Orchestrates the comparison use cases.
//!
//! Each mutating call loads the aggregate for the tenant, applies one
//! change, saves it and then reports an audit event to the observer. A
//! rejected change leaves the stored comparison untouched.
//!
//! # Examples
//!
//! ```
//! use procure_compare::application::services::{ComparisonService, CreateComparisonRequest};
//! use procure_compare::infrastructure::persistence::in_memory::InMemoryComparisonRepository;
//! use procure_compare::domain::value_objects::{QuoteId, RfqId, TenantId};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let service = ComparisonService::new(Arc::new(InMemoryComparisonRepository::new()));
//! let request = CreateComparisonRequest::new(
//!     TenantId::new("hospital-a"),
//!     RfqId::new_v4(),
//!     "MRI replacement",
//!     vec![QuoteId::new_v4(), QuoteId::new_v4()],
//! );
//! let comparison = service.create_comparison(request).await.unwrap();
//! assert_eq!(comparison.quote_ids().len(), 2);
//! # });
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::audit::ComparisonObserver;
use crate::domain::entities::comparison::Comparison;
use crate::domain::entities::quote::QuoteRecord;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::events::ComparisonEvent;
use crate::domain::services::ComparisonEngine;
use crate::domain::value_objects::{
    ComparisonId, QuoteId, RfqId, ScoringCriteria, TenantId, UserId,
};
use crate::infrastructure::persistence::{ComparisonFilter, ComparisonRepository};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

const RESOURCE: &str = "Comparison";

/// Input for [`ComparisonService::create_comparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateComparisonRequest {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// RFQ the quotes answer.
    pub rfq_id: RfqId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial quote set, at least two.
    pub quote_ids: Vec<QuoteId>,
    /// Weights; the service default applies when absent.
    pub scoring_criteria: Option<ScoringCriteria>,
    /// Initial notes.
    pub notes: Option<String>,
    /// Creator.
    pub created_by: Option<UserId>,
}

impl CreateComparisonRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        rfq_id: RfqId,
        name: impl Into<String>,
        quote_ids: Vec<QuoteId>,
    ) -> Self {
        Self {
            tenant_id,
            rfq_id,
            name: name.into(),
            description: None,
            quote_ids,
            scoring_criteria: None,
            notes: None,
            created_by: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets explicit weights.
    #[must_use]
    pub fn with_scoring_criteria(mut self, criteria: ScoringCriteria) -> Self {
        self.scoring_criteria = Some(criteria);
        self
    }

    /// Sets initial notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the creator.
    #[must_use]
    pub fn with_created_by(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }
}

/// Application service for quote comparisons.
#[derive(Clone)]
pub struct ComparisonService {
    repository: Arc<dyn ComparisonRepository>,
    engine: ComparisonEngine,
    observer: Option<Arc<dyn ComparisonObserver>>,
    default_criteria: ScoringCriteria,
}

impl ComparisonService {
    /// Creates a service with the default engine and no observer.
    #[must_use]
    pub fn new(repository: Arc<dyn ComparisonRepository>) -> Self {
        Self {
            repository,
            engine: ComparisonEngine::default(),
            observer: None,
            default_criteria: ScoringCriteria::default(),
        }
    }

    /// Replaces the scoring engine.
    #[must_use]
    pub fn with_engine(mut self, engine: ComparisonEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Attaches an audit observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ComparisonObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets the weights new comparisons start with.
    #[must_use]
    pub fn with_default_criteria(mut self, criteria: ScoringCriteria) -> Self {
        self.default_criteria = criteria;
        self
    }

    /// Returns the weights new comparisons start with.
    #[must_use]
    pub fn default_criteria(&self) -> &ScoringCriteria {
        &self.default_criteria
    }

    /// Creates and stores a draft comparison.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, fewer than two or
    /// duplicated quote ids, or invalid weights.
    pub async fn create_comparison(
        &self,
        request: CreateComparisonRequest,
    ) -> ApplicationResult<Comparison> {
        let mut builder = Comparison::builder(
            request.tenant_id,
            request.rfq_id,
            request.name,
            request.quote_ids,
        )
        .scoring_criteria(request.scoring_criteria.unwrap_or(self.default_criteria));
        if let Some(description) = request.description {
            builder = builder.description(description);
        }
        if let Some(notes) = request.notes {
            builder = builder.notes(notes);
        }
        if let Some(user) = request.created_by {
            builder = builder.created_by(user);
        }
        let comparison = builder.try_build()?;

        self.repository.create(&comparison).await?;
        info!(
            comparison_id = %comparison.id(),
            tenant_id = %comparison.tenant_id(),
            rfq_id = %comparison.rfq_id(),
            quotes = comparison.quote_ids().len(),
            "comparison created"
        );
        self.emit(ComparisonEvent::created(&comparison));
        Ok(comparison)
    }

    /// Gets a comparison.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the tenant has no such
    /// comparison.
    pub async fn get_comparison(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
    ) -> ApplicationResult<Comparison> {
        self.repository
            .get_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, id.to_string()))
    }

    /// Gets the comparisons of one RFQ, newest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error if storage fails.
    pub async fn get_comparisons_for_rfq(
        &self,
        tenant_id: &TenantId,
        rfq_id: RfqId,
    ) -> ApplicationResult<Vec<Comparison>> {
        Ok(self.repository.get_by_rfq(tenant_id, rfq_id).await?)
    }

    /// Lists comparisons matching a filter.
    ///
    /// # Errors
    ///
    /// Returns a repository error if storage fails.
    pub async fn list_comparisons(
        &self,
        filter: &ComparisonFilter,
    ) -> ApplicationResult<Vec<Comparison>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Adds a quote to the set.
    ///
    /// # Errors
    ///
    /// Returns a state violation if the comparison no longer accepts quote
    /// changes or already holds the quote.
    pub async fn add_quote(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        quote_id: QuoteId,
    ) -> ApplicationResult<Comparison> {
        self.mutate(tenant_id, id, |c| c.add_quote(quote_id), |c| {
            ComparisonEvent::quote_added(c, quote_id)
        })
        .await
    }

    /// Removes a quote from the set.
    ///
    /// Stored results are kept until the next scoring run.
    ///
    /// # Errors
    ///
    /// Returns a state violation if quote changes are closed or the set
    /// would drop below two, and not-found if the quote is not a member.
    pub async fn remove_quote(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        quote_id: QuoteId,
    ) -> ApplicationResult<Comparison> {
        self.mutate(tenant_id, id, |c| c.remove_quote(quote_id), |c| {
            ComparisonEvent::quote_removed(c, quote_id)
        })
        .await
    }

    /// Replaces the scoring weights. Existing results are not rescored.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the weights are invalid.
    pub async fn update_scoring_criteria(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        criteria: ScoringCriteria,
    ) -> ApplicationResult<Comparison> {
        let mut comparison = self.get_comparison(tenant_id, id).await?;
        let previous = *comparison.scoring_criteria();
        comparison.update_scoring_criteria(criteria)?;
        self.repository.update(&comparison).await?;
        self.emit(ComparisonEvent::criteria_updated(&comparison, previous));
        Ok(comparison)
    }

    /// Replaces the notes.
    ///
    /// # Errors
    ///
    /// Returns a state violation if the comparison is archived.
    pub async fn update_notes(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        notes: impl Into<String>,
    ) -> ApplicationResult<Comparison> {
        let notes = notes.into();
        let mut comparison = self.get_comparison(tenant_id, id).await?;
        comparison.update_notes(notes)?;
        self.repository.update(&comparison).await?;
        Ok(comparison)
    }

    /// Renames the comparison and replaces its description.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or a state violation if
    /// the comparison is archived.
    pub async fn update_details(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ApplicationResult<Comparison> {
        let name = name.into();
        let mut comparison = self.get_comparison(tenant_id, id).await?;
        comparison.update_details(name, description)?;
        self.repository.update(&comparison).await?;
        Ok(comparison)
    }

    /// Moves a draft comparison to active.
    ///
    /// # Errors
    ///
    /// Returns a state violation unless the comparison is a draft with at
    /// least two quotes.
    pub async fn activate(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
    ) -> ApplicationResult<Comparison> {
        self.change_status(tenant_id, id, Comparison::activate).await
    }

    /// Moves an active comparison to completed.
    ///
    /// # Errors
    ///
    /// Returns a state violation unless the comparison is active.
    pub async fn complete(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
    ) -> ApplicationResult<Comparison> {
        self.change_status(tenant_id, id, Comparison::complete).await
    }

    /// Archives a comparison.
    ///
    /// # Errors
    ///
    /// Returns a state violation if it is already archived.
    pub async fn archive(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
    ) -> ApplicationResult<Comparison> {
        self.change_status(tenant_id, id, Comparison::archive).await
    }

    /// Deletes a comparison.
    ///
    /// # Errors
    ///
    /// Returns not-found if the tenant has no such comparison.
    pub async fn delete_comparison(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
    ) -> ApplicationResult<()> {
        self.repository.delete(tenant_id, id).await.map_err(|e| {
            if e.is_not_found() {
                ApplicationError::not_found(RESOURCE, id.to_string())
            } else {
                e.into()
            }
        })?;
        info!(comparison_id = %id, tenant_id = %tenant_id, "comparison deleted");
        self.emit(ComparisonEvent::deleted(tenant_id.clone(), id));
        Ok(())
    }

    /// Scores the member quotes and stores the results.
    ///
    /// Quotes that are not members of the comparison are ignored. Scoring
    /// is allowed in every status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoQuotes` if none of `quotes` is a member, or
    /// a version conflict if the comparison changed concurrently.
    pub async fn calculate_scores(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        quotes: &[QuoteRecord],
    ) -> ApplicationResult<Comparison> {
        let mut comparison = self.get_comparison(tenant_id, id).await?;

        let members: Vec<QuoteRecord> = quotes
            .iter()
            .filter(|q| comparison.contains_quote(q.id()))
            .cloned()
            .collect();
        let ignored = quotes.len() - members.len();
        if ignored > 0 {
            warn!(
                comparison_id = %id,
                ignored,
                "ignoring quotes that are not part of the comparison"
            );
        }

        let outcome = self.engine.evaluate(&members, comparison.scoring_criteria())?;
        comparison.record_results(
            outcome.scores,
            outcome.price_differences,
            outcome.item_comparisons,
            outcome.recommendation,
        );

        self.repository.update(&comparison).await.inspect_err(|e| {
            warn!(error = %e, comparison_id = %id, "failed to store scores");
        })?;
        info!(
            comparison_id = %id,
            quotes = members.len(),
            best_overall = ?comparison.best_overall_quote_id(),
            best_price = ?comparison.best_price_quote_id(),
            "scores calculated"
        );
        self.emit(ComparisonEvent::scores_calculated(&comparison));
        Ok(comparison)
    }

    async fn change_status(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        transition: fn(&mut Comparison) -> DomainResult<()>,
    ) -> ApplicationResult<Comparison> {
        let mut comparison = self.get_comparison(tenant_id, id).await?;
        let from = comparison.status();
        transition(&mut comparison).inspect_err(|e| {
            warn!(error = %e, comparison_id = %id, status = %from, "status change rejected");
        })?;
        self.repository.update(&comparison).await?;
        info!(
            comparison_id = %id,
            from = %from,
            to = %comparison.status(),
            "comparison status changed"
        );
        self.emit(ComparisonEvent::status_changed(&comparison, from));
        Ok(comparison)
    }

    async fn mutate<F, E>(
        &self,
        tenant_id: &TenantId,
        id: ComparisonId,
        change: F,
        event: E,
    ) -> ApplicationResult<Comparison>
    where
        F: FnOnce(&mut Comparison) -> Result<(), DomainError>,
        E: FnOnce(&Comparison) -> ComparisonEvent,
    {
        let mut comparison = self.get_comparison(tenant_id, id).await?;
        change(&mut comparison)?;
        self.repository.update(&comparison).await?;
        self.emit(event(&comparison));
        Ok(comparison)
    }

    fn emit(&self, event: ComparisonEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}

impl fmt::Debug for ComparisonService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonService")
            .field("repository", &self.repository)
            .field("engine", &self.engine)
            .field("observer", &self.observer)
            .field("default_criteria", &self.default_criteria)
            .finish()
    }
}
