//! # Comparison Aggregate Root
//!
//! A side-by-side evaluation of the supplier quotes answering one RFQ.
//!
//! The aggregate holds the quote set under review, the scoring weights and
//! the results of the latest scoring run. Results are replaced wholesale on
//! every run; they are never merged.
//!
//! # State Machine
//!
//! ```text
//! Draft → Active → Completed
//!   ↓       ↓          ↓
//!   └───────┴──────────┴→ Archived
//! ```
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::entities::Comparison;
//! use procure_compare::domain::value_objects::{ComparisonStatus, QuoteId, RfqId, TenantId};
//!
//! let mut comparison = Comparison::new(
//!     TenantId::new("tenant-1"),
//!     RfqId::new_v4(),
//!     "ICU monitors",
//!     vec![QuoteId::new_v4(), QuoteId::new_v4()],
//! )
//! .unwrap();
//!
//! comparison.activate().unwrap();
//! assert_eq!(comparison.status(), ComparisonStatus::Active);
//! ```

use crate::domain::errors::{DomainError, DomainResult, MIN_QUOTES};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{
    ComparisonId, ComparisonStatus, ItemComparison, PriceDifference, QuoteId, QuoteScore, RfqId,
    ScoringCriteria, TenantId, UserId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Quote comparison aggregate root.
///
/// # Invariants
///
/// - The quote-id set has no duplicates
/// - At least [`MIN_QUOTES`] quotes at creation and after every removal
/// - Scoring weights always sum to 100 within tolerance
/// - No quote changes once `Completed` or `Archived`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    id: ComparisonId,
    tenant_id: TenantId,
    rfq_id: RfqId,
    name: String,
    description: Option<String>,
    quote_ids: Vec<QuoteId>,
    status: ComparisonStatus,
    scoring_criteria: ScoringCriteria,
    scores: Vec<QuoteScore>,
    price_differences: Vec<PriceDifference>,
    item_comparisons: Vec<ItemComparison>,
    best_overall_quote_id: Option<QuoteId>,
    best_price_quote_id: Option<QuoteId>,
    recommendation: String,
    notes: String,
    created_by: Option<UserId>,
    /// Version for optimistic locking.
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl Comparison {
    /// Creates a draft comparison with default scoring weights.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the name is blank, fewer
    /// than two quotes are given, or a quote id appears twice.
    pub fn new(
        tenant_id: TenantId,
        rfq_id: RfqId,
        name: impl Into<String>,
        quote_ids: Vec<QuoteId>,
    ) -> DomainResult<Self> {
        ComparisonBuilder::new(tenant_id, rfq_id, name, quote_ids).try_build()
    }

    /// Returns a builder for optional fields.
    #[must_use]
    pub fn builder(
        tenant_id: TenantId,
        rfq_id: RfqId,
        name: impl Into<String>,
        quote_ids: Vec<QuoteId>,
    ) -> ComparisonBuilder {
        ComparisonBuilder::new(tenant_id, rfq_id, name, quote_ids)
    }

    /// Rebuilds a comparison from storage without validation.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ComparisonId,
        tenant_id: TenantId,
        rfq_id: RfqId,
        name: String,
        description: Option<String>,
        quote_ids: Vec<QuoteId>,
        status: ComparisonStatus,
        scoring_criteria: ScoringCriteria,
        scores: Vec<QuoteScore>,
        price_differences: Vec<PriceDifference>,
        item_comparisons: Vec<ItemComparison>,
        best_overall_quote_id: Option<QuoteId>,
        best_price_quote_id: Option<QuoteId>,
        recommendation: String,
        notes: String,
        created_by: Option<UserId>,
        version: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            rfq_id,
            name,
            description,
            quote_ids,
            status,
            scoring_criteria,
            scores,
            price_differences,
            item_comparisons,
            best_overall_quote_id,
            best_price_quote_id,
            recommendation,
            notes,
            created_by,
            version,
            created_at,
            updated_at,
            completed_at,
        }
    }

    fn validate_name(name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("comparison name is required"));
        }
        Ok(())
    }

    fn validate_quote_ids(quote_ids: &[QuoteId]) -> DomainResult<()> {
        if quote_ids.len() < MIN_QUOTES {
            return Err(DomainError::validation(format!(
                "comparison requires at least {MIN_QUOTES} quotes, got {}",
                quote_ids.len()
            )));
        }
        let mut seen = HashSet::with_capacity(quote_ids.len());
        for id in quote_ids {
            if !seen.insert(id) {
                return Err(DomainError::validation(format!("duplicate quote id {id}")));
            }
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
        self.version = self.version.saturating_add(1);
    }

    fn transition_to(&mut self, target: ComparisonStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch();
        Ok(())
    }

    fn ensure_quotes_editable(&self, operation: &'static str) -> DomainResult<()> {
        if !self.status.allows_quote_changes() {
            return Err(DomainError::InvalidState {
                status: self.status,
                operation,
            });
        }
        Ok(())
    }

    fn ensure_not_archived(&self, operation: &'static str) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidState {
                status: self.status,
                operation,
            });
        }
        Ok(())
    }

    // ========== Accessors ==========

    /// Returns the comparison ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ComparisonId {
        self.id
    }

    /// Returns the owning tenant.
    #[inline]
    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the RFQ under comparison.
    #[inline]
    #[must_use]
    pub fn rfq_id(&self) -> RfqId {
        self.rfq_id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the quote ids in insertion order.
    #[inline]
    #[must_use]
    pub fn quote_ids(&self) -> &[QuoteId] {
        &self.quote_ids
    }

    /// Returns true if the quote is part of this comparison.
    #[must_use]
    pub fn contains_quote(&self, quote_id: QuoteId) -> bool {
        self.quote_ids.contains(&quote_id)
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> ComparisonStatus {
        self.status
    }

    /// Returns the scoring weights.
    #[inline]
    #[must_use]
    pub fn scoring_criteria(&self) -> &ScoringCriteria {
        &self.scoring_criteria
    }

    /// Returns the latest scores, best first.
    #[inline]
    #[must_use]
    pub fn scores(&self) -> &[QuoteScore] {
        &self.scores
    }

    /// Returns the score for one quote, if scored.
    #[must_use]
    pub fn score_for(&self, quote_id: QuoteId) -> Option<&QuoteScore> {
        self.scores.iter().find(|s| s.quote_id == quote_id)
    }

    /// Returns the latest price deltas.
    #[inline]
    #[must_use]
    pub fn price_differences(&self) -> &[PriceDifference] {
        &self.price_differences
    }

    /// Returns the latest line-item comparisons.
    #[inline]
    #[must_use]
    pub fn item_comparisons(&self) -> &[ItemComparison] {
        &self.item_comparisons
    }

    /// Returns the quote with the highest overall score.
    #[inline]
    #[must_use]
    pub fn best_overall_quote_id(&self) -> Option<QuoteId> {
        self.best_overall_quote_id
    }

    /// Returns the quote with the lowest total amount.
    #[inline]
    #[must_use]
    pub fn best_price_quote_id(&self) -> Option<QuoteId> {
        self.best_price_quote_id
    }

    /// Returns the overall recommendation text.
    #[inline]
    #[must_use]
    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Returns the reviewer notes.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns the creating user, if known.
    #[inline]
    #[must_use]
    pub fn created_by(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }

    /// Returns the version for optimistic locking.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns when this comparison was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when this comparison was last changed.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns when this comparison was completed, if it was.
    #[inline]
    #[must_use]
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Returns true once a scoring run has been recorded.
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.scores.is_empty()
    }

    // ========== State Transitions ==========

    /// Opens the comparison for review.
    ///
    /// Transitions: Draft → Active
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if not in Draft.
    /// Returns `DomainError::InsufficientQuotes` with fewer than two quotes.
    pub fn activate(&mut self) -> DomainResult<()> {
        if !self.status.can_transition_to(ComparisonStatus::Active) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: ComparisonStatus::Active,
            });
        }
        if self.quote_ids.len() < MIN_QUOTES {
            return Err(DomainError::InsufficientQuotes {
                minimum: MIN_QUOTES,
                actual: self.quote_ids.len(),
            });
        }
        self.transition_to(ComparisonStatus::Active)
    }

    /// Closes the review and stamps the completion time.
    ///
    /// Transitions: Active → Completed
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if not Active.
    pub fn complete(&mut self) -> DomainResult<()> {
        self.transition_to(ComparisonStatus::Completed)?;
        self.completed_at = Some(self.updated_at);
        Ok(())
    }

    /// Archives the comparison.
    ///
    /// Transitions: Draft/Active/Completed → Archived
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if already archived.
    pub fn archive(&mut self) -> DomainResult<()> {
        self.transition_to(ComparisonStatus::Archived)
    }

    // ========== Quote Set ==========

    /// Adds a quote to the comparison.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` once Completed or Archived.
    /// Returns `DomainError::DuplicateQuote` if already present.
    pub fn add_quote(&mut self, quote_id: QuoteId) -> DomainResult<()> {
        self.ensure_quotes_editable("add quotes to")?;
        if self.contains_quote(quote_id) {
            return Err(DomainError::DuplicateQuote(quote_id));
        }
        self.quote_ids.push(quote_id);
        self.touch();
        Ok(())
    }

    /// Removes a quote from the comparison.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` once Completed or Archived.
    /// Returns `DomainError::QuoteNotFound` if the quote is not present.
    /// Returns `DomainError::InsufficientQuotes` if fewer than two would remain.
    pub fn remove_quote(&mut self, quote_id: QuoteId) -> DomainResult<()> {
        self.ensure_quotes_editable("remove quotes from")?;
        let position = self
            .quote_ids
            .iter()
            .position(|id| *id == quote_id)
            .ok_or(DomainError::QuoteNotFound(quote_id))?;
        if self.quote_ids.len() <= MIN_QUOTES {
            return Err(DomainError::InsufficientQuotes {
                minimum: MIN_QUOTES,
                actual: self.quote_ids.len(),
            });
        }
        self.quote_ids.remove(position);
        self.touch();
        Ok(())
    }

    // ========== Settings ==========

    /// Replaces the scoring weights. Existing results are not rescored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCriteria` if the weights are invalid;
    /// the current weights are left untouched.
    pub fn update_scoring_criteria(&mut self, criteria: ScoringCriteria) -> DomainResult<()> {
        criteria.validate()?;
        self.scoring_criteria = criteria;
        self.touch();
        Ok(())
    }

    /// Replaces the reviewer notes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` once archived.
    pub fn update_notes(&mut self, notes: impl Into<String>) -> DomainResult<()> {
        self.ensure_not_archived("edit notes of")?;
        self.notes = notes.into();
        self.touch();
        Ok(())
    }

    /// Renames the comparison and replaces its description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` once archived.
    /// Returns `DomainError::ValidationError` if the name is blank.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> DomainResult<()> {
        self.ensure_not_archived("rename")?;
        let name = name.into();
        Self::validate_name(&name)?;
        self.name = name;
        self.description = description;
        self.touch();
        Ok(())
    }

    // ========== Results ==========

    /// Replaces the quote scores and refreshes the best-quote pointers.
    pub fn set_scores(&mut self, scores: Vec<QuoteScore>) {
        self.scores = scores;
        self.refresh_best_quotes();
        self.touch();
    }

    /// Replaces the price deltas and refreshes the best-quote pointers.
    pub fn set_price_differences(&mut self, price_differences: Vec<PriceDifference>) {
        self.price_differences = price_differences;
        self.refresh_best_quotes();
        self.touch();
    }

    /// Replaces the line-item comparisons.
    pub fn set_item_comparisons(&mut self, item_comparisons: Vec<ItemComparison>) {
        self.item_comparisons = item_comparisons;
        self.touch();
    }

    /// Replaces the overall recommendation text.
    pub fn set_recommendation(&mut self, recommendation: impl Into<String>) {
        self.recommendation = recommendation.into();
        self.touch();
    }

    /// Records a complete scoring run in one step.
    pub fn record_results(
        &mut self,
        scores: Vec<QuoteScore>,
        price_differences: Vec<PriceDifference>,
        item_comparisons: Vec<ItemComparison>,
        recommendation: impl Into<String>,
    ) {
        self.scores = scores;
        self.price_differences = price_differences;
        self.item_comparisons = item_comparisons;
        self.recommendation = recommendation.into();
        self.refresh_best_quotes();
        self.touch();
    }

    fn refresh_best_quotes(&mut self) {
        let mut best_overall: Option<&QuoteScore> = None;
        for score in &self.scores {
            if best_overall.is_none_or(|best| score.overall_score > best.overall_score) {
                best_overall = Some(score);
            }
        }
        self.best_overall_quote_id = best_overall.map(|s| s.quote_id);

        let mut best_price: Option<&PriceDifference> = None;
        for diff in &self.price_differences {
            if best_price.is_none_or(|best| diff.total_amount < best.total_amount) {
                best_price = Some(diff);
            }
        }
        self.best_price_quote_id = best_price.map(|d| d.quote_id);
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Comparison({} '{}' rfq={} quotes={} [{}])",
            self.id,
            self.name,
            self.rfq_id,
            self.quote_ids.len(),
            self.status
        )
    }
}

/// Builder for [`Comparison`].
#[derive(Debug, Clone)]
pub struct ComparisonBuilder {
    tenant_id: TenantId,
    rfq_id: RfqId,
    name: String,
    quote_ids: Vec<QuoteId>,
    description: Option<String>,
    scoring_criteria: ScoringCriteria,
    notes: String,
    created_by: Option<UserId>,
}

impl ComparisonBuilder {
    /// Creates a new builder with required fields.
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
            quote_ids,
            description: None,
            scoring_criteria: ScoringCriteria::default(),
            notes: String::new(),
            created_by: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial scoring weights.
    #[must_use]
    pub fn scoring_criteria(mut self, criteria: ScoringCriteria) -> Self {
        self.scoring_criteria = criteria;
        self
    }

    /// Sets the initial notes.
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sets the creating user.
    #[must_use]
    pub fn created_by(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }

    /// Builds the comparison with validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` for a blank name, fewer than
    /// two quotes or duplicate quote ids, and `DomainError::InvalidCriteria`
    /// for invalid weights.
    pub fn try_build(self) -> DomainResult<Comparison> {
        Comparison::validate_name(&self.name)?;
        Comparison::validate_quote_ids(&self.quote_ids)?;
        self.scoring_criteria.validate()?;

        let now = Timestamp::now();
        Ok(Comparison {
            id: ComparisonId::new_v4(),
            tenant_id: self.tenant_id,
            rfq_id: self.rfq_id,
            name: self.name,
            description: self.description,
            quote_ids: self.quote_ids,
            status: ComparisonStatus::Draft,
            scoring_criteria: self.scoring_criteria,
            scores: Vec::new(),
            price_differences: Vec::new(),
            item_comparisons: Vec::new(),
            best_overall_quote_id: None,
            best_price_quote_id: None,
            recommendation: String::new(),
            notes: self.notes,
            created_by: self.created_by,
            version: 1,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }
}
