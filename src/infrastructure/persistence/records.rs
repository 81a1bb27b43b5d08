//! # Comparison Records
//!
//! Flat storage representation of the comparison aggregate.
//!
//! Scalar columns hold identifiers, status and timestamps. Weights and all
//! scoring output are kept as JSON blobs whose field names are the
//! serialization contract of the value types.

use crate::domain::entities::comparison::Comparison;
use crate::domain::value_objects::{
    ComparisonId, ComparisonStatus, QuoteId, RfqId, TenantId, Timestamp, UserId,
};
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One stored comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Comparison id.
    pub id: String,
    /// Owning tenant.
    pub tenant_id: String,
    /// RFQ id.
    pub rfq_id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Member quote ids.
    pub quote_ids: Vec<String>,
    /// Lowercase status name.
    pub status: String,
    /// `ScoringCriteria` blob.
    pub scoring_criteria: serde_json::Value,
    /// `QuoteScore` list blob.
    pub scores: serde_json::Value,
    /// `PriceDifference` list blob.
    pub price_differences: serde_json::Value,
    /// `ItemComparison` list blob.
    pub item_comparisons: serde_json::Value,
    /// Rank-1 quote id.
    pub best_overall_quote_id: Option<String>,
    /// Cheapest quote id.
    pub best_price_quote_id: Option<String>,
    /// Overall recommendation.
    pub recommendation: String,
    /// Free-form notes.
    pub notes: String,
    /// Creator.
    pub created_by: Option<String>,
    /// Optimistic concurrency version.
    pub version: u64,
    /// Creation time, Unix millis.
    pub created_at: i64,
    /// Last update, Unix millis.
    pub updated_at: i64,
    /// Completion time, Unix millis.
    pub completed_at: Option<i64>,
}

impl ComparisonRecord {
    /// Flattens a comparison for storage.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if a blob cannot be encoded.
    pub fn from_comparison(comparison: &Comparison) -> RepositoryResult<Self> {
        Ok(Self {
            id: comparison.id().to_string(),
            tenant_id: comparison.tenant_id().to_string(),
            rfq_id: comparison.rfq_id().to_string(),
            name: comparison.name().to_string(),
            description: comparison.description().map(str::to_string),
            quote_ids: comparison.quote_ids().iter().map(ToString::to_string).collect(),
            status: comparison.status().as_str().to_string(),
            scoring_criteria: serde_json::to_value(comparison.scoring_criteria())?,
            scores: serde_json::to_value(comparison.scores())?,
            price_differences: serde_json::to_value(comparison.price_differences())?,
            item_comparisons: serde_json::to_value(comparison.item_comparisons())?,
            best_overall_quote_id: comparison.best_overall_quote_id().map(|id| id.to_string()),
            best_price_quote_id: comparison.best_price_quote_id().map(|id| id.to_string()),
            recommendation: comparison.recommendation().to_string(),
            notes: comparison.notes().to_string(),
            created_by: comparison.created_by().map(ToString::to_string),
            version: comparison.version(),
            created_at: comparison.created_at().timestamp_millis(),
            updated_at: comparison.updated_at().timestamp_millis(),
            completed_at: comparison.completed_at().map(|t| t.timestamp_millis()),
        })
    }

    /// Rebuilds the aggregate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if an id, status, timestamp
    /// or blob cannot be decoded.
    pub fn try_into_comparison(self) -> RepositoryResult<Comparison> {
        let id = parse_id::<ComparisonId>(&self.id)?;
        let rfq_id = parse_id::<RfqId>(&self.rfq_id)?;
        let quote_ids = self
            .quote_ids
            .iter()
            .map(|s| parse_id::<QuoteId>(s))
            .collect::<RepositoryResult<Vec<_>>>()?;
        let status = ComparisonStatus::from_str(&self.status)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let best_overall_quote_id = self
            .best_overall_quote_id
            .as_deref()
            .map(parse_id::<QuoteId>)
            .transpose()?;
        let best_price_quote_id = self
            .best_price_quote_id
            .as_deref()
            .map(parse_id::<QuoteId>)
            .transpose()?;
        let completed_at = self.completed_at.map(parse_millis).transpose()?;

        Ok(Comparison::from_parts(
            id,
            TenantId::new(self.tenant_id),
            rfq_id,
            self.name,
            self.description,
            quote_ids,
            status,
            serde_json::from_value(self.scoring_criteria)?,
            serde_json::from_value(self.scores)?,
            serde_json::from_value(self.price_differences)?,
            serde_json::from_value(self.item_comparisons)?,
            best_overall_quote_id,
            best_price_quote_id,
            self.recommendation,
            self.notes,
            self.created_by.map(UserId::new),
            self.version,
            parse_millis(self.created_at)?,
            parse_millis(self.updated_at)?,
            completed_at,
        ))
    }
}

fn parse_id<T>(value: &str) -> RepositoryResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| RepositoryError::serialization(format!("invalid id {value:?}: {e}")))
}

fn parse_millis(millis: i64) -> RepositoryResult<Timestamp> {
    Timestamp::from_millis(millis)
        .ok_or_else(|| RepositoryError::serialization(format!("invalid timestamp {millis}")))
}
