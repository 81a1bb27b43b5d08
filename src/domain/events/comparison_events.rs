//! # Comparison Events
//!
//! Audit events for the comparison lifecycle.
//!
//! # Event Flow
//!
//! ```text
//! Created -> (QuoteAdded | QuoteRemoved | CriteriaUpdated | ScoresCalculated)*
//!         -> StatusChanged(draft -> active) -> ... -> StatusChanged(-> completed)
//!
//! At any point: StatusChanged(-> archived) | Deleted
//! ```

use crate::domain::entities::comparison::Comparison;
use crate::domain::events::domain_event::{DomainEvent, EventMetadata, EventType};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{
    ComparisonId, ComparisonStatus, EventId, QuoteId, RfqId, ScoringCriteria, TenantId, UserId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonEventKind {
    /// Comparison was created.
    Created {
        /// RFQ being compared.
        rfq_id: RfqId,
        /// Display name.
        name: String,
        /// Initial quote set.
        quote_ids: Vec<QuoteId>,
        /// Creator, if known.
        created_by: Option<UserId>,
    },
    /// A quote joined the set.
    QuoteAdded {
        /// The added quote.
        quote_id: QuoteId,
    },
    /// A quote left the set.
    QuoteRemoved {
        /// The removed quote.
        quote_id: QuoteId,
    },
    /// Scoring weights were replaced.
    CriteriaUpdated {
        /// Weights before the change.
        previous: ScoringCriteria,
        /// Weights after the change.
        current: ScoringCriteria,
    },
    /// A scoring run stored new results.
    ScoresCalculated {
        /// Number of quotes scored.
        quotes_scored: usize,
        /// Rank-1 quote.
        best_overall_quote_id: Option<QuoteId>,
        /// Cheapest quote.
        best_price_quote_id: Option<QuoteId>,
    },
    /// Lifecycle status changed.
    StatusChanged {
        /// Previous status.
        from: ComparisonStatus,
        /// New status.
        to: ComparisonStatus,
    },
    /// Comparison was deleted.
    Deleted,
}

/// An audit event for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event payload.
    #[serde(flatten)]
    pub kind: ComparisonEventKind,
}

impl ComparisonEvent {
    fn for_comparison(comparison: &Comparison, kind: ComparisonEventKind) -> Self {
        Self {
            metadata: EventMetadata::new(comparison.tenant_id().clone(), comparison.id()),
            kind,
        }
    }

    /// Event for a newly created comparison.
    #[must_use]
    pub fn created(comparison: &Comparison) -> Self {
        Self::for_comparison(
            comparison,
            ComparisonEventKind::Created {
                rfq_id: comparison.rfq_id(),
                name: comparison.name().to_string(),
                quote_ids: comparison.quote_ids().to_vec(),
                created_by: comparison.created_by().cloned(),
            },
        )
    }

    /// Event for a quote joining the set.
    #[must_use]
    pub fn quote_added(comparison: &Comparison, quote_id: QuoteId) -> Self {
        Self::for_comparison(comparison, ComparisonEventKind::QuoteAdded { quote_id })
    }

    /// Event for a quote leaving the set.
    #[must_use]
    pub fn quote_removed(comparison: &Comparison, quote_id: QuoteId) -> Self {
        Self::for_comparison(comparison, ComparisonEventKind::QuoteRemoved { quote_id })
    }

    /// Event for replaced scoring weights.
    #[must_use]
    pub fn criteria_updated(comparison: &Comparison, previous: ScoringCriteria) -> Self {
        Self::for_comparison(
            comparison,
            ComparisonEventKind::CriteriaUpdated {
                previous,
                current: *comparison.scoring_criteria(),
            },
        )
    }

    /// Event for a completed scoring run.
    #[must_use]
    pub fn scores_calculated(comparison: &Comparison) -> Self {
        Self::for_comparison(
            comparison,
            ComparisonEventKind::ScoresCalculated {
                quotes_scored: comparison.scores().len(),
                best_overall_quote_id: comparison.best_overall_quote_id(),
                best_price_quote_id: comparison.best_price_quote_id(),
            },
        )
    }

    /// Event for a status change.
    #[must_use]
    pub fn status_changed(comparison: &Comparison, from: ComparisonStatus) -> Self {
        Self::for_comparison(
            comparison,
            ComparisonEventKind::StatusChanged {
                from,
                to: comparison.status(),
            },
        )
    }

    /// Event for a deleted comparison.
    #[must_use]
    pub fn deleted(tenant_id: TenantId, comparison_id: ComparisonId) -> Self {
        Self {
            metadata: EventMetadata::new(tenant_id, comparison_id),
            kind: ComparisonEventKind::Deleted,
        }
    }
}

impl DomainEvent for ComparisonEvent {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn comparison_id(&self) -> ComparisonId {
        self.metadata.comparison_id
    }

    fn tenant_id(&self) -> &TenantId {
        &self.metadata.tenant_id
    }

    fn timestamp(&self) -> Timestamp {
        self.metadata.timestamp
    }

    fn event_type(&self) -> EventType {
        match self.kind {
            ComparisonEventKind::Created { .. }
            | ComparisonEventKind::StatusChanged { .. }
            | ComparisonEventKind::Deleted => EventType::Lifecycle,
            ComparisonEventKind::QuoteAdded { .. } | ComparisonEventKind::QuoteRemoved { .. } => {
                EventType::Quotes
            }
            ComparisonEventKind::CriteriaUpdated { .. } => EventType::Criteria,
            ComparisonEventKind::ScoresCalculated { .. } => EventType::Scoring,
        }
    }

    fn event_name(&self) -> &'static str {
        match self.kind {
            ComparisonEventKind::Created { .. } => "ComparisonCreated",
            ComparisonEventKind::QuoteAdded { .. } => "QuoteAdded",
            ComparisonEventKind::QuoteRemoved { .. } => "QuoteRemoved",
            ComparisonEventKind::CriteriaUpdated { .. } => "CriteriaUpdated",
            ComparisonEventKind::ScoresCalculated { .. } => "ScoresCalculated",
            ComparisonEventKind::StatusChanged { .. } => "StatusChanged",
            ComparisonEventKind::Deleted => "ComparisonDeleted",
        }
    }
}

impl fmt::Display for ComparisonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(comparison={} tenant={})",
            self.event_name(),
            self.metadata.comparison_id,
            self.metadata.tenant_id
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn comparison() -> Comparison {
        Comparison::new(
            TenantId::new("t1"),
            RfqId::new_v4(),
            "Imaging refresh",
            vec![QuoteId::new_v4(), QuoteId::new_v4()],
        )
        .unwrap()
    }

    #[test]
    fn created_copies_aggregate_fields() {
        let c = comparison();
        let event = ComparisonEvent::created(&c);
        assert_eq!(event.comparison_id(), c.id());
        assert_eq!(event.tenant_id(), c.tenant_id());
        assert_eq!(event.event_type(), EventType::Lifecycle);
        assert_eq!(event.event_name(), "ComparisonCreated");
        match event.kind {
            ComparisonEventKind::Created { quote_ids, .. } => assert_eq!(quote_ids.len(), 2),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn status_changed_records_both_ends() {
        let mut c = comparison();
        c.activate().unwrap();
        let event = ComparisonEvent::status_changed(&c, ComparisonStatus::Draft);
        assert_eq!(
            event.kind,
            ComparisonEventKind::StatusChanged {
                from: ComparisonStatus::Draft,
                to: ComparisonStatus::Active,
            }
        );
    }

    #[test]
    fn event_types_by_kind() {
        let c = comparison();
        let quote_id = QuoteId::new_v4();
        assert_eq!(
            ComparisonEvent::quote_added(&c, quote_id).event_type(),
            EventType::Quotes
        );
        assert_eq!(
            ComparisonEvent::criteria_updated(&c, ScoringCriteria::default()).event_type(),
            EventType::Criteria
        );
        assert_eq!(
            ComparisonEvent::scores_calculated(&c).event_type(),
            EventType::Scoring
        );
        assert_eq!(
            ComparisonEvent::deleted(c.tenant_id().clone(), c.id()).event_name(),
            "ComparisonDeleted"
        );
    }

    #[test]
    fn serializes_flat_with_kind_tag() {
        let c = comparison();
        let quote_id = QuoteId::new_v4();
        let event = ComparisonEvent::quote_removed(&c, quote_id);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "quote_removed");
        assert_eq!(json["quote_id"], quote_id.to_string());
        let back: ComparisonEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn display_names_event_and_comparison() {
        let c = comparison();
        let text = ComparisonEvent::created(&c).to_string();
        assert!(text.starts_with("ComparisonCreated(comparison="));
        assert!(text.contains("tenant=t1"));
    }
}
