//! # Domain Event Trait
//!
//! Base trait for all domain events.
//!
//! This module provides the [`DomainEvent`] trait that all domain events
//! must implement, along with common event metadata.

use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{ComparisonId, EventId, TenantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of domain event.
///
/// Categorizes events by the part of the comparison they touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Creation, status changes and deletion.
    Lifecycle,
    /// Quote set membership.
    Quotes,
    /// Scoring weights.
    Criteria,
    /// Scoring runs.
    Scoring,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lifecycle => write!(f, "LIFECYCLE"),
            Self::Quotes => write!(f, "QUOTES"),
            Self::Criteria => write!(f, "CRITERIA"),
            Self::Scoring => write!(f, "SCORING"),
        }
    }
}

/// Trait for all domain events.
///
/// Domain events are immutable records of something that happened to a
/// comparison. They are handed to observers for auditing.
pub trait DomainEvent: Send + Sync + fmt::Debug {
    /// Returns the unique identifier for this event.
    fn event_id(&self) -> EventId;

    /// Returns the comparison this event relates to.
    fn comparison_id(&self) -> ComparisonId;

    /// Returns the owning tenant.
    fn tenant_id(&self) -> &TenantId;

    /// Returns when this event occurred.
    fn timestamp(&self) -> Timestamp;

    /// Returns the type/category of this event.
    fn event_type(&self) -> EventType;

    /// Returns the human-readable name of this event.
    fn event_name(&self) -> &'static str;
}

/// Common metadata for all domain events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique identifier for this event.
    pub event_id: EventId,
    /// The comparison this event relates to.
    pub comparison_id: ComparisonId,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// When this event occurred.
    pub timestamp: Timestamp,
}

impl EventMetadata {
    /// Creates new event metadata with a generated event ID.
    #[must_use]
    pub fn new(tenant_id: TenantId, comparison_id: ComparisonId) -> Self {
        Self {
            event_id: EventId::new_v4(),
            comparison_id,
            tenant_id,
            timestamp: Timestamp::now(),
        }
    }

    /// Creates event metadata with specific values (for reconstruction).
    #[must_use]
    pub fn from_parts(
        event_id: EventId,
        comparison_id: ComparisonId,
        tenant_id: TenantId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            event_id,
            comparison_id,
            tenant_id,
            timestamp,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn event_type_display() {
        assert_eq!(EventType::Lifecycle.to_string(), "LIFECYCLE");
        assert_eq!(EventType::Quotes.to_string(), "QUOTES");
        assert_eq!(EventType::Criteria.to_string(), "CRITERIA");
        assert_eq!(EventType::Scoring.to_string(), "SCORING");
    }

    #[test]
    fn event_type_serializes_screaming_case() {
        let json = serde_json::to_string(&EventType::Lifecycle).unwrap();
        assert_eq!(json, "\"LIFECYCLE\"");
    }

    #[test]
    fn event_metadata_new_generates_ids() {
        let comparison_id = ComparisonId::new_v4();
        let a = EventMetadata::new(TenantId::new("t1"), comparison_id);
        let b = EventMetadata::new(TenantId::new("t1"), comparison_id);
        assert_eq!(a.comparison_id, comparison_id);
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn event_metadata_from_parts_keeps_values() {
        let event_id = EventId::new_v4();
        let comparison_id = ComparisonId::new_v4();
        let timestamp = Timestamp::from_millis(1_704_067_200_000).unwrap();
        let metadata =
            EventMetadata::from_parts(event_id, comparison_id, TenantId::new("t1"), timestamp);
        assert_eq!(metadata.event_id, event_id);
        assert_eq!(metadata.comparison_id, comparison_id);
        assert_eq!(metadata.tenant_id, TenantId::new("t1"));
        assert_eq!(metadata.timestamp, timestamp);
    }

    #[test]
    fn event_metadata_serde_roundtrip() {
        let metadata = EventMetadata::new(TenantId::new("t1"), ComparisonId::new_v4());
        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: EventMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(metadata, deserialized);
    }
}
