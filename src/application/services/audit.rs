//! # Audit Observers
//!
//! Receivers for comparison audit events.
//!
//! The service hands every event to its observer after the change has been
//! saved. Observers cannot fail the operation; a failing sink should log
//! and move on.

use crate::domain::events::{ComparisonEvent, DomainEvent};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Receives audit events from the comparison service.
pub trait ComparisonObserver: Send + Sync + fmt::Debug {
    /// Handles one event. Must not block for long.
    fn on_event(&self, event: &ComparisonEvent);
}

/// Logs every event at `info` level with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Creates a new tracing observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ComparisonObserver for TracingObserver {
    fn on_event(&self, event: &ComparisonEvent) {
        info!(
            event_id = %event.event_id(),
            event = event.event_name(),
            event_type = %event.event_type(),
            comparison_id = %event.comparison_id(),
            tenant_id = %event.tenant_id(),
            "comparison audit event"
        );
    }
}

/// Keeps events in memory, for tests and local inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ComparisonEvent>>>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<ComparisonEvent> {
        self.events.lock().clone()
    }

    /// Returns the recorded event names, oldest first.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.event_name()).collect()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ComparisonObserver for RecordingObserver {
    fn on_event(&self, event: &ComparisonEvent) {
        self.events.lock().push(event.clone());
    }
}
