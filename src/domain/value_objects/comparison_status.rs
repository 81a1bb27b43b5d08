//! # Comparison Status
//!
//! Lifecycle state machine for a quote comparison.
//!
//! # State Machine
//!
//! ```text
//! Draft → Active → Completed
//!   ↓       ↓          ↓
//!   └───────┴──────────┴→ Archived
//! ```
//!
//! `Archived` is terminal. `Completed` still allows archiving but no
//! further edits to the quote set.
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::value_objects::ComparisonStatus;
//!
//! let status = ComparisonStatus::Draft;
//! assert!(status.can_transition_to(ComparisonStatus::Active));
//! assert!(!status.can_transition_to(ComparisonStatus::Completed));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    /// Being assembled; quotes and weights may change freely.
    #[default]
    Draft,
    /// Under review by the buying team.
    Active,
    /// Decision made; the quote set is frozen.
    Completed,
    /// Retired from view (terminal).
    Archived,
}

impl ComparisonStatus {
    /// Returns true if this state can transition to `target`.
    ///
    /// - Draft → Active, Archived
    /// - Active → Completed, Archived
    /// - Completed → Archived
    /// - Archived → (none)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Active)
                | (Self::Draft, Self::Archived)
                | (Self::Active, Self::Completed)
                | (Self::Active, Self::Archived)
                | (Self::Completed, Self::Archived)
        )
    }

    /// Returns true if quotes may still be added or removed.
    #[inline]
    #[must_use]
    pub const fn allows_quote_changes(&self) -> bool {
        matches!(self, Self::Draft | Self::Active)
    }

    /// Returns true if this is the terminal state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidComparisonStatusError(
    /// The rejected input.
    pub String,
);

impl fmt::Display for InvalidComparisonStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid comparison status: {}", self.0)
    }
}

impl std::error::Error for InvalidComparisonStatusError {}

impl FromStr for ComparisonStatus {
    type Err = InvalidComparisonStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(InvalidComparisonStatusError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ALL: [ComparisonStatus; 4] = [
        ComparisonStatus::Draft,
        ComparisonStatus::Active,
        ComparisonStatus::Completed,
        ComparisonStatus::Archived,
    ];

    #[test]
    fn default_is_draft() {
        assert_eq!(ComparisonStatus::default(), ComparisonStatus::Draft);
    }

    #[test]
    fn forward_transitions() {
        assert!(ComparisonStatus::Draft.can_transition_to(ComparisonStatus::Active));
        assert!(ComparisonStatus::Active.can_transition_to(ComparisonStatus::Completed));
        assert!(!ComparisonStatus::Draft.can_transition_to(ComparisonStatus::Completed));
        assert!(!ComparisonStatus::Completed.can_transition_to(ComparisonStatus::Active));
    }

    #[test]
    fn archive_reachable_from_every_non_archived_state() {
        for status in ALL {
            let expected = status != ComparisonStatus::Archived;
            assert_eq!(
                status.can_transition_to(ComparisonStatus::Archived),
                expected,
                "{status}"
            );
        }
    }

    #[test]
    fn archived_is_terminal() {
        for target in ALL {
            assert!(!ComparisonStatus::Archived.can_transition_to(target));
        }
        assert!(ComparisonStatus::Archived.is_terminal());
    }

    #[test]
    fn quote_changes_only_while_open() {
        assert!(ComparisonStatus::Draft.allows_quote_changes());
        assert!(ComparisonStatus::Active.allows_quote_changes());
        assert!(!ComparisonStatus::Completed.allows_quote_changes());
        assert!(!ComparisonStatus::Archived.allows_quote_changes());
    }

    #[test]
    fn parse_and_display() {
        for status in ALL {
            assert_eq!(status.to_string().parse::<ComparisonStatus>().unwrap(), status);
        }
        assert_eq!(
            "ACTIVE".parse::<ComparisonStatus>().unwrap(),
            ComparisonStatus::Active
        );
        assert!("deleted".parse::<ComparisonStatus>().is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&ComparisonStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
