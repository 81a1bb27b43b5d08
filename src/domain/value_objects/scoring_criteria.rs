//! # Scoring Criteria
//!
//! The four weighted axes a quote is judged on and the weights that
//! combine them into an overall score.
//!
//! Weights are percentages. Each must lie in `[0, 100]` and together they
//! must sum to 100 within [`WEIGHT_SUM_TOLERANCE`].
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::value_objects::{Criterion, ScoringCriteria};
//!
//! let criteria = ScoringCriteria::new(50.0, 25.0, 15.0, 10.0).unwrap();
//! assert_eq!(criteria.weight(Criterion::Price), 50.0);
//!
//! assert!(ScoringCriteria::new(40.0, 30.0, 20.0, 9.0).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowed deviation of the weight sum from 100.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.1;

/// Default price weight.
pub const DEFAULT_PRICE_WEIGHT: f64 = 40.0;
/// Default quality weight.
pub const DEFAULT_QUALITY_WEIGHT: f64 = 30.0;
/// Default delivery weight.
pub const DEFAULT_DELIVERY_WEIGHT: f64 = 20.0;
/// Default compliance weight.
pub const DEFAULT_COMPLIANCE_WEIGHT: f64 = 10.0;

/// A scoring axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Total amount relative to the other quotes.
    Price,
    /// Warranty, manufacturer reputation and specification completeness.
    Quality,
    /// Promised delivery timeframes.
    Delivery,
    /// Regulatory certifications on line items.
    Compliance,
}

impl Criterion {
    /// All criteria in reporting order.
    pub const ALL: [Criterion; 4] = [
        Criterion::Price,
        Criterion::Quality,
        Criterion::Delivery,
        Criterion::Compliance,
    ];

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Quality => "quality",
            Self::Delivery => "delivery",
            Self::Compliance => "compliance",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weights applied to each [`Criterion`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoringCriteria {
    /// Price weight (0-100).
    pub price_weight: f64,
    /// Quality weight (0-100).
    pub quality_weight: f64,
    /// Delivery weight (0-100).
    pub delivery_weight: f64,
    /// Compliance weight (0-100).
    pub compliance_weight: f64,
}

impl Default for ScoringCriteria {
    fn default() -> Self {
        Self {
            price_weight: DEFAULT_PRICE_WEIGHT,
            quality_weight: DEFAULT_QUALITY_WEIGHT,
            delivery_weight: DEFAULT_DELIVERY_WEIGHT,
            compliance_weight: DEFAULT_COMPLIANCE_WEIGHT,
        }
    }
}

impl ScoringCriteria {
    /// Creates validated criteria.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCriteria` if any weight is outside
    /// `[0, 100]` or the weights do not sum to 100 within tolerance.
    pub fn new(
        price_weight: f64,
        quality_weight: f64,
        delivery_weight: f64,
        compliance_weight: f64,
    ) -> DomainResult<Self> {
        let criteria = Self {
            price_weight,
            quality_weight,
            delivery_weight,
            compliance_weight,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Checks weight ranges and the weight sum.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCriteria` describing the first problem found.
    pub fn validate(&self) -> DomainResult<()> {
        for criterion in Criterion::ALL {
            let weight = self.weight(criterion);
            if !weight.is_finite() || !(0.0..=100.0).contains(&weight) {
                return Err(DomainError::invalid_criteria(format!(
                    "{criterion} weight must be between 0 and 100, got {weight}"
                )));
            }
        }

        let total = self.total();
        if (total - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::invalid_criteria(format!(
                "weights must sum to 100, got {total:.1}"
            )));
        }
        Ok(())
    }

    /// Returns the weight for a criterion.
    #[must_use]
    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Price => self.price_weight,
            Criterion::Quality => self.quality_weight,
            Criterion::Delivery => self.delivery_weight,
            Criterion::Compliance => self.compliance_weight,
        }
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        Criterion::ALL.iter().map(|c| self.weight(*c)).sum()
    }
}

impl fmt::Display for ScoringCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "price={} quality={} delivery={} compliance={}",
            self.price_weight, self.quality_weight, self.delivery_weight, self.compliance_weight
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let criteria = ScoringCriteria::default();
        assert_eq!(criteria.price_weight, 40.0);
        assert_eq!(criteria.quality_weight, 30.0);
        assert_eq!(criteria.delivery_weight, 20.0);
        assert_eq!(criteria.compliance_weight, 10.0);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn accepts_sum_within_tolerance() {
        assert!(ScoringCriteria::new(40.05, 30.0, 20.0, 10.0).is_ok());
        assert!(ScoringCriteria::new(39.95, 30.0, 20.0, 10.0).is_ok());
    }

    #[test]
    fn rejects_sum_of_99() {
        let err = ScoringCriteria::new(40.0, 30.0, 20.0, 9.0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCriteria(_)));
        assert!(err.to_string().contains("99.0"));
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let err = ScoringCriteria::new(120.0, -20.0, 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn rejects_nan() {
        assert!(ScoringCriteria::new(f64::NAN, 30.0, 20.0, 50.0).is_err());
    }

    #[test]
    fn weight_lookup_matches_fields() {
        let criteria = ScoringCriteria::new(25.0, 25.0, 25.0, 25.0).unwrap();
        for criterion in Criterion::ALL {
            assert_eq!(criteria.weight(criterion), 25.0);
        }
        assert_eq!(criteria.total(), 100.0);
    }

    #[test]
    fn serializes_with_weight_field_names() {
        let json = serde_json::to_value(ScoringCriteria::default()).unwrap();
        assert_eq!(json["price_weight"], 40.0);
        assert_eq!(json["compliance_weight"], 10.0);
    }
}
