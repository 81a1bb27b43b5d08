//! # Comparison Results
//!
//! Output records of a scoring run: per-quote scores, price deltas and
//! cross-quote line-item breakdowns.
//!
//! These types are stored as JSON blobs alongside the comparison, so their
//! field names are a storage contract. Rename nothing without a migration.

use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{Criterion, QuoteId, SupplierId};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Score card for one quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuoteScore {
    /// Scored quote.
    pub quote_id: QuoteId,
    /// Human-facing quote number.
    pub quote_number: String,
    /// Issuing supplier.
    pub supplier_id: SupplierId,
    /// Supplier display name.
    pub supplier_name: String,
    /// Price sub-score (0-100).
    pub price_score: f64,
    /// Quality sub-score (0-100).
    pub quality_score: f64,
    /// Delivery sub-score (0-100).
    pub delivery_score: f64,
    /// Compliance sub-score (0-100).
    pub compliance_score: f64,
    /// Weighted overall score (0-100).
    pub overall_score: f64,
    /// Rank within the comparison (1 = best). Zero until ranked.
    pub rank: usize,
    /// Axes scoring 80 or more.
    pub strengths: Vec<String>,
    /// Axes scoring below 50.
    pub weaknesses: Vec<String>,
    /// Rank-dependent advice.
    pub recommendation: String,
    /// When this score was computed.
    pub calculated_at: Timestamp,
}

impl QuoteScore {
    /// Returns the sub-score for a criterion.
    #[must_use]
    pub fn score(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Price => self.price_score,
            Criterion::Quality => self.quality_score,
            Criterion::Delivery => self.delivery_score,
            Criterion::Compliance => self.compliance_score,
        }
    }

    /// Returns true if this quote ranked first.
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for QuoteScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuoteScore(#{} {} {} overall={:.1})",
            self.rank, self.quote_number, self.supplier_name, self.overall_score
        )
    }
}

/// Distance of a quote's total from the cheapest quote in the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceDifference {
    /// Quote the delta refers to.
    pub quote_id: QuoteId,
    /// The quote's total amount.
    pub total_amount: Decimal,
    /// `total_amount - lowest_total`.
    pub difference: Decimal,
    /// Difference as a percentage of the lowest total (0 when that total is 0).
    pub percentage_diff: f64,
}

impl PriceDifference {
    /// Returns true if this quote is (one of) the cheapest.
    #[must_use]
    pub fn is_lowest(&self) -> bool {
        self.difference.is_zero()
    }
}

/// One quote's offer for a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItemDetails {
    /// Quantity offered.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line total.
    pub total_price: Decimal,
    /// Free-text delivery promise.
    pub delivery_timeframe: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Manufacturer model number.
    pub model_number: String,
    /// Specification text.
    pub specifications: String,
    /// Certification text.
    pub certifications: String,
}

/// Side-by-side view of one piece of equipment across quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItemComparison {
    /// Equipment identifier, or the equipment name when the quote had none.
    pub equipment_id: String,
    /// Equipment display name.
    pub equipment_name: String,
    /// Offer details keyed by quote.
    pub quotes: BTreeMap<QuoteId, ItemDetails>,
}

impl ItemComparison {
    /// Returns the number of quotes offering this item.
    #[must_use]
    pub fn quote_count(&self) -> usize {
        self.quotes.len()
    }

    /// Returns the quote with the lowest unit price, if any.
    #[must_use]
    pub fn lowest_unit_price(&self) -> Option<(QuoteId, Decimal)> {
        self.quotes
            .iter()
            .min_by(|a, b| a.1.unit_price.cmp(&b.1.unit_price))
            .map(|(id, details)| (*id, details.unit_price))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_score() -> QuoteScore {
        QuoteScore {
            quote_id: QuoteId::new_v4(),
            quote_number: "Q-1".to_string(),
            supplier_id: SupplierId::new("sup-1"),
            supplier_name: "Acme Medical".to_string(),
            price_score: 100.0,
            quality_score: 60.0,
            delivery_score: 50.0,
            compliance_score: 0.0,
            overall_score: 68.0,
            rank: 1,
            strengths: vec!["Competitive pricing".to_string()],
            weaknesses: vec![],
            recommendation: String::new(),
            calculated_at: Timestamp::now(),
        }
    }

    fn details(unit_price: i64) -> ItemDetails {
        ItemDetails {
            quantity: 1,
            unit_price: Decimal::from(unit_price),
            total_price: Decimal::from(unit_price),
            delivery_timeframe: "2 weeks".to_string(),
            manufacturer: "Philips".to_string(),
            model_number: "X1".to_string(),
            specifications: "spec".to_string(),
            certifications: "FDA".to_string(),
        }
    }

    #[test]
    fn score_lookup_by_criterion() {
        let score = sample_score();
        assert_eq!(score.score(Criterion::Price), 100.0);
        assert_eq!(score.score(Criterion::Compliance), 0.0);
        assert!(score.is_best());
    }

    #[test]
    fn quote_score_field_names_are_stable() {
        let json = serde_json::to_value(sample_score()).unwrap();
        for field in [
            "quote_id",
            "quote_number",
            "supplier_id",
            "supplier_name",
            "price_score",
            "quality_score",
            "delivery_score",
            "compliance_score",
            "overall_score",
            "rank",
            "strengths",
            "weaknesses",
            "recommendation",
            "calculated_at",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn price_difference_lowest() {
        let diff = PriceDifference {
            quote_id: QuoteId::new_v4(),
            total_amount: Decimal::from(1000),
            difference: Decimal::ZERO,
            percentage_diff: 0.0,
        };
        assert!(diff.is_lowest());
    }

    #[test]
    fn item_comparison_lowest_unit_price() {
        let cheap = QuoteId::new_v4();
        let pricey = QuoteId::new_v4();
        let mut quotes = BTreeMap::new();
        quotes.insert(pricey, details(900));
        quotes.insert(cheap, details(700));

        let item = ItemComparison {
            equipment_id: "EQ-1".to_string(),
            equipment_name: "Ventilator".to_string(),
            quotes,
        };

        assert_eq!(item.quote_count(), 2);
        assert_eq!(item.lowest_unit_price(), Some((cheap, Decimal::from(700))));
    }
}
