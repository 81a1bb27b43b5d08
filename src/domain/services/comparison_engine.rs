//! # Comparison Engine
//!
//! Runs a full evaluation of a quote set.
//!
//! The [`ComparisonEngine`] scores every quote, ranks the scores with its
//! [`RankingStrategy`], computes price deltas and item comparisons, and
//! writes the overall recommendation. It holds no state between runs.
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::entities::QuoteRecord;
//! use procure_compare::domain::services::ComparisonEngine;
//! use procure_compare::domain::value_objects::{QuoteId, ScoringCriteria, SupplierId};
//! use rust_decimal::Decimal;
//!
//! let quotes = vec![
//!     QuoteRecord::builder(QuoteId::new_v4(), "Q-1", SupplierId::new("a"), "Alpha")
//!         .total_amount(Decimal::from(2000))
//!         .build(),
//!     QuoteRecord::builder(QuoteId::new_v4(), "Q-2", SupplierId::new("b"), "Beta")
//!         .total_amount(Decimal::from(1000))
//!         .build(),
//! ];
//!
//! let outcome = ComparisonEngine::default()
//!     .evaluate(&quotes, &ScoringCriteria::default())
//!     .unwrap();
//! assert_eq!(outcome.best().map(|s| s.quote_number.as_str()), Some("Q-2"));
//! ```

use crate::domain::entities::quote::QuoteRecord;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::price_analysis::{item_comparisons, price_differences};
use crate::domain::services::ranking::{OverallScoreRanking, RankingStrategy, overall_recommendation};
use crate::domain::services::scoring::score_quotes;
use crate::domain::value_objects::{
    ItemComparison, PriceDifference, QuoteId, QuoteScore, ScoringCriteria,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Everything one evaluation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOutcome {
    /// Scores in ranked order (rank 1 first).
    pub scores: Vec<QuoteScore>,
    /// Price deltas in input order.
    pub price_differences: Vec<PriceDifference>,
    /// Line items grouped by equipment, first-seen order.
    pub item_comparisons: Vec<ItemComparison>,
    /// Narrative recommendation.
    pub recommendation: String,
}

impl ComparisonOutcome {
    /// Returns the rank-1 score.
    #[must_use]
    pub fn best(&self) -> Option<&QuoteScore> {
        self.scores.iter().find(|s| s.is_best())
    }

    /// Returns the score for a quote.
    #[must_use]
    pub fn score_for(&self, quote_id: QuoteId) -> Option<&QuoteScore> {
        self.scores.iter().find(|s| s.quote_id == quote_id)
    }
}

/// Evaluates quote sets against scoring criteria.
#[derive(Clone)]
pub struct ComparisonEngine {
    ranking_strategy: Arc<dyn RankingStrategy>,
}

impl ComparisonEngine {
    /// Creates an engine with the given ranking strategy.
    #[must_use]
    pub fn new(ranking_strategy: Arc<dyn RankingStrategy>) -> Self {
        Self { ranking_strategy }
    }

    /// Returns the ranking strategy in use.
    #[must_use]
    pub fn ranking_strategy(&self) -> &dyn RankingStrategy {
        self.ranking_strategy.as_ref()
    }

    /// Scores, ranks and analyses `quotes`.
    ///
    /// `criteria` is expected to be valid; the aggregate validates weights
    /// before they are stored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoQuotes` if `quotes` is empty.
    pub fn evaluate(
        &self,
        quotes: &[QuoteRecord],
        criteria: &ScoringCriteria,
    ) -> DomainResult<ComparisonOutcome> {
        if quotes.is_empty() {
            return Err(DomainError::NoQuotes);
        }

        debug!(
            quotes = quotes.len(),
            criteria = %criteria,
            strategy = self.ranking_strategy.name(),
            "evaluating quotes"
        );

        let scores = self.ranking_strategy.rank(score_quotes(quotes, criteria)?);
        let recommendation = overall_recommendation(&scores, criteria);
        let outcome = ComparisonOutcome {
            price_differences: price_differences(quotes),
            item_comparisons: item_comparisons(quotes),
            scores,
            recommendation,
        };

        if let Some(best) = outcome.best() {
            debug!(
                quote_id = %best.quote_id,
                overall_score = best.overall_score,
                items = outcome.item_comparisons.len(),
                "evaluation complete"
            );
        }

        Ok(outcome)
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(Arc::new(OverallScoreRanking::new()))
    }
}

impl fmt::Debug for ComparisonEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonEngine")
            .field("ranking_strategy", &self.ranking_strategy.name())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::quote::QuoteLineItem;
    use crate::domain::value_objects::SupplierId;
    use rust_decimal::Decimal;

    fn quote(number: &str, amount: i64) -> QuoteRecord {
        QuoteRecord::builder(QuoteId::new_v4(), number, SupplierId::new(number), number)
            .total_amount(Decimal::from(amount))
            .build()
    }

    #[test]
    fn empty_quotes_rejected() {
        let result = ComparisonEngine::default().evaluate(&[], &ScoringCriteria::default());
        assert_eq!(result.unwrap_err(), DomainError::NoQuotes);
    }

    #[test]
    fn cheaper_quote_wins_without_items() {
        let quotes = vec![quote("Q-1", 1000), quote("Q-2", 2000)];
        let outcome = ComparisonEngine::default()
            .evaluate(&quotes, &ScoringCriteria::default())
            .unwrap();

        let best = outcome.best().unwrap();
        assert_eq!(best.quote_number, "Q-1");
        assert_eq!(best.price_score, 100.0);
        assert_eq!(outcome.score_for(quotes[1].id()).unwrap().price_score, 0.0);
        assert!(outcome.recommendation.contains("Quote Q-1"));
        assert!(outcome.item_comparisons.is_empty());
        assert_eq!(outcome.price_differences[1].difference, Decimal::from(1000));
    }

    #[test]
    fn extreme_totals_still_evaluate() {
        let with_total = |number: &str, total: &str| {
            QuoteRecord::builder(QuoteId::new_v4(), number, SupplierId::new(number), number)
                .total_amount(total.parse::<Decimal>().unwrap())
                .build()
        };
        let engine = ComparisonEngine::default();
        let criteria = ScoringCriteria::default();

        let tiny_and_huge = vec![
            with_total("tiny", "0.0000000001"),
            with_total("huge", "100000000000000000000"),
        ];
        let outcome = engine.evaluate(&tiny_and_huge, &criteria).unwrap();
        assert_eq!(outcome.best().unwrap().quote_number, "tiny");

        let opposite_extremes = vec![
            with_total("neg", "-50000000000000000000000000000"),
            with_total("pos", "50000000000000000000000000000"),
        ];
        let outcome = engine.evaluate(&opposite_extremes, &criteria).unwrap();
        assert_eq!(outcome.price_differences[1].difference, Decimal::MAX);
        assert_eq!(outcome.scores.len(), 2);
    }

    #[test]
    fn price_differences_keep_input_order() {
        let quotes = vec![quote("Q-1", 3000), quote("Q-2", 1000)];
        let outcome = ComparisonEngine::default()
            .evaluate(&quotes, &ScoringCriteria::default())
            .unwrap();
        assert_eq!(outcome.price_differences[0].quote_id, quotes[0].id());
        assert_eq!(outcome.scores[0].quote_id, quotes[1].id());
    }

    #[test]
    fn quality_can_outweigh_price() {
        let cheap = quote("cheap", 1000);
        let premium = QuoteRecord::builder(QuoteId::new_v4(), "premium", SupplierId::new("p"), "Premium")
            .total_amount(Decimal::from(1100))
            .warranty_terms("5 year full cover")
            .item(
                QuoteLineItem::new("EQ-1", "Ventilator", 1, Decimal::from(1100))
                    .with_manufacturer("Medtronic")
                    .with_model_number("PB980")
                    .with_specifications("ICU grade")
                    .with_certifications("FDA, CE Mark, ISO 13485")
                    .with_delivery_timeframe("2 weeks"),
            )
            .build();
        let outcome = ComparisonEngine::default()
            .evaluate(&[cheap, premium.clone()], &ScoringCriteria::default())
            .unwrap();
        assert_eq!(outcome.best().unwrap().quote_id, premium.id());
        assert_eq!(outcome.item_comparisons.len(), 1);
    }

    #[test]
    fn debug_names_strategy() {
        let engine = ComparisonEngine::default();
        assert!(format!("{engine:?}").contains("OverallScore"));
        assert_eq!(engine.ranking_strategy().name(), "OverallScore");
    }
}
