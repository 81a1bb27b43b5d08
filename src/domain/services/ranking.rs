//! # Ranking
//!
//! Orders scored quotes and writes the recommendation texts.
//!
//! This module provides the [`RankingStrategy`] trait and the default
//! [`OverallScoreRanking`], plus the narrative recommendation builders.

use crate::domain::value_objects::{QuoteScore, ScoringCriteria};
use std::cmp::Ordering;
use std::fmt;

/// Weight at which price is called out as a key factor.
pub const PRICE_FACTOR_WEIGHT: f64 = 40.0;
/// Weight at which quality is called out as a key factor.
pub const QUALITY_FACTOR_WEIGHT: f64 = 30.0;
/// Weight at which delivery is called out as a key factor.
pub const DELIVERY_FACTOR_WEIGHT: f64 = 20.0;

/// Recommendation when there is nothing to compare.
pub const NO_QUOTES_RECOMMENDATION: &str = "No quotes available for comparison.";

/// Trait for ranking strategies.
///
/// Implementations receive unranked scores and return them sorted best
/// first with `rank` and `recommendation` populated. Ranks are `1..=n`
/// with no gaps.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks the given scores.
    fn rank(&self, scores: Vec<QuoteScore>) -> Vec<QuoteScore>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Ranks by overall score, highest first.
///
/// The sort is stable: quotes with equal overall scores keep the order in
/// which they were supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverallScoreRanking;

impl OverallScoreRanking {
    /// Creates a new overall score ranking.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for OverallScoreRanking {
    fn rank(&self, mut scores: Vec<QuoteScore>) -> Vec<QuoteScore> {
        scores.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(Ordering::Equal)
        });

        let total = scores.len();
        for (index, score) in scores.iter_mut().enumerate() {
            score.rank = index + 1;
            score.recommendation = quote_recommendation(score.rank, total, score.overall_score);
        }
        scores
    }

    fn name(&self) -> &'static str {
        "OverallScore"
    }
}

/// Recommendation text for one ranked quote.
#[must_use]
pub fn quote_recommendation(rank: usize, total: usize, overall: f64) -> String {
    if rank == 1 {
        format!("Best overall choice with score of {overall:.1}. Recommended for award.")
    } else if rank == 2 {
        format!("Strong alternative with score of {overall:.1}. Consider as backup option.")
    } else if rank <= total / 2 {
        format!("Good option with score of {overall:.1}. Suitable if top choices are unavailable.")
    } else {
        format!("Lower ranked option with score of {overall:.1}. Review carefully before selection.")
    }
}

/// Narrative recommendation for a whole comparison.
///
/// Names the rank-1 quote and, when weighted heavily enough, the price,
/// quality and delivery sub-scores that drove the decision.
#[must_use]
pub fn overall_recommendation(
    ranked: &[QuoteScore],
    criteria: &ScoringCriteria,
) -> String {
    let Some(best) = ranked
        .iter()
        .find(|s| s.is_best())
        .or_else(|| ranked.first())
    else {
        return NO_QUOTES_RECOMMENDATION.to_string();
    };

    let mut text = format!(
        "Based on the weighted analysis, Quote {} from {} is recommended with an overall score of {:.1}.",
        best.quote_number, best.supplier_name, best.overall_score
    );

    let mut factors = Vec::new();
    if criteria.price_weight >= PRICE_FACTOR_WEIGHT {
        factors.push(format!("competitive pricing (score: {:.1})", best.price_score));
    }
    if criteria.quality_weight >= QUALITY_FACTOR_WEIGHT {
        factors.push(format!("quality standards (score: {:.1})", best.quality_score));
    }
    if criteria.delivery_weight >= DELIVERY_FACTOR_WEIGHT {
        factors.push(format!("delivery timeline (score: {:.1})", best.delivery_score));
    }

    if !factors.is_empty() {
        text.push_str(" Key factors: ");
        text.push_str(&factors.join(", "));
        text.push('.');
    }
    text
}
