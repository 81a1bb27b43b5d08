//! # Quote Scoring
//!
//! Per-quote sub-scores on a 0-100 scale and their weighted combination.
//!
//! | Criterion  | Signal                                                        |
//! |------------|---------------------------------------------------------------|
//! | Price      | Linear inversion between the cheapest and dearest total       |
//! | Quality    | Warranty tier, reputable manufacturer, specification coverage |
//! | Delivery   | Average promised lead time across line items                  |
//! | Compliance | Certification keywords on each line item                      |
//!
//! Malformed inputs never fail a quote: blank text and unparseable
//! timeframes fall back to the defaults documented on each function.
//!
//! The keyword tables below are tuned procurement heuristics. Changing
//! them is a policy decision and changes every stored score on rescoring.

use crate::domain::entities::quote::{QuoteLineItem, QuoteRecord};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{Criterion, QuoteScore, ScoringCriteria};
use rust_decimal::prelude::ToPrimitive;

/// Share of the quality score carried by the warranty tier.
pub const WARRANTY_SHARE: f64 = 40.0;
/// Share of the quality score carried by manufacturer reputation.
pub const MANUFACTURER_SHARE: f64 = 30.0;
/// Share of the quality score carried by specification completeness.
pub const SPECIFICATION_SHARE: f64 = 30.0;

/// Warranty phrases in priority order with their credit.
pub const WARRANTY_TIERS: [(&str, f64); 4] = [
    ("5 year", 1.0),
    ("3 year", 0.8),
    ("2 year", 0.6),
    ("1 year", 0.4),
];
/// Credit when no warranty tier matches.
pub const DEFAULT_WARRANTY_CREDIT: f64 = 0.2;

/// Manufacturers earning full reputation credit.
pub const REPUTABLE_MANUFACTURERS: [&str; 12] = [
    "Siemens",
    "GE",
    "Philips",
    "Medtronic",
    "Stryker",
    "Boston Scientific",
    "Abbott",
    "Johnson & Johnson",
    "Roche",
    "Baxter",
    "Becton Dickinson",
    "Cardinal Health",
];

/// Certification keywords and the credit each group earns per item.
pub const CERTIFICATION_CREDITS: [(&[&str], f64); 4] = [
    (&["fda"], 0.4),
    (&["ce mark", "ce"], 0.3),
    (&["iso"], 0.2),
    (&["ul", "csa"], 0.1),
];
/// Maximum certification credit per item.
pub const MAX_ITEM_CERTIFICATION_CREDIT: f64 = 1.0;

/// Delivery score when no timeframe can be read.
pub const DEFAULT_DELIVERY_SCORE: f64 = 50.0;

/// Sub-scores at or above this are reported as strengths.
pub const STRENGTH_THRESHOLD: f64 = 80.0;
/// Sub-scores below this are reported as weaknesses.
pub const WEAKNESS_THRESHOLD: f64 = 50.0;

/// The four sub-scores of one quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    /// Price sub-score.
    pub price: f64,
    /// Quality sub-score.
    pub quality: f64,
    /// Delivery sub-score.
    pub delivery: f64,
    /// Compliance sub-score.
    pub compliance: f64,
}

impl SubScores {
    /// Returns the sub-score for a criterion.
    #[must_use]
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Price => self.price,
            Criterion::Quality => self.quality,
            Criterion::Delivery => self.delivery,
            Criterion::Compliance => self.compliance,
        }
    }

    /// Weighted overall score: `Σ subscore × weight / 100`.
    #[must_use]
    pub fn overall(&self, criteria: &ScoringCriteria) -> f64 {
        Criterion::ALL
            .iter()
            .map(|c| self.get(*c) * criteria.weight(*c) / 100.0)
            .sum()
    }

    /// Strength and weakness tags, in criterion order.
    #[must_use]
    pub fn strengths_and_weaknesses(&self) -> (Vec<String>, Vec<String>) {
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        for criterion in Criterion::ALL {
            let score = self.get(criterion);
            if score >= STRENGTH_THRESHOLD {
                strengths.push(strength_phrase(criterion).to_string());
            } else if score < WEAKNESS_THRESHOLD {
                weaknesses.push(weakness_phrase(criterion).to_string());
            }
        }
        (strengths, weaknesses)
    }
}

fn strength_phrase(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Price => "Competitive pricing",
        Criterion::Quality => "High quality standards",
        Criterion::Delivery => "Fast delivery",
        Criterion::Compliance => "Strong regulatory compliance",
    }
}

fn weakness_phrase(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Price => "Higher pricing than alternatives",
        Criterion::Quality => "Quality concerns",
        Criterion::Delivery => "Extended delivery timeline",
        Criterion::Compliance => "Limited compliance certifications",
    }
}

/// Scores every quote against the others. Output follows input order and
/// is unranked (`rank == 0`, empty recommendation).
///
/// # Errors
///
/// Returns `DomainError::NoQuotes` if `quotes` is empty.
pub fn score_quotes(
    quotes: &[QuoteRecord],
    criteria: &ScoringCriteria,
) -> DomainResult<Vec<QuoteScore>> {
    if quotes.is_empty() {
        return Err(DomainError::NoQuotes);
    }

    let amounts: Vec<f64> = quotes.iter().map(amount_as_f64).collect();
    let min_amount = amounts.iter().copied().fold(f64::INFINITY, f64::min);
    let max_amount = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let calculated_at = Timestamp::now();

    let scores = quotes
        .iter()
        .zip(amounts)
        .map(|(quote, amount)| {
            let sub = SubScores {
                price: price_score(amount, min_amount, max_amount),
                quality: quality_score(quote),
                delivery: delivery_score(quote),
                compliance: compliance_score(quote),
            };
            let (strengths, weaknesses) = sub.strengths_and_weaknesses();
            QuoteScore {
                quote_id: quote.id(),
                quote_number: quote.quote_number().to_string(),
                supplier_id: quote.supplier_id().clone(),
                supplier_name: quote.supplier_name().to_string(),
                price_score: sub.price,
                quality_score: sub.quality,
                delivery_score: sub.delivery,
                compliance_score: sub.compliance,
                overall_score: sub.overall(criteria),
                rank: 0,
                strengths,
                weaknesses,
                recommendation: String::new(),
                calculated_at,
            }
        })
        .collect();

    Ok(scores)
}

fn amount_as_f64(quote: &QuoteRecord) -> f64 {
    quote.total_amount().to_f64().unwrap_or(0.0)
}

/// Price sub-score: 100 for the cheapest total, 0 for the dearest,
/// linear in between. Every quote scores 100 when all totals are equal.
#[must_use]
pub fn price_score(amount: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 {
        return 100.0;
    }
    ((max - amount) / range * 100.0).clamp(0.0, 100.0)
}

/// Quality sub-score.
///
/// Blends the warranty tier, manufacturer reputation and specification
/// completeness, normalized by the shares of the signals present. A quote
/// without line items is judged on its warranty alone.
#[must_use]
pub fn quality_score(quote: &QuoteRecord) -> f64 {
    let mut points = warranty_credit(quote.warranty_terms()) * WARRANTY_SHARE;
    let mut shares = WARRANTY_SHARE;

    let items = quote.items();
    if !items.is_empty() {
        let reputation = if has_reputable_manufacturer(items) {
            1.0
        } else {
            0.0
        };
        points += reputation * MANUFACTURER_SHARE;
        points += specification_completeness(items) * SPECIFICATION_SHARE;
        shares += MANUFACTURER_SHARE + SPECIFICATION_SHARE;
    }

    points / shares * 100.0
}

/// Credit for the longest warranty phrase found in `terms`.
#[must_use]
pub fn warranty_credit(terms: &str) -> f64 {
    let terms = terms.to_lowercase();
    WARRANTY_TIERS
        .iter()
        .find(|(phrase, _)| terms.contains(phrase))
        .map_or(DEFAULT_WARRANTY_CREDIT, |(_, credit)| *credit)
}

/// Returns true if any item's manufacturer contains a reputable brand.
#[must_use]
pub fn has_reputable_manufacturer(items: &[QuoteLineItem]) -> bool {
    items.iter().any(|item| {
        let manufacturer = item.manufacturer.to_lowercase();
        REPUTABLE_MANUFACTURERS
            .iter()
            .any(|brand| manufacturer.contains(&brand.to_lowercase()))
    })
}

/// Fraction of items with both specification text and a model number.
#[must_use]
pub fn specification_completeness(items: &[QuoteLineItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let complete = items
        .iter()
        .filter(|item| item.has_complete_specification())
        .count();
    complete as f64 / items.len() as f64
}

/// Delivery sub-score from the average promised lead time.
///
/// Returns [`DEFAULT_DELIVERY_SCORE`] when no item carries a readable
/// timeframe.
#[must_use]
pub fn delivery_score(quote: &QuoteRecord) -> f64 {
    let days: Vec<f64> = quote
        .items()
        .iter()
        .filter_map(|item| parse_timeframe_days(&item.delivery_timeframe))
        .collect();

    if days.is_empty() {
        return DEFAULT_DELIVERY_SCORE;
    }
    let average = days.iter().sum::<f64>() / days.len() as f64;
    delivery_days_score(average)
}

/// Reads a lead time such as "10 days", "4-6 weeks" or "2 months" into days.
///
/// The leading number is scaled by the first unit keyword found (month 30,
/// week 7, day 1); a bare number counts as days. Returns `None` when the
/// text does not start with a number.
#[must_use]
pub fn parse_timeframe_days(timeframe: &str) -> Option<f64> {
    let text = timeframe.trim().to_lowercase();
    let number: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value: f64 = number.parse().ok()?;

    let multiplier = if text.contains("month") {
        30.0
    } else if text.contains("week") {
        7.0
    } else {
        1.0
    };
    Some(value * multiplier)
}

/// Maps an average lead time in days to a 0-100 score.
///
/// - up to 30 days: 100 down to 90
/// - up to 60 days: 89 down to 70
/// - up to 90 days: 69 down to 50
/// - beyond: 50 falling linearly to 0 at 180 days
#[must_use]
pub fn delivery_days_score(days: f64) -> f64 {
    let days = days.max(0.0);
    if days <= 30.0 {
        100.0 - days / 30.0 * 10.0
    } else if days <= 60.0 {
        89.0 - (days - 30.0) / 30.0 * 19.0
    } else if days <= 90.0 {
        69.0 - (days - 60.0) / 30.0 * 19.0
    } else {
        (50.0 - (days - 90.0) / 90.0 * 50.0).max(0.0)
    }
}

/// Compliance sub-score: average per-item certification credit × 100.
/// Zero for a quote without items.
#[must_use]
pub fn compliance_score(quote: &QuoteRecord) -> f64 {
    let items = quote.items();
    if items.is_empty() {
        return 0.0;
    }
    let total: f64 = items
        .iter()
        .map(|item| certification_credit(&item.certifications))
        .sum();
    total / items.len() as f64 * 100.0
}

/// Certification credit for one item, capped at
/// [`MAX_ITEM_CERTIFICATION_CREDIT`].
#[must_use]
pub fn certification_credit(certifications: &str) -> f64 {
    let text = certifications.to_lowercase();
    let credit: f64 = CERTIFICATION_CREDITS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, credit)| credit)
        .sum();
    credit.min(MAX_ITEM_CERTIFICATION_CREDIT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{QuoteId, SupplierId};
    use rust_decimal::Decimal;

    const EPS: f64 = 1e-9;

    fn quote(amount: i64) -> QuoteRecord {
        QuoteRecord::builder(QuoteId::new_v4(), "Q", SupplierId::new("s"), "Supplier")
            .total_amount(Decimal::from(amount))
            .build()
    }

    fn item() -> QuoteLineItem {
        QuoteLineItem::new("EQ-1", "Monitor", 1, Decimal::from(100))
    }

    fn quote_with_items(items: Vec<QuoteLineItem>) -> QuoteRecord {
        QuoteRecord::builder(QuoteId::new_v4(), "Q", SupplierId::new("s"), "Supplier")
            .total_amount(Decimal::from(100))
            .items(items)
            .build()
    }

    mod price {
        use super::*;

        #[test]
        fn linear_inversion() {
            assert!((price_score(1000.0, 1000.0, 2000.0) - 100.0).abs() < EPS);
            assert!((price_score(2000.0, 1000.0, 2000.0) - 0.0).abs() < EPS);
            assert!((price_score(1500.0, 1000.0, 2000.0) - 50.0).abs() < EPS);
        }

        #[test]
        fn equal_prices_all_score_100() {
            assert_eq!(price_score(500.0, 500.0, 500.0), 100.0);
        }
    }

    mod quality {
        use super::*;

        #[test]
        fn warranty_tiers_in_priority_order() {
            assert_eq!(warranty_credit("5 Year comprehensive"), 1.0);
            assert_eq!(warranty_credit("3 YEAR parts"), 0.8);
            assert_eq!(warranty_credit("2 year"), 0.6);
            assert_eq!(warranty_credit("1 year standard"), 0.4);
            assert_eq!(warranty_credit("90 days"), 0.2);
            assert_eq!(warranty_credit(""), 0.2);
        }

        #[test]
        fn longest_warranty_wins_when_several_present() {
            assert_eq!(warranty_credit("1 year labour, 5 year parts"), 1.0);
        }

        #[test]
        fn no_items_scores_warranty_alone() {
            let q = QuoteRecord::builder(QuoteId::new_v4(), "Q", SupplierId::new("s"), "S")
                .warranty_terms("5 year warranty")
                .build();
            assert!((quality_score(&q) - 100.0).abs() < EPS);

            let q = quote(100);
            assert!((quality_score(&q) - 20.0).abs() < EPS);
        }

        #[test]
        fn reputable_manufacturer_is_case_insensitive() {
            let items = vec![item().with_manufacturer("PHILIPS Healthcare")];
            assert!(has_reputable_manufacturer(&items));
            let items = vec![item().with_manufacturer("Unknown Corp")];
            assert!(!has_reputable_manufacturer(&items));
        }

        #[test]
        fn specification_fraction() {
            let items = vec![
                item().with_specifications("spec").with_model_number("M1"),
                item().with_specifications("spec"),
            ];
            assert!((specification_completeness(&items) - 0.5).abs() < EPS);
        }

        #[test]
        fn full_blend() {
            // warranty 0.8*40 + reputation 30 + completeness 0.5*30 = 77 of 100
            let q = QuoteRecord::builder(QuoteId::new_v4(), "Q", SupplierId::new("s"), "S")
                .warranty_terms("3 year")
                .item(
                    item()
                        .with_manufacturer("Siemens")
                        .with_specifications("spec")
                        .with_model_number("M1"),
                )
                .item(item().with_manufacturer("Other"))
                .build();
            assert!((quality_score(&q) - 77.0).abs() < EPS);
        }
    }

    mod delivery {
        use super::*;

        #[test]
        fn parses_units() {
            assert_eq!(parse_timeframe_days("10 days"), Some(10.0));
            assert_eq!(parse_timeframe_days("2 Weeks"), Some(14.0));
            assert_eq!(parse_timeframe_days("3 months"), Some(90.0));
            assert_eq!(parse_timeframe_days("4-6 weeks"), Some(28.0));
            assert_eq!(parse_timeframe_days("21"), Some(21.0));
        }

        #[test]
        fn unparseable_is_excluded() {
            assert_eq!(parse_timeframe_days("ASAP"), None);
            assert_eq!(parse_timeframe_days(""), None);
            assert_eq!(parse_timeframe_days("about 2 weeks"), None);
        }

        #[test]
        fn mapping_bands() {
            assert!((delivery_days_score(0.0) - 100.0).abs() < EPS);
            assert!((delivery_days_score(30.0) - 90.0).abs() < EPS);
            assert!((delivery_days_score(60.0) - 70.0).abs() < EPS);
            assert!((delivery_days_score(90.0) - 50.0).abs() < EPS);
            assert!((delivery_days_score(135.0) - 25.0).abs() < EPS);
            assert_eq!(delivery_days_score(400.0), 0.0);
        }

        #[test]
        fn band_edges_stay_in_range() {
            let s = delivery_days_score(31.0);
            assert!((70.0..=89.0).contains(&s));
            let s = delivery_days_score(61.0);
            assert!((50.0..=69.0).contains(&s));
        }

        #[test]
        fn averages_valid_items_only() {
            let q = quote_with_items(vec![
                item().with_delivery_timeframe("10 days"),
                item().with_delivery_timeframe("50 days"),
                item().with_delivery_timeframe("TBD"),
            ]);
            // average 30 days
            assert!((delivery_score(&q) - 90.0).abs() < EPS);
        }

        #[test]
        fn defaults_without_readable_timeframe() {
            assert_eq!(delivery_score(&quote(100)), DEFAULT_DELIVERY_SCORE);
            let q = quote_with_items(vec![item().with_delivery_timeframe("soon")]);
            assert_eq!(delivery_score(&q), DEFAULT_DELIVERY_SCORE);
        }
    }

    mod compliance {
        use super::*;

        #[test]
        fn credits_sum_and_cap() {
            assert!((certification_credit("FDA 510(k)") - 0.4).abs() < EPS);
            assert!((certification_credit("CE Mark") - 0.3).abs() < EPS);
            assert!((certification_credit("FDA, CE Mark, ISO 13485, UL") - 1.0).abs() < EPS);
            assert_eq!(certification_credit(""), 0.0);
        }

        #[test]
        fn averages_across_items() {
            let q = quote_with_items(vec![
                item().with_certifications("FDA"),
                item().with_certifications("none"),
            ]);
            assert!((compliance_score(&q) - 20.0).abs() < EPS);
        }

        #[test]
        fn no_items_scores_zero() {
            assert_eq!(compliance_score(&quote(100)), 0.0);
        }
    }

    mod aggregate {
        use super::*;

        #[test]
        fn empty_input_is_rejected() {
            let result = score_quotes(&[], &ScoringCriteria::default());
            assert!(matches!(result, Err(DomainError::NoQuotes)));
        }

        #[test]
        fn two_quotes_without_items() {
            let quotes = vec![quote(1000), quote(2000)];
            let scores = score_quotes(&quotes, &ScoringCriteria::default()).unwrap();

            assert_eq!(scores[0].price_score, 100.0);
            assert_eq!(scores[1].price_score, 0.0);
            for s in &scores {
                assert!((s.quality_score - 20.0).abs() < EPS);
                assert_eq!(s.delivery_score, DEFAULT_DELIVERY_SCORE);
                assert_eq!(s.compliance_score, 0.0);
                assert_eq!(s.rank, 0);
            }
            // 100*0.4 + 20*0.3 + 50*0.2 + 0 = 56
            assert!((scores[0].overall_score - 56.0).abs() < EPS);
            assert!((scores[1].overall_score - 16.0).abs() < EPS);
        }

        #[test]
        fn output_follows_input_order() {
            let quotes = vec![quote(3000), quote(1000), quote(2000)];
            let scores = score_quotes(&quotes, &ScoringCriteria::default()).unwrap();
            for (quote, score) in quotes.iter().zip(&scores) {
                assert_eq!(quote.id(), score.quote_id);
            }
        }

        #[test]
        fn strengths_and_weaknesses_skip_middle_band() {
            let sub = SubScores {
                price: 80.0,
                quality: 79.9,
                delivery: 50.0,
                compliance: 49.9,
            };
            let (strengths, weaknesses) = sub.strengths_and_weaknesses();
            assert_eq!(strengths, vec!["Competitive pricing".to_string()]);
            assert_eq!(
                weaknesses,
                vec!["Limited compliance certifications".to_string()]
            );
        }

        #[test]
        fn overall_is_weighted_sum() {
            let sub = SubScores {
                price: 90.0,
                quality: 70.0,
                delivery: 60.0,
                compliance: 40.0,
            };
            let criteria = ScoringCriteria::new(40.0, 30.0, 20.0, 10.0).unwrap();
            let expected = 90.0 * 0.4 + 70.0 * 0.3 + 60.0 * 0.2 + 40.0 * 0.1;
            assert!((sub.overall(&criteria) - expected).abs() < EPS);
        }
    }
}
