//! # Price Analysis
//!
//! Price deltas against the cheapest quote and side-by-side line items.

use crate::domain::entities::quote::QuoteRecord;
use crate::domain::value_objects::{ItemComparison, PriceDifference};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::{BTreeMap, HashMap};

/// Computes each quote's difference from the lowest total, in input order.
///
/// The percentage is relative to the lowest total and is 0 when that total
/// is zero. A difference beyond the `Decimal` range saturates at
/// `Decimal::MAX`; a percentage beyond it is computed in `f64` instead, and
/// is 0 if that is not finite either.
#[must_use]
pub fn price_differences(quotes: &[QuoteRecord]) -> Vec<PriceDifference> {
    let Some(lowest) = quotes.iter().map(QuoteRecord::total_amount).min() else {
        return Vec::new();
    };

    quotes
        .iter()
        .map(|quote| {
            let amount = quote.total_amount();
            let exact = amount.checked_sub(lowest);
            PriceDifference {
                quote_id: quote.id(),
                total_amount: amount,
                difference: exact.unwrap_or(Decimal::MAX),
                percentage_diff: percentage_over(amount, lowest, exact),
            }
        })
        .collect()
}

fn percentage_over(amount: Decimal, lowest: Decimal, difference: Option<Decimal>) -> f64 {
    if lowest.is_zero() {
        return 0.0;
    }
    let exact = difference
        .and_then(|d| d.checked_div(lowest))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64());
    if let Some(pct) = exact {
        return pct;
    }

    let (Some(amount), Some(lowest)) = (amount.to_f64(), lowest.to_f64()) else {
        return 0.0;
    };
    let pct = (amount - lowest) / lowest * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// Groups line items across quotes by equipment.
///
/// Groups appear in first-seen order. Within one quote, a later line for
/// the same equipment replaces an earlier one.
#[must_use]
pub fn item_comparisons(quotes: &[QuoteRecord]) -> Vec<ItemComparison> {
    let mut groups: Vec<ItemComparison> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for quote in quotes {
        for item in quote.items() {
            let key = item.comparison_key();
            let slot = match index.get(key) {
                Some(slot) => *slot,
                None => {
                    groups.push(ItemComparison {
                        equipment_id: key.to_string(),
                        equipment_name: item.equipment_name.clone(),
                        quotes: BTreeMap::new(),
                    });
                    let slot = groups.len() - 1;
                    index.insert(key.to_string(), slot);
                    slot
                }
            };
            if let Some(group) = groups.get_mut(slot) {
                group.quotes.insert(quote.id(), item.to_details());
            }
        }
    }

    groups
}
