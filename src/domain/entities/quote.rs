//! # Quote Record
//!
//! Read model of a supplier quote as supplied to the scoring engine.
//!
//! Quotes are owned by the quoting subsystem; the comparison core only
//! reads them. Every text field is free-form and may be blank; scoring
//! degrades to documented defaults instead of rejecting a quote.
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::entities::quote::{QuoteLineItem, QuoteRecord};
//! use procure_compare::domain::value_objects::{QuoteId, SupplierId};
//! use rust_decimal::Decimal;
//!
//! let quote = QuoteRecord::builder(QuoteId::new_v4(), "Q-2024-001", SupplierId::new("sup-9"), "Acme Medical")
//!     .total_amount(Decimal::from(12_500))
//!     .warranty_terms("3 year parts and labour")
//!     .item(
//!         QuoteLineItem::new("EQ-1", "Infusion pump", 5, Decimal::from(2_500))
//!             .with_manufacturer("Baxter")
//!             .with_delivery_timeframe("2 weeks"),
//!     )
//!     .build();
//!
//! assert_eq!(quote.item_count(), 1);
//! ```

use crate::domain::value_objects::{ItemDetails, QuoteId, SupplierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteLineItem {
    /// Equipment catalogue identifier (may be blank).
    pub equipment_id: String,
    /// Equipment display name.
    pub equipment_name: String,
    /// Quantity offered.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line total.
    pub total_price: Decimal,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Manufacturer model number.
    pub model_number: String,
    /// Specification text.
    pub specifications: String,
    /// Certification text, e.g. "FDA 510(k), CE Mark, ISO 13485".
    pub certifications: String,
    /// Free-text delivery promise, e.g. "4-6 weeks".
    pub delivery_timeframe: String,
}

impl QuoteLineItem {
    /// Creates a line item; `total_price` is `unit_price * quantity`,
    /// saturating at the `Decimal` bounds.
    #[must_use]
    pub fn new(
        equipment_id: impl Into<String>,
        equipment_name: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            equipment_name: equipment_name.into(),
            quantity,
            unit_price,
            total_price: line_total(unit_price, quantity),
            ..Default::default()
        }
    }

    /// Sets the manufacturer.
    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    /// Sets the model number.
    #[must_use]
    pub fn with_model_number(mut self, model_number: impl Into<String>) -> Self {
        self.model_number = model_number.into();
        self
    }

    /// Sets the specification text.
    #[must_use]
    pub fn with_specifications(mut self, specifications: impl Into<String>) -> Self {
        self.specifications = specifications.into();
        self
    }

    /// Sets the certification text.
    #[must_use]
    pub fn with_certifications(mut self, certifications: impl Into<String>) -> Self {
        self.certifications = certifications.into();
        self
    }

    /// Sets the delivery timeframe.
    #[must_use]
    pub fn with_delivery_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.delivery_timeframe = timeframe.into();
        self
    }

    /// Key used to line this item up against other quotes: the equipment
    /// id, or the equipment name when the id is blank.
    #[must_use]
    pub fn comparison_key(&self) -> &str {
        if self.equipment_id.trim().is_empty() {
            &self.equipment_name
        } else {
            &self.equipment_id
        }
    }

    /// Returns true if both specification text and model number are filled in.
    #[must_use]
    pub fn has_complete_specification(&self) -> bool {
        !self.specifications.trim().is_empty() && !self.model_number.trim().is_empty()
    }

    /// Projects the line into the side-by-side details record.
    #[must_use]
    pub fn to_details(&self) -> ItemDetails {
        ItemDetails {
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
            delivery_timeframe: self.delivery_timeframe.clone(),
            manufacturer: self.manufacturer.clone(),
            model_number: self.model_number.clone(),
            specifications: self.specifications.clone(),
            certifications: self.certifications.clone(),
        }
    }
}

fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .unwrap_or(if unit_price.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// A supplier quote as seen by the comparison engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    id: QuoteId,
    quote_number: String,
    supplier_id: SupplierId,
    supplier_name: String,
    total_amount: Decimal,
    currency: String,
    warranty_terms: String,
    payment_terms: String,
    delivery_terms: String,
    items: Vec<QuoteLineItem>,
}

impl QuoteRecord {
    /// Returns a builder with the identifying fields set.
    #[must_use]
    pub fn builder(
        id: QuoteId,
        quote_number: impl Into<String>,
        supplier_id: SupplierId,
        supplier_name: impl Into<String>,
    ) -> QuoteRecordBuilder {
        QuoteRecordBuilder::new(id, quote_number, supplier_id, supplier_name)
    }

    /// Returns the quote ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the quote number.
    #[inline]
    #[must_use]
    pub fn quote_number(&self) -> &str {
        &self.quote_number
    }

    /// Returns the supplier ID.
    #[inline]
    #[must_use]
    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    /// Returns the supplier name.
    #[inline]
    #[must_use]
    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    /// Returns the quote total.
    #[inline]
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Returns the ISO currency code.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the warranty terms.
    #[inline]
    #[must_use]
    pub fn warranty_terms(&self) -> &str {
        &self.warranty_terms
    }

    /// Returns the payment terms.
    #[inline]
    #[must_use]
    pub fn payment_terms(&self) -> &str {
        &self.payment_terms
    }

    /// Returns the delivery terms.
    #[inline]
    #[must_use]
    pub fn delivery_terms(&self) -> &str {
        &self.delivery_terms
    }

    /// Returns the line items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[QuoteLineItem] {
        &self.items
    }

    /// Returns the number of line items.
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the quote has line items.
    #[inline]
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({} from {} total={} {})",
            self.quote_number, self.supplier_name, self.total_amount, self.currency
        )
    }
}

/// Builder for [`QuoteRecord`].
#[derive(Debug, Clone)]
pub struct QuoteRecordBuilder {
    id: QuoteId,
    quote_number: String,
    supplier_id: SupplierId,
    supplier_name: String,
    total_amount: Decimal,
    currency: String,
    warranty_terms: String,
    payment_terms: String,
    delivery_terms: String,
    items: Vec<QuoteLineItem>,
}

impl QuoteRecordBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        id: QuoteId,
        quote_number: impl Into<String>,
        supplier_id: SupplierId,
        supplier_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            quote_number: quote_number.into(),
            supplier_id,
            supplier_name: supplier_name.into(),
            total_amount: Decimal::ZERO,
            currency: "USD".to_string(),
            warranty_terms: String::new(),
            payment_terms: String::new(),
            delivery_terms: String::new(),
            items: Vec::new(),
        }
    }

    /// Sets the quote total.
    #[must_use]
    pub fn total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = amount;
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets the warranty terms.
    #[must_use]
    pub fn warranty_terms(mut self, terms: impl Into<String>) -> Self {
        self.warranty_terms = terms.into();
        self
    }

    /// Sets the payment terms.
    #[must_use]
    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = terms.into();
        self
    }

    /// Sets the delivery terms.
    #[must_use]
    pub fn delivery_terms(mut self, terms: impl Into<String>) -> Self {
        self.delivery_terms = terms.into();
        self
    }

    /// Appends a line item.
    #[must_use]
    pub fn item(mut self, item: QuoteLineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replaces the line items.
    #[must_use]
    pub fn items(mut self, items: Vec<QuoteLineItem>) -> Self {
        self.items = items;
        self
    }

    /// Builds the quote record.
    #[must_use]
    pub fn build(self) -> QuoteRecord {
        QuoteRecord {
            id: self.id,
            quote_number: self.quote_number,
            supplier_id: self.supplier_id,
            supplier_name: self.supplier_name,
            total_amount: self.total_amount,
            currency: self.currency,
            warranty_terms: self.warranty_terms,
            payment_terms: self.payment_terms,
            delivery_terms: self.delivery_terms,
            items: self.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_total_is_unit_times_quantity() {
        let item = QuoteLineItem::new("EQ-1", "Monitor", 3, Decimal::from(250));
        assert_eq!(item.total_price, Decimal::from(750));
    }

    #[test]
    fn line_item_total_saturates() {
        let item = QuoteLineItem::new("EQ-1", "Monitor", u32::MAX, Decimal::MAX);
        assert_eq!(item.total_price, Decimal::MAX);
        let item = QuoteLineItem::new("EQ-1", "Monitor", u32::MAX, Decimal::MIN);
        assert_eq!(item.total_price, Decimal::MIN);
    }

    #[test]
    fn comparison_key_falls_back_to_name() {
        let with_id = QuoteLineItem::new("EQ-1", "Monitor", 1, Decimal::ONE);
        let without_id = QuoteLineItem::new("  ", "Monitor", 1, Decimal::ONE);
        assert_eq!(with_id.comparison_key(), "EQ-1");
        assert_eq!(without_id.comparison_key(), "Monitor");
    }

    #[test]
    fn specification_completeness_needs_both_fields() {
        let item = QuoteLineItem::new("EQ-1", "Monitor", 1, Decimal::ONE);
        assert!(!item.has_complete_specification());
        let item = item.with_specifications("15 inch").with_model_number("M-15");
        assert!(item.has_complete_specification());
        let blank_model = item.clone().with_model_number("   ");
        assert!(!blank_model.has_complete_specification());
    }

    #[test]
    fn builder_defaults() {
        let quote = QuoteRecord::builder(QuoteId::new_v4(), "Q-1", SupplierId::new("s"), "S").build();
        assert_eq!(quote.total_amount(), Decimal::ZERO);
        assert_eq!(quote.currency(), "USD");
        assert!(!quote.has_items());
        assert!(quote.to_string().contains("Q-1"));
    }

    #[test]
    fn to_details_copies_offer_fields() {
        let item = QuoteLineItem::new("EQ-1", "Monitor", 2, Decimal::from(10))
            .with_manufacturer("Philips")
            .with_certifications("CE")
            .with_delivery_timeframe("10 days");
        let details = item.to_details();
        assert_eq!(details.quantity, 2);
        assert_eq!(details.total_price, Decimal::from(20));
        assert_eq!(details.manufacturer, "Philips");
        assert_eq!(details.delivery_timeframe, "10 days");
    }
}
