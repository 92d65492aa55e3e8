//! Price quote value objects
//!
//! A quote is recomputed for every pricing request and never mutated in
//! place. Components itemise how `base_price` was built, so their amounts
//! sum to `base_price`.

use serde::{Deserialize, Serialize};

/// Whether the quote was computed or is the manual-consultation placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteKind {
    /// Computed from a catalog entry
    Computed,
    /// No catalog entry matched; a human has to price the project
    CustomConsultation,
}

/// One additive line of the price breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteComponent {
    pub name: String,
    pub amount: f64,
    pub description: String,
}

impl QuoteComponent {
    pub fn new(name: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            description: description.into(),
        }
    }
}

/// A discount rule outcome; ineligible rules are listed too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub name: String,
    pub percentage: f64,
    pub eligible: bool,
}

/// Delivery time estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub value: u32,
    /// Unit from the catalog entry (e.g. "days")
    pub unit: String,
}

/// Itemised, discount-aware price quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub kind: QuoteKind,
    /// Resolved catalog slug, absent for the placeholder
    pub service_slug: Option<String>,
    pub service_name: String,
    pub currency: String,
    /// Pre-discount price including every surcharge
    pub base_price: f64,
    pub components: Vec<QuoteComponent>,
    pub discounts: Vec<DiscountLine>,
    pub final_price: f64,
    pub delivery_estimate: Option<DeliveryEstimate>,
}

impl Quote {
    /// Check if this is the manual-consultation placeholder
    pub fn is_custom(&self) -> bool {
        self.kind == QuoteKind::CustomConsultation
    }

    pub fn eligible_discounts(&self) -> impl Iterator<Item = &DiscountLine> {
        self.discounts.iter().filter(|d| d.eligible)
    }

    /// Sum of eligible discount percentages (additive, never compounded)
    pub fn total_discount_percent(&self) -> f64 {
        self.eligible_discounts().map(|d| d.percentage).sum()
    }

    pub fn components_total(&self) -> f64 {
        self.components.iter().map(|c| c.amount).sum()
    }

    /// Amount saved through discounts
    pub fn savings(&self) -> f64 {
        (self.base_price - self.final_price).max(0.0)
    }
}
