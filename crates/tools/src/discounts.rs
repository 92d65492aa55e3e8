//! Discount rules
//!
//! A fixed, ordered list of rules. Each rule is independently eligible or
//! not; eligible rules all apply, and every percentage is taken from the
//! same pre-discount base price.

use serde::{Deserialize, Serialize};

use copy_assistant_config::PricingSettings;
use copy_assistant_core::{ClientSegment, DiscountLine};

/// What makes a discount rule eligible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountCondition {
    /// Client belongs to the segment
    Segment { segment: ClientSegment },
    /// Volume is at least this many pieces
    MinVolume { min_volume: u32 },
    /// Client belongs to the segment and the base price exceeds `min_base`
    SegmentAbovePrice {
        segment: ClientSegment,
        min_base: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub name: String,
    pub percentage: f64,
    pub condition: DiscountCondition,
}

impl DiscountRule {
    pub fn is_eligible(&self, segment: ClientSegment, volume: Option<u32>, base_price: f64) -> bool {
        match self.condition {
            DiscountCondition::Segment { segment: required } => segment == required,
            DiscountCondition::MinVolume { min_volume } => {
                volume.map_or(false, |v| v >= min_volume)
            }
            DiscountCondition::SegmentAbovePrice {
                segment: required,
                min_base,
            } => segment == required && base_price > min_base,
        }
    }
}

/// Ordered discount rule list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRules {
    rules: Vec<DiscountRule>,
}

impl DiscountRules {
    /// New-client, returning-client, bulk-order and enterprise rules, in that order
    pub fn from_settings(settings: &PricingSettings) -> Self {
        Self {
            rules: vec![
                DiscountRule {
                    name: "Скидка новому клиенту".to_string(),
                    percentage: settings.new_client_percent,
                    condition: DiscountCondition::Segment {
                        segment: ClientSegment::New,
                    },
                },
                DiscountRule {
                    name: "Скидка постоянному клиенту".to_string(),
                    percentage: settings.returning_client_percent,
                    condition: DiscountCondition::Segment {
                        segment: ClientSegment::Returning,
                    },
                },
                DiscountRule {
                    name: format!("Оптовая скидка (от {} шт.)", settings.bulk_order_min_volume),
                    percentage: settings.bulk_order_percent,
                    condition: DiscountCondition::MinVolume {
                        min_volume: settings.bulk_order_min_volume,
                    },
                },
                DiscountRule {
                    name: "Корпоративная скидка".to_string(),
                    percentage: settings.enterprise_percent,
                    condition: DiscountCondition::SegmentAbovePrice {
                        segment: ClientSegment::Business,
                        min_base: settings.enterprise_min_base_price,
                    },
                },
            ],
        }
    }

    pub fn new(rules: Vec<DiscountRule>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule; ineligible rules are kept with `eligible: false`
    pub fn evaluate(
        &self,
        segment: ClientSegment,
        volume: Option<u32>,
        base_price: f64,
    ) -> Vec<DiscountLine> {
        self.rules
            .iter()
            .map(|rule| DiscountLine {
                name: rule.name.clone(),
                percentage: rule.percentage,
                eligible: rule.is_eligible(segment, volume, base_price),
            })
            .collect()
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }
}

impl Default for DiscountRules {
    fn default() -> Self {
        Self::from_settings(&PricingSettings::default())
    }
}
