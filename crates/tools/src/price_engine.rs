//! Price Engine
//!
//! Computes an itemised quote for a service hint, the accumulated project
//! requirements and the client segment. Catalog facts are read from the
//! store snapshot on every call.
//!
//! Order of surcharges: complexity, then volume, then urgency (applied to
//! the volume-inflated base), then additional requirements. Discounts are
//! evaluated last against the fully surcharged base.

use std::sync::Arc;

use copy_assistant_config::{CatalogStore, PricingSettings, ServiceEntry};
use copy_assistant_core::pricing::{delivery_units, discounted_price, multiplier_delta};
use copy_assistant_core::{
    ClientSegment, Complexity, DeliveryEstimate, ProjectRequirements, Quote, QuoteComponent,
    QuoteKind,
};

use crate::discounts::DiscountRules;

/// Name shown on the manual-consultation placeholder
const CUSTOM_SERVICE_NAME: &str = "Индивидуальный проект";

pub struct PriceEngine {
    store: Arc<CatalogStore>,
    settings: PricingSettings,
    discounts: DiscountRules,
}

impl PriceEngine {
    pub fn new(store: Arc<CatalogStore>, settings: PricingSettings) -> Self {
        let discounts = DiscountRules::from_settings(&settings);
        Self {
            store,
            settings,
            discounts,
        }
    }

    /// Replace the discount rule list
    pub fn with_discounts(mut self, discounts: DiscountRules) -> Self {
        self.discounts = discounts;
        self
    }

    /// Compute a quote.
    ///
    /// An unresolvable hint yields the custom-consultation placeholder
    /// rather than an error.
    pub fn quote(
        &self,
        service_hint: &str,
        requirements: &ProjectRequirements,
        segment: ClientSegment,
    ) -> Quote {
        let catalog = self.store.snapshot();
        let quote = match catalog.find_service(service_hint) {
            Some(entry) => self.compute(entry, requirements, segment),
            None => {
                tracing::warn!(hint = service_hint, "No catalog entry for service, using custom quote");
                self.custom_quote()
            }
        };

        let kind = match quote.kind {
            QuoteKind::Computed => "computed",
            QuoteKind::CustomConsultation => "custom_consultation",
        };
        metrics::counter!("copy_assistant_quotes_total", "kind" => kind).increment(1);

        tracing::debug!(
            service = ?quote.service_slug,
            base = quote.base_price,
            final_price = quote.final_price,
            "Computed quote"
        );
        quote
    }

    /// Fixed placeholder signalling that a human has to price the project
    pub fn custom_quote(&self) -> Quote {
        let price = self.settings.custom_quote_price;
        Quote {
            kind: QuoteKind::CustomConsultation,
            service_slug: None,
            service_name: CUSTOM_SERVICE_NAME.to_string(),
            currency: self.settings.currency.clone(),
            base_price: price,
            components: vec![QuoteComponent::new(
                "Индивидуальная оценка",
                price,
                "Стоимость уточнит менеджер после консультации",
            )],
            discounts: Vec::new(),
            final_price: price,
            delivery_estimate: None,
        }
    }

    fn compute(
        &self,
        entry: &ServiceEntry,
        requirements: &ProjectRequirements,
        segment: ClientSegment,
    ) -> Quote {
        let min_price = entry.price_range.min;
        let mut base = min_price;
        let mut components = vec![QuoteComponent::new(
            "Базовая стоимость",
            min_price,
            entry.name.clone(),
        )];

        if let Some(complexity) = requirements.complexity {
            let delta = round_amount(multiplier_delta(base, complexity.multiplier()));
            if delta > 0.0 {
                components.push(QuoteComponent::new(
                    format!("Сложность: {}", complexity.label()),
                    delta,
                    format!("×{}", complexity.multiplier()),
                ));
                base += delta;
            }
        }

        if let Some(volume) = requirements.volume.filter(|v| *v > 1) {
            let amount = round_amount(f64::from(volume - 1) * min_price);
            components.push(QuoteComponent::new(
                format!("Объём: {} шт.", volume),
                amount,
                format!("{} × {}", volume - 1, min_price),
            ));
            base += amount;
        }

        if let Some(deadline) = requirements.deadline {
            let multiplier = deadline.urgency_multiplier();
            let delta = round_amount(multiplier_delta(base, multiplier));
            if delta > 0.0 {
                components.push(QuoteComponent::new(
                    format!("Срочность: {}", deadline.label()),
                    delta,
                    format!("×{}", multiplier),
                ));
                base += delta;
            }
        }

        let extras = &requirements.additional_requirements;
        if !extras.is_empty() {
            let amount = round_amount(
                extras.len() as f64 * self.settings.additional_requirement_surcharge,
            );
            components.push(QuoteComponent::new(
                "Дополнительные требования",
                amount,
                extras.join(", "),
            ));
            base += amount;
        }

        let discounts = self.discounts.evaluate(segment, requirements.volume, base);
        let eligible: Vec<f64> = discounts
            .iter()
            .filter(|d| d.eligible)
            .map(|d| d.percentage)
            .collect();
        let final_price = discounted_price(base, &eligible, min_price);

        let hard = requirements.complexity == Some(Complexity::Hard);
        let delivery_estimate = DeliveryEstimate {
            value: delivery_units(entry.delivery_time.max, requirements.volume, hard),
            unit: entry.delivery_time.unit.clone(),
        };

        Quote {
            kind: QuoteKind::Computed,
            service_slug: Some(entry.slug.clone()),
            service_name: entry.name.clone(),
            currency: entry.price_range.currency.clone(),
            base_price: base,
            components,
            discounts,
            final_price,
            delivery_estimate: Some(delivery_estimate),
        }
    }
}

impl std::fmt::Debug for PriceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceEngine")
            .field("store", &self.store)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Round to hundredths of a currency unit
fn round_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use copy_assistant_config::ServiceCatalog;
    use copy_assistant_core::DeadlineBucket;

    fn engine() -> PriceEngine {
        let store = Arc::new(CatalogStore::builtin().unwrap());
        PriceEngine::new(store, PricingSettings::default())
    }

    fn eligible_percents(quote: &Quote) -> Vec<f64> {
        quote.eligible_discounts().map(|d| d.percentage).collect()
    }

    #[test]
    fn test_full_scenario() {
        let reqs = ProjectRequirements {
            service_type: Some("seo".to_string()),
            volume: Some(12),
            complexity: Some(Complexity::Hard),
            deadline: Some(DeadlineBucket::Urgent),
            ..Default::default()
        };
        let quote = engine().quote("seo", &reqs, ClientSegment::New);

        assert_eq!(quote.kind, QuoteKind::Computed);
        assert_eq!(quote.service_slug.as_deref(), Some("seo-articles"));

        let amounts: Vec<f64> = quote.components.iter().map(|c| c.amount).collect();
        // base 3000, hard +1500, volume 11 × 3000, urgency ×2 on 37500
        assert_eq!(amounts, vec![3000.0, 1500.0, 33_000.0, 37_500.0]);
        assert_eq!(quote.base_price, 75_000.0);
        assert_eq!(quote.components_total(), quote.base_price);

        // new-client 10% + bulk 20%, both from the same base
        assert_eq!(eligible_percents(&quote), vec![10.0, 20.0]);
        assert_eq!(quote.final_price, 52_500.0);

        // 5 + ceil(12 / 3) = 9, × 1.5 → 14
        let delivery = quote.delivery_estimate.unwrap();
        assert_eq!(delivery.value, 14);
        assert_eq!(delivery.unit, "days");
    }

    #[test]
    fn test_unknown_service_placeholder() {
        let quote = engine().quote(
            "xyzzy-nonexistent",
            &ProjectRequirements::default(),
            ClientSegment::New,
        );
        assert!(quote.is_custom());
        assert_eq!(quote.base_price, 5000.0);
        assert_eq!(quote.final_price, quote.base_price);
        assert_eq!(quote.components.len(), 1);
        assert!(quote.discounts.is_empty());
        assert!(quote.delivery_estimate.is_none());
    }

    #[test]
    fn test_minimal_quote_is_catalog_minimum() {
        let quote = engine().quote("landing", &ProjectRequirements::default(), ClientSegment::Unknown);
        assert_eq!(quote.base_price, 8000.0);
        assert_eq!(quote.final_price, 8000.0);
        assert_eq!(quote.components.len(), 1);
        assert_eq!(quote.delivery_estimate.unwrap().value, 10);
    }

    #[test]
    fn test_price_floor_holds_for_all_combinations() {
        let engine = engine();
        let catalog = ServiceCatalog::builtin().unwrap();
        let segments = [
            ClientSegment::New,
            ClientSegment::Business,
            ClientSegment::Returning,
            ClientSegment::Unknown,
        ];
        let complexities = [None, Some(Complexity::Simple), Some(Complexity::Medium), Some(Complexity::Hard)];
        let deadlines = [None, Some(DeadlineBucket::Flexible), Some(DeadlineBucket::Today), Some(DeadlineBucket::Week)];

        for entry in &catalog.services {
            for segment in segments {
                for complexity in complexities {
                    for deadline in deadlines {
                        for volume in [None, Some(1), Some(10), Some(40)] {
                            let reqs = ProjectRequirements {
                                volume,
                                complexity,
                                deadline,
                                ..Default::default()
                            };
                            let quote = engine.quote(&entry.slug, &reqs, segment);
                            assert!(quote.final_price >= entry.price_range.min);
                            assert!((quote.components_total() - quote.base_price).abs() < 1e-6);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_discounts_are_additive() {
        // Business client with bulk volume: 20% + 25% from the same base
        let reqs = ProjectRequirements {
            volume: Some(10),
            ..Default::default()
        };
        let quote = engine().quote("seo", &reqs, ClientSegment::Business);
        assert_eq!(quote.base_price, 30_000.0);
        assert_eq!(eligible_percents(&quote), vec![20.0, 25.0]);
        // 30000 − 6000 − 7500; compounding would give 18000
        assert_eq!(quote.final_price, 16_500.0);
    }

    #[test]
    fn test_floor_clamps_heavy_discounts() {
        let settings = PricingSettings {
            new_client_percent: 100.0,
            ..Default::default()
        };
        let store = Arc::new(CatalogStore::builtin().unwrap());
        let quote = PriceEngine::new(store, settings).quote(
            "seo",
            &ProjectRequirements::default(),
            ClientSegment::New,
        );
        assert_eq!(quote.final_price, 3000.0);
    }

    #[test]
    fn test_additional_requirements_surcharge() {
        let reqs = ProjectRequirements {
            additional_requirements: vec!["Инфографика".to_string(), "Перевод на английский".to_string()],
            ..Default::default()
        };
        let quote = engine().quote("social", &reqs, ClientSegment::Unknown);
        let extras = quote.components.last().unwrap();
        assert_eq!(extras.amount, 1000.0);
        assert_eq!(quote.base_price, 2500.0);
    }

    #[test]
    fn test_medium_complexity_rounded() {
        let reqs = ProjectRequirements {
            complexity: Some(Complexity::Medium),
            ..Default::default()
        };
        let quote = engine().quote("seo", &reqs, ClientSegment::Unknown);
        assert_eq!(quote.components[1].amount, 600.0);
        assert_eq!(quote.base_price, 3600.0);
    }

    #[test]
    fn test_catalog_edits_visible_without_rebuild() {
        let store = Arc::new(CatalogStore::builtin().unwrap());
        let engine = PriceEngine::new(Arc::clone(&store), PricingSettings::default());
        assert_eq!(engine.quote("seo", &ProjectRequirements::default(), ClientSegment::Unknown).base_price, 3000.0);

        let mut catalog = (*store.snapshot()).clone();
        catalog.services[0].price_range.min = 3500.0;
        store.replace(catalog).unwrap();

        assert_eq!(engine.quote("seo", &ProjectRequirements::default(), ClientSegment::Unknown).base_price, 3500.0);
    }
}
