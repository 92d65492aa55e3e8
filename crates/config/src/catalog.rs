//! Service Catalog
//!
//! Read-only data the assistant answers from: sellable services, knowledge
//! snippets keyed by free-text tags, and portfolio cases. Loaded from YAML;
//! a built-in catalog ships with the crate.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::constants;
use crate::error::{ConfigError, Result};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

fn default_currency() -> String {
    constants::pricing::DEFAULT_CURRENCY.to_string()
}

fn default_delivery_unit() -> String {
    "days".to_string()
}

/// Price range of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Delivery window of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub min: u32,
    pub max: u32,
    #[serde(default = "default_delivery_unit")]
    pub unit: String,
}

/// Immutable description of a sellable service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub slug: String,
    pub name: String,
    /// Canonical category the classifier maps synonyms to
    pub category: String,
    pub price_range: PriceRange,
    pub delivery_time: DeliveryTime,
    #[serde(default)]
    pub features: Vec<String>,
    /// Service terms shown to the client
    #[serde(default)]
    pub rules: Vec<String>,
}

impl ServiceEntry {
    /// Case-insensitive substring match of a hint against name and category
    pub fn matches_hint(&self, lower_hint: &str) -> bool {
        !lower_hint.is_empty()
            && (self.slug == lower_hint
                || self.name.to_lowercase().contains(lower_hint)
                || self.category.to_lowercase().contains(lower_hint))
    }

    fn validate(&self) -> Result<()> {
        if self.price_range.min > self.price_range.max {
            return Err(ConfigError::InvalidPriceRange {
                slug: self.slug.clone(),
                min: self.price_range.min,
                max: self.price_range.max,
            });
        }
        if self.delivery_time.min > self.delivery_time.max {
            return Err(ConfigError::InvalidDeliveryTime {
                slug: self.slug.clone(),
                min: self.delivery_time.min,
                max: self.delivery_time.max,
            });
        }
        Ok(())
    }
}

/// Canned answer keyed by a comma-separated keyword set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// Comma-separated keywords; any one of them selects the record
    pub keywords: String,
    /// Answer template with `{placeholder}` variables
    pub template: String,
    /// Category or slug of the service whose facts are interpolated
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl KnowledgeRecord {
    pub fn keyword_list(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .split(',')
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
    }
}

/// Portfolio case shown as a work sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioCase {
    pub title: String,
    pub client: String,
    pub category: String,
    pub result: String,
}

/// Complete read-only catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
    #[serde(default)]
    pub knowledge: Vec<KnowledgeRecord>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioCase>,
}

impl ServiceCatalog {
    /// Parse and validate a catalog from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let catalog: ServiceCatalog =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::parse("service catalog", e))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::file_not_found(path.as_ref(), e))?;
        let catalog = Self::from_yaml_str(&content)?;

        tracing::info!(
            path = %path.as_ref().display(),
            services = catalog.services.len(),
            knowledge = catalog.knowledge.len(),
            "Loaded service catalog"
        );
        Ok(catalog)
    }

    /// Catalog compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Check price/delivery invariants and slug uniqueness
    pub fn validate(&self) -> Result<()> {
        if self.services.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for service in &self.services {
            if !seen.insert(service.slug.as_str()) {
                return Err(ConfigError::DuplicateSlug(service.slug.clone()));
            }
            service.validate()?;
        }
        Ok(())
    }

    /// Resolve a free-text service hint, first entry in catalog order wins
    pub fn find_service(&self, hint: &str) -> Option<&ServiceEntry> {
        let lower = hint.trim().to_lowercase();
        self.services.iter().find(|s| s.matches_hint(&lower))
    }

    pub fn service_by_category(&self, category: &str) -> Option<&ServiceEntry> {
        self.services.iter().find(|s| s.category == category)
    }

    pub fn portfolio_for_category(&self, category: &str) -> Vec<&PortfolioCase> {
        self.portfolio
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
services:
  - slug: seo-articles
    name: "SEO-статьи"
    category: seo
    price_range: { min: 3000, max: 8000 }
    delivery_time: { min: 3, max: 5 }
    features: ["Подбор ключевых слов"]
  - slug: landing-page
    name: "Тексты для лендинга"
    category: landing
    price_range: { min: 8000, max: 25000, currency: RUB }
    delivery_time: { min: 5, max: 10, unit: days }
knowledge:
  - keywords: "seo, статьи"
    template: "SEO от {price_min}"
    service: seo
"#;

    #[test]
    fn test_catalog_parsing_with_defaults() {
        let catalog = ServiceCatalog::from_yaml_str(YAML).unwrap();
        assert_eq!(catalog.services.len(), 2);

        let seo = &catalog.services[0];
        assert_eq!(seo.price_range.currency, "RUB");
        assert_eq!(seo.delivery_time.unit, "days");
        assert!(seo.rules.is_empty());

        let keywords: Vec<_> = catalog.knowledge[0].keyword_list().collect();
        assert_eq!(keywords, vec!["seo", "статьи"]);
    }

    #[test]
    fn test_find_service_by_category_and_name() {
        let catalog = ServiceCatalog::from_yaml_str(YAML).unwrap();
        assert_eq!(catalog.find_service("SEO").unwrap().slug, "seo-articles");
        assert_eq!(catalog.find_service("лендинг").unwrap().slug, "landing-page");
        assert_eq!(catalog.find_service("landing-page").unwrap().slug, "landing-page");
        assert!(catalog.find_service("xyzzy-nonexistent").is_none());
        assert!(catalog.find_service("   ").is_none());
    }

    #[test]
    fn test_invalid_price_range_rejected() {
        let yaml = r#"
services:
  - slug: broken
    name: Broken
    category: misc
    price_range: { min: 9000, max: 100 }
    delivery_time: { min: 1, max: 2 }
"#;
        let err = ServiceCatalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPriceRange { .. }));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let yaml = r#"
services:
  - slug: a
    name: A
    category: x
    price_range: { min: 1, max: 2 }
    delivery_time: { min: 1, max: 2 }
  - slug: a
    name: B
    category: y
    price_range: { min: 1, max: 2 }
    delivery_time: { min: 1, max: 2 }
"#;
        let err = ServiceCatalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSlug(slug) if slug == "a"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = ServiceCatalog::from_yaml_str("services: []").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = ServiceCatalog::builtin().unwrap();
        assert!(catalog.service_by_category("seo").is_some());
        assert!(catalog.service_by_category("landing").is_some());
        assert!(!catalog.knowledge.is_empty());
        assert!(!catalog.portfolio.is_empty());
        assert_eq!(catalog.service_by_category("seo").unwrap().price_range.min, 3000.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, YAML).unwrap();

        let catalog = ServiceCatalog::load(&path).unwrap();
        assert_eq!(catalog.services.len(), 2);

        let missing = ServiceCatalog::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(missing, ConfigError::FileNotFound { .. }));
    }
}
