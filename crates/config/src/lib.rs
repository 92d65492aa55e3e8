//! Configuration for the copywriting assistant
//!
//! Supports:
//! - Service catalog with knowledge and portfolio records (YAML, hot-swappable)
//! - Scripted dialogue step graph
//! - Response templates
//! - Layered settings (defaults, file, environment)

pub mod catalog;
pub mod constants;
pub mod dialogue;
pub mod error;
pub mod settings;
pub mod store;
pub mod templates;

pub use catalog::{
    DeliveryTime, KnowledgeRecord, PortfolioCase, PriceRange, ServiceCatalog, ServiceEntry,
};
pub use dialogue::{Branch, BranchSelector, DialogueGraph, StepDefinition, StepTransition};
pub use error::{ConfigError, Result};
pub use settings::{
    AssistantSettings, BrandSettings, ConsoleSettings, LoggingSettings, PathSettings,
    PricingSettings, SessionSettings, CONFIG_PATH_ENV,
};
pub use store::CatalogStore;
pub use templates::{FixedMessages, ResponseTemplates, SegmentTemplates, TemplateVars};
