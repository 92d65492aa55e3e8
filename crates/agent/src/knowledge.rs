//! Knowledge Responder
//!
//! Answers from curated knowledge records keyed by comma-separated keyword
//! sets. The first record (in catalog order) with any keyword contained in
//! the message wins; there is no ranking.
//!
//! Company/contact questions are a separate, higher-priority lookup that
//! returns fixed boilerplate and short-circuits record matching.
//!
//! Catalog facts are interpolated when a response is built, from the
//! current store snapshot, so catalog edits show up immediately.

use std::sync::Arc;

use copy_assistant_config::{
    BrandSettings, CatalogStore, KnowledgeRecord, ResponseTemplates, ServiceCatalog, ServiceEntry,
    TemplateVars,
};
use copy_assistant_core::{PhraseRule, QuickLink};

use crate::navigation::Navigator;
use crate::response::format_amount;

/// Which lookup produced a knowledge answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Company,
    Record,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeAnswer {
    pub source: AnswerSource,
    pub text: String,
    pub recommendations: Vec<String>,
    pub quick_links: Vec<QuickLink>,
}

pub struct KnowledgeResponder {
    store: Arc<CatalogStore>,
    templates: Arc<ResponseTemplates>,
    navigator: Arc<Navigator>,
    brand: BrandSettings,
    company: PhraseRule<()>,
}

impl KnowledgeResponder {
    pub fn new(
        store: Arc<CatalogStore>,
        templates: Arc<ResponseTemplates>,
        navigator: Arc<Navigator>,
        brand: BrandSettings,
    ) -> Self {
        Self {
            store,
            templates,
            navigator,
            brand,
            company: PhraseRule::new(
                (),
                &[
                    "о компании",
                    "о вас",
                    "кто вы",
                    "контакт",
                    "телефон",
                    "адрес",
                    "связаться",
                    "реквизит",
                    "где вы находитесь",
                ],
            ),
        }
    }

    /// Answer a message from the knowledge base, if anything matches
    pub fn respond(&self, message: &str) -> Option<KnowledgeAnswer> {
        self.company(message).or_else(|| self.record(message))
    }

    /// Company/contact question.
    ///
    /// A message that itself carries a phone number or email address is
    /// someone leaving their contacts, not asking for ours.
    pub fn company(&self, message: &str) -> Option<KnowledgeAnswer> {
        if carries_contact_details(message) {
            return None;
        }
        self.company
            .matched_phrase(&message.to_lowercase())
            .map(|_| self.company_answer())
    }

    /// First knowledge record, in catalog order, with a keyword in the message
    pub fn record(&self, message: &str) -> Option<KnowledgeAnswer> {
        let lower = message.to_lowercase();
        let catalog = self.store.snapshot();
        let record = catalog.knowledge.iter().find(|record| {
            record
                .keyword_list()
                .any(|k| lower.contains(k.to_lowercase().as_str()))
        })?;

        tracing::debug!(keywords = %record.keywords, "Knowledge record matched");
        Some(self.render_record(&catalog, record))
    }

    /// Fixed company boilerplate closed by the contact links
    pub fn company_answer(&self) -> KnowledgeAnswer {
        let text = ResponseTemplates::substitute_variables(
            &self.templates.messages.company_info,
            &self.brand.template_vars(),
        );
        KnowledgeAnswer {
            source: AnswerSource::Company,
            text,
            recommendations: Vec::new(),
            quick_links: self.navigator.closing_links(),
        }
    }

    fn render_record(&self, catalog: &ServiceCatalog, record: &KnowledgeRecord) -> KnowledgeAnswer {
        let mut vars = self.brand.template_vars();
        vars.insert("price_list".to_string(), price_list(catalog));
        vars.insert("delivery_list".to_string(), delivery_list(catalog));
        vars.insert("portfolio".to_string(), portfolio_list(catalog));

        let mut quick_links = Vec::new();
        let service = record
            .service
            .as_deref()
            .and_then(|hint| catalog.find_service(hint));
        if let Some(entry) = service {
            insert_service_vars(&mut vars, entry);
            quick_links.extend(self.navigator.service_link(&entry.category));
        }

        KnowledgeAnswer {
            source: AnswerSource::Record,
            text: ResponseTemplates::substitute_variables(&record.template, &vars),
            recommendations: record.recommendations.clone(),
            quick_links,
        }
    }
}

impl std::fmt::Debug for KnowledgeResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeResponder")
            .field("store", &self.store)
            .finish()
    }
}

fn carries_contact_details(message: &str) -> bool {
    message.contains('@') || message.chars().filter(|c| c.is_ascii_digit()).count() >= 7
}

fn insert_service_vars(vars: &mut TemplateVars, entry: &ServiceEntry) {
    let pairs = [
        ("name", entry.name.clone()),
        ("price_min", format_amount(entry.price_range.min)),
        ("price_max", format_amount(entry.price_range.max)),
        ("currency", entry.price_range.currency.clone()),
        ("delivery_min", entry.delivery_time.min.to_string()),
        ("delivery_max", entry.delivery_time.max.to_string()),
        ("delivery_unit", entry.delivery_time.unit.clone()),
        ("features", bullets(&entry.features)),
        ("rules", bullets(&entry.rules)),
    ];
    for (key, value) in pairs {
        vars.insert(key.to_string(), value);
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn price_list(catalog: &ServiceCatalog) -> String {
    catalog
        .services
        .iter()
        .map(|s| {
            format!(
                "• {}: от {} до {} {}",
                s.name,
                format_amount(s.price_range.min),
                format_amount(s.price_range.max),
                s.price_range.currency
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn delivery_list(catalog: &ServiceCatalog) -> String {
    catalog
        .services
        .iter()
        .map(|s| {
            format!(
                "• {}: {}–{} дн.",
                s.name, s.delivery_time.min, s.delivery_time.max
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn portfolio_list(catalog: &ServiceCatalog) -> String {
    catalog
        .portfolio
        .iter()
        .map(|case| format!("• {} ({}): {}", case.title, case.client, case.result))
        .collect::<Vec<_>>()
        .join("\n")
}
