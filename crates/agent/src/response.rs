//! Turn responses and quote rendering

use serde::{Deserialize, Serialize};

use copy_assistant_core::{QuickLink, Quote};

use crate::session::SessionState;

/// Which branch of the dialogue produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRoute {
    Welcome,
    Pricing,
    PriceClarification,
    ExpertAdvice,
    ScriptedStep,
    CompanyInfo,
    Knowledge,
    ContactFallback,
}

impl TurnRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRoute::Welcome => "welcome",
            TurnRoute::Pricing => "pricing",
            TurnRoute::PriceClarification => "price_clarification",
            TurnRoute::ExpertAdvice => "expert_advice",
            TurnRoute::ScriptedStep => "scripted_step",
            TurnRoute::CompanyInfo => "company_info",
            TurnRoute::Knowledge => "knowledge",
            TurnRoute::ContactFallback => "contact_fallback",
        }
    }
}

/// What the host shows the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub text: String,
    pub recommendations: Vec<String>,
    /// Attached to pricing turns only
    pub quote: Option<Quote>,
    pub quick_links: Vec<QuickLink>,
}

impl AssistantResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            recommendations: Vec::new(),
            quote: None,
            quick_links: Vec::new(),
        }
    }

    pub fn with_links(mut self, links: Vec<QuickLink>) -> Self {
        self.quick_links = links;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = Some(quote);
        self
    }
}

/// Result of one turn: the response plus the state for the next call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub route: TurnRoute,
    pub response: AssistantResponse,
    pub state: SessionState,
}

/// Format a currency amount without trailing zero decimals
pub fn format_amount(amount: f64) -> String {
    if amount.fract().abs() < 1e-9 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

fn unit_label(unit: &str) -> &str {
    match unit {
        "days" => "дн.",
        "hours" => "ч.",
        other => other,
    }
}

/// Plain-text itemised breakdown of a quote
pub fn render_quote(quote: &Quote) -> String {
    let currency = quote.currency.as_str();
    let mut lines = vec![format!("Расчёт стоимости: {}", quote.service_name)];

    for component in &quote.components {
        lines.push(format!(
            "• {}: {} {}",
            component.name,
            format_amount(component.amount),
            currency
        ));
    }

    if quote.components.len() > 1 {
        lines.push(format!(
            "Итого до скидок: {} {}",
            format_amount(quote.base_price),
            currency
        ));
    }

    let eligible: Vec<_> = quote.eligible_discounts().collect();
    if !eligible.is_empty() {
        lines.push("Скидки:".to_string());
        for discount in eligible {
            lines.push(format!(
                "• {}: −{}%",
                discount.name,
                format_amount(discount.percentage)
            ));
        }
    }

    lines.push(format!(
        "Итоговая стоимость: {} {}",
        format_amount(quote.final_price),
        currency
    ));

    if let Some(ref delivery) = quote.delivery_estimate {
        lines.push(format!(
            "Срок выполнения: {} {}",
            delivery.value,
            unit_label(&delivery.unit)
        ));
    }

    lines.join("\n")
}
