//! Turn intent detection
//!
//! Two independent checks the dialogue routes on: pricing requests and
//! expert how-to questions (with a topic bucket).

use serde::{Deserialize, Serialize};

use copy_assistant_core::{PhraseRule, PhraseRuleSet};

/// Topic bucket of an expert question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertTopic {
    Seo,
    Landing,
    Email,
    Social,
    General,
}

impl ExpertTopic {
    /// Key of the advice template for this topic
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertTopic::Seo => "seo",
            ExpertTopic::Landing => "landing",
            ExpertTopic::Email => "email",
            ExpertTopic::Social => "social",
            ExpertTopic::General => "general",
        }
    }
}

/// Intents found in one message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub pricing: bool,
    /// Set when the message is an expert question
    pub expert_topic: Option<ExpertTopic>,
}

#[derive(Debug, Clone)]
pub struct IntentDetector {
    pricing: PhraseRule<()>,
    expert: PhraseRule<()>,
    topics: PhraseRuleSet<ExpertTopic>,
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentDetector {
    pub fn new() -> Self {
        Self {
            pricing: PhraseRule::new(
                (),
                &[
                    "рассчита",
                    "посчита",
                    "расчет",
                    "расчёт",
                    "сколько стоит",
                    "стоимост",
                    "цена",
                    "цену",
                    "how much",
                    "price",
                ],
            ),
            expert: PhraseRule::new(
                (),
                &[
                    "как написать",
                    "как сделать",
                    "как улучшить",
                    "как увеличить",
                    "как повысить",
                    "совет",
                    "посоветуй",
                    "что лучше",
                    "какие ошибки",
                    "техник",
                    "лайфхак",
                ],
            ),
            topics: PhraseRuleSet::new(vec![
                PhraseRule::new(ExpertTopic::Seo, &["seo", "сео", "поиск", "ключев"]),
                PhraseRule::new(ExpertTopic::Landing, &["лендинг", "конверси", "посадочн"]),
                PhraseRule::new(
                    ExpertTopic::Email,
                    &["рассылк", "email", "письм", "open rate"],
                ),
                PhraseRule::new(ExpertTopic::Social, &["соцсет", "пост", "охват", "smm"]),
            ]),
        }
    }

    pub fn detect(&self, message: &str) -> Intents {
        let lower = message.to_lowercase();
        Intents {
            pricing: self.pricing.matched_phrase(&lower).is_some(),
            expert_topic: self.expert_topic_lower(&lower),
        }
    }

    pub fn is_pricing_request(&self, message: &str) -> bool {
        self.pricing.matches(message)
    }

    /// Topic bucket if the message is an expert question
    pub fn expert_topic(&self, message: &str) -> Option<ExpertTopic> {
        self.expert_topic_lower(&message.to_lowercase())
    }

    fn expert_topic_lower(&self, lower: &str) -> Option<ExpertTopic> {
        self.expert.matched_phrase(lower)?;
        Some(
            self.topics
                .first_match_lower(lower)
                .copied()
                .unwrap_or(ExpertTopic::General),
        )
    }
}
