//! Mood detection
//!
//! Independent phrase sets evaluated in a fixed priority order:
//! urgency, then positive sentiment, then price concern, then curiosity.

use copy_assistant_core::{Mood, PhraseRule, PhraseRuleSet};

#[derive(Debug, Clone)]
pub struct MoodDetector {
    rules: PhraseRuleSet<Mood>,
}

impl Default for MoodDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodDetector {
    pub fn new() -> Self {
        Self {
            rules: PhraseRuleSet::new(vec![
                PhraseRule::new(
                    Mood::Impatient,
                    &[
                        "срочно",
                        "быстрее",
                        "как можно скорее",
                        "сегодня",
                        "завтра",
                        "горит",
                        "немедленно",
                        "asap",
                    ],
                ),
                PhraseRule::new(
                    Mood::Excited,
                    &[
                        "отлично",
                        "супер",
                        "здорово",
                        "класс",
                        "круто",
                        "замечательно",
                        "восторг",
                        "!!",
                    ],
                ),
                PhraseRule::new(
                    Mood::Concerned,
                    &[
                        "дорого",
                        "дешевле",
                        "скидк",
                        "бюджет",
                        "не уверен",
                        "сомнева",
                        "переживаю",
                    ],
                ),
                PhraseRule::new(
                    Mood::Interested,
                    &["интересн", "расскажите", "подробн", "хочу узнать", "?"],
                ),
            ]),
        }
    }

    /// Mood of a single message, `Neutral` when nothing matches
    pub fn detect(&self, message: &str) -> Mood {
        self.rules.first_match(message).copied().unwrap_or_default()
    }
}
