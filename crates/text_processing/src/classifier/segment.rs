//! Client segment detection

use copy_assistant_core::{ClientSegment, PhraseRule, PhraseRuleSet};

/// Detects the client segment from phrases implying "first time",
/// "company" or "worked before". Rules are checked in that order.
#[derive(Debug, Clone)]
pub struct SegmentDetector {
    rules: PhraseRuleSet<ClientSegment>,
}

impl Default for SegmentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentDetector {
    pub fn new() -> Self {
        Self::with_rules(PhraseRuleSet::new(vec![
            PhraseRule::new(
                ClientSegment::New,
                &[
                    "впервые",
                    "первый раз",
                    "новичок",
                    "новый клиент",
                    "ещё не заказывал",
                    "еще не заказывал",
                    "first time",
                ],
            ),
            PhraseRule::new(
                ClientSegment::Business,
                &[
                    "компани",
                    "бизнес",
                    "фирм",
                    "организаци",
                    "корпоратив",
                    "агентств",
                    "enterprise",
                ],
            ),
            PhraseRule::new(
                ClientSegment::Returning,
                &[
                    "уже работали",
                    "снова",
                    "опять",
                    "повторн",
                    "как в прошлый раз",
                    "постоянный клиент",
                    "ещё раз",
                    "еще раз",
                ],
            ),
        ]))
    }

    /// Use a custom rule list
    pub fn with_rules(rules: PhraseRuleSet<ClientSegment>) -> Self {
        Self { rules }
    }

    /// Detect a segment from the current message, then from recent messages
    /// newest first. Returns `None` when nothing matches; callers keep
    /// whatever segment they already have.
    pub fn detect<I, S>(&self, message: &str, recent: I) -> Option<ClientSegment>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: AsRef<str>,
    {
        if let Some(segment) = self.rules.first_match(message) {
            return Some(*segment);
        }

        recent
            .into_iter()
            .rev()
            .find_map(|m| self.rules.first_match(m.as_ref()).copied())
    }
}
