//! Ordered phrase rules
//!
//! Every keyword classifier in the assistant is an ordered list of
//! `(phrases, category)` pairs evaluated first-match-wins. There is no
//! scoring: the declaration order is the priority order.
//!
//! # Example
//!
//! ```
//! use copy_assistant_core::{PhraseRule, PhraseRuleSet};
//!
//! let rules = PhraseRuleSet::new(vec![
//!     PhraseRule::new("urgent", &["срочно", "asap"]),
//!     PhraseRule::new("curious", &["?"]),
//! ]);
//!
//! assert_eq!(rules.first_match("Срочно нужен текст?"), Some(&"urgent"));
//! assert_eq!(rules.first_match("Привет"), None);
//! ```

use serde::{Deserialize, Serialize};

/// A single category with the phrases that select it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseRule<T> {
    /// Category produced when any phrase matches
    pub value: T,
    /// Lower-cased phrases, tested as substrings
    pub phrases: Vec<String>,
}

impl<T> PhraseRule<T> {
    pub fn new(value: T, phrases: &[&str]) -> Self {
        Self {
            value,
            phrases: phrases.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Build from owned phrases (e.g. comma-separated config keywords)
    pub fn from_phrases<I, S>(value: T, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            value,
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Returns the first phrase found in already lower-cased text
    pub fn matched_phrase(&self, lower_text: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|p| lower_text.contains(p.as_str()))
            .map(|p| p.as_str())
    }

    /// Case-insensitive substring test
    pub fn matches(&self, text: &str) -> bool {
        self.matched_phrase(&text.to_lowercase()).is_some()
    }
}

/// Ordered rule list, first match wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseRuleSet<T> {
    rules: Vec<PhraseRule<T>>,
}

impl<T> PhraseRuleSet<T> {
    pub fn new(rules: Vec<PhraseRule<T>>) -> Self {
        Self { rules }
    }

    /// Category of the first rule with a matching phrase
    pub fn first_match(&self, text: &str) -> Option<&T> {
        let lower = text.to_lowercase();
        self.first_match_lower(&lower)
    }

    /// Same as [`first_match`](Self::first_match) for text that is already lower-cased
    pub fn first_match_lower(&self, lower_text: &str) -> Option<&T> {
        self.rules.iter().find_map(|rule| {
            rule.matched_phrase(lower_text).map(|phrase| {
                tracing::trace!(phrase, "Phrase rule matched");
                &rule.value
            })
        })
    }

    /// Categories of every matching rule, in declaration order
    pub fn all_matches(&self, text: &str) -> Vec<&T> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.matched_phrase(&lower).is_some())
            .map(|rule| &rule.value)
            .collect()
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    pub fn rules(&self) -> &[PhraseRule<T>] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mood_rules() -> PhraseRuleSet<&'static str> {
        PhraseRuleSet::new(vec![
            PhraseRule::new("impatient", &["срочно", "ASAP"]),
            PhraseRule::new("excited", &["отлично", "супер"]),
            PhraseRule::new("interested", &["?"]),
        ])
    }

    #[test]
    fn test_first_match_respects_declaration_order() {
        let rules = mood_rules();
        assert_eq!(rules.first_match("Супер, но нужно срочно"), Some(&"impatient"));
    }

    #[test]
    fn test_case_insensitive() {
        let rules = mood_rules();
        assert_eq!(rules.first_match("asap please"), Some(&"impatient"));
        assert_eq!(rules.first_match("ОТЛИЧНО"), Some(&"excited"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(mood_rules().first_match("добрый день"), None);
    }

    #[test]
    fn test_all_matches() {
        let rules = mood_rules();
        let matches = rules.all_matches("Супер! А срочно можно?");
        assert_eq!(matches, vec![&"impatient", &"excited", &"interested"]);
    }

    #[test]
    fn test_from_phrases_trims_and_skips_empty() {
        let rule = PhraseRule::from_phrases(1, "SEO, сео , ,блог".split(','));
        assert_eq!(rule.phrases, vec!["seo", "сео", "блог"]);
        assert!(rule.matches("Нужен БЛОГ"));
    }
}
