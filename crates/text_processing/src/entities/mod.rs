//! Project Requirement Extraction
//!
//! Extracts copywriting project requirements from text:
//! - Service type (synonyms mapped to canonical catalog categories)
//! - Volume (first integer followed by a unit word)
//! - Complexity level
//! - Deadline bucket
//! - Additional requirements, target audience and goals
//!
//! # Example
//!
//! ```
//! use copy_assistant_core::{Complexity, DeadlineBucket};
//! use copy_assistant_text_processing::entities::RequirementExtractor;
//!
//! let extractor = RequirementExtractor::new();
//! let reqs = extractor.extract("Нужно 12 статей для блога, тема сложная, срочно");
//!
//! assert_eq!(reqs.service_type.as_deref(), Some("seo"));
//! assert_eq!(reqs.volume, Some(12));
//! assert_eq!(reqs.complexity, Some(Complexity::Hard));
//! assert_eq!(reqs.deadline, Some(DeadlineBucket::Urgent));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use copy_assistant_core::{
    Complexity, DeadlineBucket, PhraseRule, PhraseRuleSet, ProjectRequirements,
};

// Text after the marker up to the first sentence punctuation
static AUDIENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:целевая\s+аудитория|аудитория)\b\s*(?:[:\-–—]|это)?\s*([^.!?\n]+)")
        .unwrap()
});

static GOALS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:цель|цели|задача)\b\s*(?:[:\-–—]|это)?\s*([^.!?\n]+)").unwrap()
});

// Word-anchored "simple" forms; a bare "прост" stem would catch "просто"
static SIMPLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:несложн\w*|прост(?:ой|ая|ое|ые|ого|ую|ым|ыми)|л[её]гк(?:ий|ая|ое|ие|ого|ую)|базов\w*)\b",
    )
    .unwrap()
});

// "пост" in any case form, as a whole word
static POST_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bпост(?:а|у|ом|е|ы|ов|ам|ами|ах)?\b").unwrap());

/// Service synonyms by canonical catalog category, in match priority order
pub const SERVICE_SYNONYMS: &[(&str, &[&str])] = &[
    ("landing", &["лендинг", "landing", "посадочн"]),
    ("seo", &["seo", "сео", "статьи", "статья", "статей", "блог"]),
    ("email", &["email", "e-mail", "рассылк", "письм"]),
    (
        "social",
        &["соцсет", "smm", "instagram", "инстаграм", "telegram-канал"],
    ),
    (
        "product",
        &["карточк", "описания товар", "описание товар", "маркетплейс"],
    ),
    ("commercial", &["коммерческ", "презентаци"]),
];

const SOCIAL: &str = "social";

/// Word prefixes that count as a volume unit
const VOLUME_UNITS: &[&str] = &[
    "шт", "стат", "текст", "пост", "пис", "страниц", "карточ", "лендинг", "piece", "article",
    "text",
];

/// Requirement extractor
///
/// All rule lists are ordered and evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct RequirementExtractor {
    services: PhraseRuleSet<&'static str>,
    complexity: PhraseRuleSet<Complexity>,
    deadlines: PhraseRuleSet<DeadlineBucket>,
    extras: PhraseRuleSet<&'static str>,
}

impl Default for RequirementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementExtractor {
    pub fn new() -> Self {
        Self {
            services: PhraseRuleSet::new(
                SERVICE_SYNONYMS
                    .iter()
                    .map(|(category, phrases)| PhraseRule::new(*category, phrases))
                    .collect(),
            ),
            // Simple is matched first, by SIMPLE_PATTERN
            complexity: PhraseRuleSet::new(vec![
                PhraseRule::new(
                    Complexity::Hard,
                    &["сложн", "непрост", "экспертн", "техническ", "глубок"],
                ),
                PhraseRule::new(Complexity::Medium, &["средн", "стандартн", "обычн"]),
            ]),
            // "не срочно" before "срочно"; same-day/tomorrow before generic urgency
            deadlines: PhraseRuleSet::new(vec![
                PhraseRule::new(
                    DeadlineBucket::Flexible,
                    &["не срочно", "не горит", "не торопимся", "когда удобно"],
                ),
                PhraseRule::new(DeadlineBucket::Today, &["сегодня"]),
                PhraseRule::new(DeadlineBucket::Tomorrow, &["завтра"]),
                PhraseRule::new(
                    DeadlineBucket::Urgent,
                    &["срочно", "asap", "как можно скорее", "горит"],
                ),
                PhraseRule::new(
                    DeadlineBucket::TwoDays,
                    &["48 час", "два дня", "2 дня", "пару дней"],
                ),
                // "в неделю" is a frequency, not a deadline
                PhraseRule::new(
                    DeadlineBucket::Week,
                    &[
                        "за неделю",
                        "через неделю",
                        "в течение недели",
                        "к концу недели",
                        "на этой неделе",
                        "неделя",
                        "7 дней",
                    ],
                ),
            ]),
            extras: PhraseRuleSet::new(vec![
                PhraseRule::new("Подбор изображений", &["изображен", "картинк"]),
                PhraseRule::new("Работа с ключевыми словами", &["ключев"]),
                PhraseRule::new("Проверка уникальности", &["уникальн", "антиплагиат"]),
                PhraseRule::new("Инфографика", &["инфографик"]),
                PhraseRule::new("Перевод на английский", &["перевод"]),
                PhraseRule::new("Несколько вариантов текста", &["a/b", "вариант"]),
            ]),
        }
    }

    /// Extract every requirement field found in the text.
    /// Fields that are not mentioned stay `None`/empty.
    pub fn extract(&self, text: &str) -> ProjectRequirements {
        let lower = text.to_lowercase();
        let reqs = ProjectRequirements {
            service_type: self.extract_service_type_lower(&lower),
            volume: self.extract_volume(&lower),
            deadline: self.deadlines.first_match_lower(&lower).copied(),
            complexity: self.extract_complexity_lower(&lower),
            additional_requirements: self.extract_additional_lower(&lower),
            target_audience: capture_phrase(&AUDIENCE_PATTERN, text),
            goals: capture_phrase(&GOALS_PATTERN, text),
        };

        if !reqs.is_empty() {
            tracing::debug!(
                service = ?reqs.service_type,
                volume = ?reqs.volume,
                deadline = ?reqs.deadline,
                complexity = ?reqs.complexity,
                "Extracted requirements"
            );
        }
        reqs
    }

    /// Canonical catalog category for the first matching synonym
    pub fn extract_service_type(&self, text: &str) -> Option<String> {
        self.extract_service_type_lower(&text.to_lowercase())
    }

    fn extract_service_type_lower(&self, lower: &str) -> Option<String> {
        self.service_categories_lower(lower)
            .next()
            .map(|category| category.to_string())
    }

    /// Every service category mentioned, in synonym-table order
    pub fn service_categories(&self, text: &str) -> Vec<&'static str> {
        self.service_categories_lower(&text.to_lowercase()).collect()
    }

    fn service_categories_lower<'a>(
        &'a self,
        lower: &'a str,
    ) -> impl Iterator<Item = &'static str> + 'a {
        self.services
            .rules()
            .iter()
            .filter(move |rule| {
                rule.matched_phrase(lower).is_some()
                    || (rule.value == SOCIAL && POST_WORD.is_match(lower))
            })
            .map(|rule| rule.value)
    }

    /// First integer immediately followed by a unit word ("12 статей", "5шт")
    pub fn extract_volume(&self, text: &str) -> Option<u32> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.unicode_words().collect();

        for (i, word) in words.iter().enumerate() {
            let digits_end = word
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(idx, _)| idx)
                .unwrap_or(word.len());
            if digits_end == 0 {
                continue;
            }

            let (digits, suffix) = word.split_at(digits_end);
            let unit = if suffix.is_empty() {
                words.get(i + 1).copied()
            } else {
                Some(suffix)
            };

            if unit.map_or(false, is_volume_unit) {
                if let Ok(volume) = digits.parse::<u32>() {
                    return Some(volume);
                }
            }
        }
        None
    }

    pub fn extract_complexity(&self, text: &str) -> Option<Complexity> {
        self.extract_complexity_lower(&text.to_lowercase())
    }

    fn extract_complexity_lower(&self, lower: &str) -> Option<Complexity> {
        if SIMPLE_PATTERN.is_match(lower) {
            return Some(Complexity::Simple);
        }
        self.complexity.first_match_lower(lower).copied()
    }

    pub fn extract_deadline(&self, text: &str) -> Option<DeadlineBucket> {
        self.deadlines.first_match(text).copied()
    }

    /// Every additional requirement mentioned, in rule order
    pub fn extract_additional(&self, text: &str) -> Vec<String> {
        self.extract_additional_lower(&text.to_lowercase())
    }

    fn extract_additional_lower(&self, lower: &str) -> Vec<String> {
        self.extras
            .rules()
            .iter()
            .filter(|rule| rule.matched_phrase(lower).is_some())
            .map(|rule| rule.value.to_string())
            .collect()
    }
}

fn is_volume_unit(word: &str) -> bool {
    VOLUME_UNITS.iter().any(|unit| word.starts_with(unit))
}

fn capture_phrase(pattern: &Regex, text: &str) -> Option<String> {
    let caps = pattern.captures(text)?;
    let phrase = caps.get(1)?.as_str().trim().trim_end_matches(',').trim();
    if phrase.is_empty() {
        None
    } else {
        Some(phrase.to_string())
    }
}
