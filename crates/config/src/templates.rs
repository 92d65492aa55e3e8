//! Response Templates Configuration
//!
//! Config-driven text for the dialogue: segment-tailored welcomes and
//! offers, expert advice per topic, and fixed messages. Templates use
//! `{variable}` placeholders filled at response time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use copy_assistant_core::ClientSegment;

use crate::error::{ConfigError, Result};

const BUILTIN_TEMPLATES: &str = include_str!("../data/templates.yaml");

/// Variables for template substitution, ordered for deterministic output
pub type TemplateVars = BTreeMap<String, String>;

/// Response templates loaded from templates.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTemplates {
    /// Welcome text for the first turn
    pub welcome: SegmentTemplates,
    /// "Personal offer" appended to expert advice
    pub offer_suffix: SegmentTemplates,
    /// Advice text keyed by topic ("seo", "landing", "email", "social", "general")
    #[serde(default)]
    pub expert_advice: BTreeMap<String, String>,
    pub messages: FixedMessages,
}

/// One variant per client segment plus a generic fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentTemplates {
    #[serde(default)]
    pub new: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub returning: Option<String>,
    #[serde(default)]
    pub unknown: Option<String>,
    /// Used when the segment's own variant is missing
    pub generic: String,
}

impl SegmentTemplates {
    /// Get the variant for a segment, falling back to the generic one
    pub fn for_segment(&self, segment: ClientSegment) -> &str {
        let variant = match segment {
            ClientSegment::New => &self.new,
            ClientSegment::Business => &self.business,
            ClientSegment::Returning => &self.returning,
            ClientSegment::Unknown => &self.unknown,
        };
        variant.as_deref().unwrap_or(&self.generic)
    }
}

/// Fixed texts used by the dialogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedMessages {
    /// Terminal answer for unclassified turns
    pub contact_fallback: String,
    /// Company boilerplate for company/contact questions
    pub company_info: String,
    /// Asked when pricing is requested without a known service
    pub price_clarification: String,
    /// Sent when the scripted dialogue reaches its end; `{summary}` lists requirements
    pub dialogue_complete: String,
    /// Explains the manual-consultation placeholder quote
    pub custom_quote_note: String,
}

impl ResponseTemplates {
    /// Parse templates from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::parse("response templates", e))
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::file_not_found(path.as_ref(), e))?;
        Self::from_yaml_str(&content)
    }

    /// Templates compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_TEMPLATES)
    }

    /// Advice for a topic, falling back to the "general" advice
    pub fn advice(&self, topic: &str) -> &str {
        self.expert_advice
            .get(topic)
            .or_else(|| self.expert_advice.get("general"))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Substitute variables in a template string.
    /// Variables use {variable_name} syntax; unknown placeholders are kept.
    pub fn substitute_variables(template: &str, vars: &TemplateVars) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{}}}", key), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_substitution() {
        let mut vars = TemplateVars::new();
        vars.insert("name".to_string(), "SEO-статьи".to_string());
        vars.insert("price_min".to_string(), "3000".to_string());

        let result = ResponseTemplates::substitute_variables(
            "{name}: от {price_min} ₽, {unknown}",
            &vars,
        );
        assert_eq!(result, "SEO-статьи: от 3000 ₽, {unknown}");
    }

    #[test]
    fn test_segment_fallback_to_generic() {
        let yaml = r#"
welcome:
  new: "Добро пожаловать!"
  generic: "Здравствуйте!"
offer_suffix:
  generic: "Скидка для вас"
messages:
  contact_fallback: "c"
  company_info: "i"
  price_clarification: "p"
  dialogue_complete: "d"
  custom_quote_note: "n"
"#;
        let templates = ResponseTemplates::from_yaml_str(yaml).unwrap();
        assert_eq!(templates.welcome.for_segment(ClientSegment::New), "Добро пожаловать!");
        assert_eq!(templates.welcome.for_segment(ClientSegment::Business), "Здравствуйте!");
        assert_eq!(templates.advice("seo"), "");
    }

    #[test]
    fn test_builtin_templates_cover_all_segments() {
        let templates = ResponseTemplates::builtin().unwrap();
        for segment in [
            ClientSegment::New,
            ClientSegment::Business,
            ClientSegment::Returning,
            ClientSegment::Unknown,
        ] {
            assert!(templates.welcome.for_segment(segment) != templates.welcome.generic);
            assert!(templates.offer_suffix.for_segment(segment) != templates.offer_suffix.generic);
        }
        for topic in ["seo", "landing", "email", "social", "general"] {
            assert!(!templates.advice(topic).is_empty());
        }
    }

    #[test]
    fn test_advice_falls_back_to_general() {
        let templates = ResponseTemplates::builtin().unwrap();
        assert_eq!(templates.advice("podcasts"), templates.advice("general"));
    }
}
