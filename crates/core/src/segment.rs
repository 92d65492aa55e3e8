//! Client segment and mood
//!
//! Both are closed sets. The segment drives tone and discount eligibility;
//! the mood is recomputed from every incoming message.

use serde::{Deserialize, Serialize};

/// Coarse client classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientSegment {
    /// First-time client
    New,
    /// Company / enterprise client
    Business,
    /// Client who has ordered before
    Returning,
    /// Not yet classified
    #[default]
    Unknown,
}

impl ClientSegment {
    /// Stable identifier used as a template / config key
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientSegment::New => "new",
            ClientSegment::Business => "business",
            ClientSegment::Returning => "returning",
            ClientSegment::Unknown => "unknown",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, ClientSegment::Unknown)
    }

    /// Merge a fresh classification into an existing one.
    ///
    /// A resolved segment is never downgraded to `Unknown`; an absent
    /// detection keeps the current value.
    pub fn merged_with(self, detected: Option<ClientSegment>) -> ClientSegment {
        match detected {
            Some(ClientSegment::Unknown) | None => self,
            Some(segment) => segment,
        }
    }
}

impl std::fmt::Display for ClientSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emotional tone of the latest message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Neutral,
    Interested,
    Concerned,
    Excited,
    Impatient,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Interested => "interested",
            Mood::Concerned => "concerned",
            Mood::Excited => "excited",
            Mood::Impatient => "impatient",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
