//! Project requirements accumulated over a conversation
//!
//! Fields are optional: an absent field means "not yet known", never zero
//! or empty. Merging only adds or overwrites, it never clears.

use serde::{Deserialize, Serialize};

/// Canonical complexity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Hard,
}

impl Complexity {
    /// Price multiplier applied to the base price
    pub fn multiplier(&self) -> f64 {
        match self {
            Complexity::Simple => 1.0,
            Complexity::Medium => 1.2,
            Complexity::Hard => 1.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Simple => "простая",
            Complexity::Medium => "средняя",
            Complexity::Hard => "сложная",
        }
    }
}

/// Closed set of deadline urgency buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineBucket {
    /// Explicitly not in a hurry
    Flexible,
    /// Same day
    Today,
    Tomorrow,
    /// Generic "urgent" phrasing without a concrete day
    Urgent,
    /// Within 48 hours
    TwoDays,
    Week,
}

impl DeadlineBucket {
    /// Urgency surcharge multiplier
    pub fn urgency_multiplier(&self) -> f64 {
        match self {
            DeadlineBucket::Today | DeadlineBucket::Tomorrow | DeadlineBucket::Urgent => 2.0,
            DeadlineBucket::TwoDays => 1.5,
            DeadlineBucket::Week => 1.2,
            DeadlineBucket::Flexible => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeadlineBucket::Flexible => "без спешки",
            DeadlineBucket::Today => "сегодня",
            DeadlineBucket::Tomorrow => "завтра",
            DeadlineBucket::Urgent => "срочно",
            DeadlineBucket::TwoDays => "за 48 часов",
            DeadlineBucket::Week => "в течение недели",
        }
    }
}

/// Structured requirements for a copywriting project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequirements {
    /// Canonical catalog category (e.g. "seo", "landing")
    pub service_type: Option<String>,
    /// Number of pieces
    pub volume: Option<u32>,
    pub deadline: Option<DeadlineBucket>,
    pub complexity: Option<Complexity>,
    /// Free-text extras, each priced as a flat surcharge
    #[serde(default)]
    pub additional_requirements: Vec<String>,
    pub target_audience: Option<String>,
    pub goals: Option<String>,
}

impl ProjectRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing is known yet
    pub fn is_empty(&self) -> bool {
        self.service_type.is_none()
            && self.volume.is_none()
            && self.deadline.is_none()
            && self.complexity.is_none()
            && self.additional_requirements.is_empty()
            && self.target_audience.is_none()
            && self.goals.is_none()
    }

    /// Merge newer detections into this record.
    ///
    /// Present scalar fields overwrite, absent ones are left untouched.
    /// Additional requirements are appended unless already listed.
    /// Returns `true` if any field value changed.
    pub fn merge(&mut self, newer: &ProjectRequirements) -> bool {
        let mut changed = false;

        changed |= merge_field(&mut self.service_type, &newer.service_type);
        changed |= merge_field(&mut self.volume, &newer.volume);
        changed |= merge_field(&mut self.deadline, &newer.deadline);
        changed |= merge_field(&mut self.complexity, &newer.complexity);
        changed |= merge_field(&mut self.target_audience, &newer.target_audience);
        changed |= merge_field(&mut self.goals, &newer.goals);

        for item in &newer.additional_requirements {
            if !self.additional_requirements.contains(item) {
                self.additional_requirements.push(item.clone());
                changed = true;
            }
        }

        changed
    }

    /// Human-readable summary lines for the fields that are known
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(ref service) = self.service_type {
            lines.push(format!("Услуга: {}", service));
        }
        if let Some(volume) = self.volume {
            lines.push(format!("Объём: {} шт.", volume));
        }
        if let Some(complexity) = self.complexity {
            lines.push(format!("Сложность: {}", complexity.label()));
        }
        if let Some(deadline) = self.deadline {
            lines.push(format!("Сроки: {}", deadline.label()));
        }
        if !self.additional_requirements.is_empty() {
            lines.push(format!(
                "Дополнительно: {}",
                self.additional_requirements.join(", ")
            ));
        }
        if let Some(ref audience) = self.target_audience {
            lines.push(format!("Аудитория: {}", audience));
        }
        if let Some(ref goals) = self.goals {
            lines.push(format!("Цель: {}", goals));
        }
        lines
    }
}

fn merge_field<T: Clone + PartialEq>(current: &mut Option<T>, newer: &Option<T>) -> bool {
    match newer {
        Some(value) if current.as_ref() != Some(value) => {
            *current = Some(value.clone());
            true
        }
        _ => false,
    }
}
