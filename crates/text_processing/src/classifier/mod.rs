//! Lexical Classifier
//!
//! Maps a free-text message (plus recent history as context) to a client
//! segment, a mood, turn intents and the project requirements it mentions.
//! Classification is a pure function of its inputs.

mod intent;
mod mood;
mod segment;

pub use intent::{ExpertTopic, IntentDetector, Intents};
pub use mood::MoodDetector;
pub use segment::SegmentDetector;

use serde::{Deserialize, Serialize};

use copy_assistant_core::{ClientSegment, Mood, ProjectRequirements};

use crate::entities::RequirementExtractor;

/// Result of classifying one message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Detected segment; `None` leaves the caller's segment unchanged
    pub segment: Option<ClientSegment>,
    pub mood: Mood,
    pub intents: Intents,
    /// Requirements mentioned in this message only
    pub detected: ProjectRequirements,
}

#[derive(Debug, Clone, Default)]
pub struct LexicalClassifier {
    segments: SegmentDetector,
    moods: MoodDetector,
    intents: IntentDetector,
    extractor: RequirementExtractor,
}

impl LexicalClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a message. `recent` holds earlier user messages, oldest first.
    pub fn classify<I, S>(&self, message: &str, recent: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: AsRef<str>,
    {
        let classification = Classification {
            segment: self.segments.detect(message, recent),
            mood: self.moods.detect(message),
            intents: self.intents.detect(message),
            detected: self.extractor.extract(message),
        };

        tracing::trace!(
            segment = ?classification.segment,
            mood = ?classification.mood,
            intents = ?classification.intents,
            "Classified message"
        );
        classification
    }

    pub fn extractor(&self) -> &RequirementExtractor {
        &self.extractor
    }

    pub fn intents(&self) -> &IntentDetector {
        &self.intents
    }
}
