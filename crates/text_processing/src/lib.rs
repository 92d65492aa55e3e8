//! Text processing for the copywriting assistant
//!
//! Deterministic keyword classification of client messages:
//! - Client segment (new / business / returning)
//! - Mood
//! - Turn intents (pricing, expert question, company info)
//! - Project requirements (service, volume, complexity, deadline, extras)

pub mod classifier;
pub mod entities;

pub use classifier::{
    Classification, ExpertTopic, IntentDetector, Intents, LexicalClassifier, MoodDetector,
    SegmentDetector,
};
pub use entities::RequirementExtractor;
