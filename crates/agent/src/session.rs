//! Session State
//!
//! One record per conversation, threaded explicitly through every turn.
//! The host owns storage: it passes the state into `process_turn` and keeps
//! the returned state for the next call.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use copy_assistant_core::{ClientSegment, Mood, ProjectRequirements, Quote};

/// Where the conversation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    /// No scripted flow active
    Idle,
    /// `current_step_id` points into the step graph
    InScriptedStep,
    /// Pricing was requested but the service type is still unknown
    AwaitingPriceDetails,
}

/// Answer given inside a scripted step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAnswer {
    pub step_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    /// Number of completed turns
    pub turn_count: u32,
    pub current_step_id: Option<String>,
    pub awaiting_price_details: bool,
    /// Never downgraded to `Unknown` once resolved
    pub client_segment: ClientSegment,
    /// Only ever added to or overwritten field by field
    pub project_requirements: ProjectRequirements,
    /// Cleared whenever the requirements or the segment change
    pub last_quote: Option<Quote>,
    /// Last user messages, oldest first
    pub recent_messages: VecDeque<String>,
    /// Mood of the latest message
    pub mood: Mood,
    #[serde(default)]
    pub step_answers: Vec<StepAnswer>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session with a random ID
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            turn_count: 0,
            current_step_id: None,
            awaiting_price_details: false,
            client_segment: ClientSegment::Unknown,
            project_requirements: ProjectRequirements::default(),
            last_quote: None,
            recent_messages: VecDeque::new(),
            mood: Mood::Neutral,
            step_answers: Vec::new(),
        }
    }

    pub fn phase(&self) -> DialoguePhase {
        if self.awaiting_price_details {
            DialoguePhase::AwaitingPriceDetails
        } else if self.current_step_id.is_some() {
            DialoguePhase::InScriptedStep
        } else {
            DialoguePhase::Idle
        }
    }

    pub fn is_first_turn(&self) -> bool {
        self.turn_count == 0
    }

    /// Append a user message, evicting the oldest beyond `capacity`
    pub fn remember_message(&mut self, message: &str, capacity: usize) {
        self.recent_messages.push_back(message.to_string());
        while self.recent_messages.len() > capacity {
            self.recent_messages.pop_front();
        }
    }

    /// Merge newly detected requirements; a change invalidates the last quote
    pub fn merge_requirements(&mut self, detected: &ProjectRequirements) -> bool {
        let changed = self.project_requirements.merge(detected);
        if changed {
            self.last_quote = None;
        }
        changed
    }

    /// Merge a detected segment; a change invalidates the last quote
    pub fn update_segment(&mut self, detected: Option<ClientSegment>) -> bool {
        let merged = self.client_segment.merged_with(detected);
        if merged == self.client_segment {
            return false;
        }
        self.client_segment = merged;
        self.last_quote = None;
        true
    }

    pub fn enter_step(&mut self, step_id: impl Into<String>) {
        self.current_step_id = Some(step_id.into());
        self.awaiting_price_details = false;
    }

    pub fn await_price_details(&mut self) {
        self.current_step_id = None;
        self.awaiting_price_details = true;
    }

    pub fn return_to_idle(&mut self) {
        self.current_step_id = None;
        self.awaiting_price_details = false;
    }
}
