//! Scripted Dialogue Configuration
//!
//! Defines the fixed directed graph of qualification steps. Each step has a
//! prompt and either a fixed next step or a keyword selector evaluated
//! against the client's answer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use copy_assistant_core::PhraseRule;

use crate::error::{ConfigError, Result};

const BUILTIN_DIALOGUE: &str = include_str!("../data/dialogue.yaml");

/// Step graph loaded from dialogue.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueGraph {
    /// Step a new conversation starts in
    #[serde(default = "default_entry_step")]
    pub entry_step: String,
    /// Step definitions keyed by step ID
    #[serde(default)]
    pub steps: BTreeMap<String, StepDefinition>,
}

fn default_entry_step() -> String {
    "start".to_string()
}

/// A single scripted step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Text asked when the conversation enters this step
    pub prompt: String,
    /// Where the answer leads; absent for terminal steps
    #[serde(default)]
    pub next: Option<StepTransition>,
}

/// Transition out of a step.
/// Either a fixed step ID or a selector over the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepTransition {
    /// Always go to this step
    Fixed(String),
    /// Pick a branch by keywords in the answer
    Select(BranchSelector),
}

/// Keyword branches evaluated in order, first match wins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSelector {
    #[serde(default)]
    pub branches: Vec<Branch>,
    /// Target when no branch matches
    pub default: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub keywords: Vec<String>,
    pub target: String,
}

impl StepTransition {
    /// Resolve the next step ID for an answer
    pub fn select(&self, answer: &str) -> &str {
        match self {
            Self::Fixed(target) => target.as_str(),
            Self::Select(selector) => selector
                .branches
                .iter()
                .find(|b| PhraseRule::from_phrases((), &b.keywords).matches(answer))
                .map(|b| b.target.as_str())
                .unwrap_or(selector.default.as_str()),
        }
    }

    /// Every step ID this transition can lead to
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Fixed(target) => vec![target.as_str()],
            Self::Select(selector) => selector
                .branches
                .iter()
                .map(|b| b.target.as_str())
                .chain(std::iter::once(selector.default.as_str()))
                .collect(),
        }
    }
}

impl DialogueGraph {
    /// Parse and validate a graph from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let graph: DialogueGraph =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::parse("dialogue graph", e))?;
        graph.validate()?;
        Ok(graph)
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::file_not_found(path.as_ref(), e))?;
        Self::from_yaml_str(&content)
    }

    /// Graph compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_DIALOGUE)
    }

    /// Entry step must exist and every transition must point at a known step
    pub fn validate(&self) -> Result<()> {
        if !self.steps.contains_key(&self.entry_step) {
            return Err(ConfigError::MissingEntryStep(self.entry_step.clone()));
        }

        for (id, step) in &self.steps {
            let Some(ref next) = step.next else { continue };
            for target in next.targets() {
                if !self.steps.contains_key(target) {
                    return Err(ConfigError::UnknownStep {
                        from: id.clone(),
                        to: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Get a step definition by ID
    pub fn get_step(&self, step_id: &str) -> Option<&StepDefinition> {
        self.steps.get(step_id)
    }

    pub fn entry(&self) -> Option<&StepDefinition> {
        self.steps.get(&self.entry_step)
    }

    /// Next step for an answer given in `step_id`.
    /// `None` means the step is terminal (or unknown).
    pub fn next_step(&self, step_id: &str, answer: &str) -> Option<&str> {
        self.steps
            .get(step_id)
            .and_then(|step| step.next.as_ref())
            .map(|next| next.select(answer))
    }

    /// Get the prompt for a step
    pub fn prompt(&self, step_id: &str) -> Option<&str> {
        self.steps.get(step_id).map(|s| s.prompt.as_str())
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.keys().map(|s| s.as_str()).collect()
    }
}
