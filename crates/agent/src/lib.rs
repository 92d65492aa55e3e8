//! Conversational copywriting assistant
//!
//! Ties the classifier, price engine, knowledge base and scripted dialogue
//! graph into a single turn function:
//!
//! ```
//! use copy_assistant_agent::{CopyAssistant, SessionState, TurnRoute};
//!
//! let assistant = CopyAssistant::builtin().unwrap();
//! let outcome = assistant.process_turn("Здравствуйте", SessionState::new());
//! assert_eq!(outcome.route, TurnRoute::Welcome);
//!
//! let outcome = assistant.process_turn("Сколько стоит лендинг?", outcome.state);
//! assert!(outcome.response.quote.is_some());
//! ```
//!
//! Session state is owned by the caller and threaded through each call.

pub mod dialogue;
pub mod error;
pub mod knowledge;
pub mod navigation;
pub mod response;
pub mod session;

pub use dialogue::CopyAssistant;
pub use error::{AssistantError, Result};
pub use knowledge::{AnswerSource, KnowledgeAnswer, KnowledgeResponder};
pub use navigation::{service_url, Navigator};
pub use response::{format_amount, render_quote, AssistantResponse, TurnOutcome, TurnRoute};
pub use session::{DialoguePhase, SessionState, StepAnswer};
