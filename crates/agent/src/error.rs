//! Agent errors

use thiserror::Error;

use copy_assistant_config::ConfigError;

/// Errors building an assistant. Turns themselves never fail.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
