//! Configuration errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {path}: {source}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Service '{slug}' has an invalid price range: min {min} > max {max}")]
    InvalidPriceRange { slug: String, min: f64, max: f64 },

    #[error("Service '{slug}' has an invalid delivery window: min {min} > max {max}")]
    InvalidDeliveryTime { slug: String, min: u32, max: u32 },

    #[error("Duplicate service slug '{0}'")]
    DuplicateSlug(String),

    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting { key: &'static str, message: String },

    #[error("Catalog has no services")]
    EmptyCatalog,

    #[error("Dialogue entry step '{0}' is not defined")]
    MissingEntryStep(String),

    #[error("Dialogue step '{from}' transitions to unknown step '{to}'")]
    UnknownStep { from: String, to: String },
}

impl ConfigError {
    pub(crate) fn parse(what: &'static str, source: serde_yaml::Error) -> Self {
        Self::Parse { what, source }
    }

    pub(crate) fn file_not_found(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::FileNotFound {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
