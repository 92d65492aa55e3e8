//! Assistant settings
//!
//! Layered with the `config` crate: serde defaults, then an optional
//! settings file, then `COPY_ASSISTANT_*` environment variables
//! (`__` separates nested keys, e.g. `COPY_ASSISTANT_PRICING__NEW_CLIENT_PERCENT=12`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{ConfigError, Result};

/// Environment variable naming a settings file
pub const CONFIG_PATH_ENV: &str = "COPY_ASSISTANT_CONFIG";

const ENV_PREFIX: &str = "COPY_ASSISTANT";

/// Complete assistant settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub pricing: PricingSettings,
    pub session: SessionSettings,
    pub brand: BrandSettings,
    pub paths: PathSettings,
    pub console: ConsoleSettings,
    pub logging: LoggingSettings,
}

/// Price engine knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Placeholder price for unmatched services
    pub custom_quote_price: f64,
    /// Flat surcharge per additional requirement
    pub additional_requirement_surcharge: f64,
    pub new_client_percent: f64,
    pub returning_client_percent: f64,
    pub bulk_order_percent: f64,
    /// Minimum volume (inclusive) for the bulk discount
    pub bulk_order_min_volume: u32,
    pub enterprise_percent: f64,
    /// Base price a business client must exceed for the enterprise discount
    pub enterprise_min_base_price: f64,
    pub currency: String,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            custom_quote_price: constants::pricing::CUSTOM_QUOTE_PRICE,
            additional_requirement_surcharge: constants::pricing::ADDITIONAL_REQUIREMENT_SURCHARGE,
            new_client_percent: constants::discounts::NEW_CLIENT_PERCENT,
            returning_client_percent: constants::discounts::RETURNING_CLIENT_PERCENT,
            bulk_order_percent: constants::discounts::BULK_ORDER_PERCENT,
            bulk_order_min_volume: constants::discounts::BULK_ORDER_MIN_VOLUME,
            enterprise_percent: constants::discounts::ENTERPRISE_PERCENT,
            enterprise_min_base_price: constants::discounts::ENTERPRISE_MIN_BASE_PRICE,
            currency: constants::pricing::DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Recent user messages kept as classifier context
    pub recent_messages_capacity: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            recent_messages_capacity: constants::session::RECENT_MESSAGES_CAPACITY,
        }
    }
}

/// Company details substituted into templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandSettings {
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub telegram: String,
    pub whatsapp: String,
    pub address: String,
    pub working_hours: String,
}

impl Default for BrandSettings {
    fn default() -> Self {
        use constants::brand;
        Self {
            company_name: brand::COMPANY_NAME.to_string(),
            phone: brand::PHONE.to_string(),
            email: brand::EMAIL.to_string(),
            telegram: brand::TELEGRAM.to_string(),
            whatsapp: brand::WHATSAPP.to_string(),
            address: brand::ADDRESS.to_string(),
            working_hours: brand::WORKING_HOURS.to_string(),
        }
    }
}

impl BrandSettings {
    /// Template variables for brand placeholders
    pub fn template_vars(&self) -> crate::templates::TemplateVars {
        [
            ("company", &self.company_name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("telegram", &self.telegram),
            ("whatsapp", &self.whatsapp),
            ("address", &self.address),
            ("hours", &self.working_hours),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}

/// Optional YAML overrides for the built-in data files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub catalog: Option<PathBuf>,
    pub dialogue: Option<PathBuf>,
    pub templates: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Sleep a random delay before printing each response
    pub thinking_delay: bool,
    pub thinking_delay_min_ms: u64,
    pub thinking_delay_max_ms: u64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            thinking_delay: true,
            thinking_delay_min_ms: constants::console::THINKING_DELAY_MIN_MS,
            thinking_delay_max_ms: constants::console::THINKING_DELAY_MAX_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when RUST_LOG is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AssistantSettings {
    /// Load settings from an explicit file, the `COPY_ASSISTANT_CONFIG` file,
    /// or defaults, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let file = path.map(Path::to_path_buf).or(env_path);
        Self::load_layered(file.as_deref(), None)
    }

    /// Defaults plus environment overrides only
    pub fn from_env() -> Result<Self> {
        Self::load_layered(None, None)
    }

    /// Build from layers. `env` replaces the process environment when given.
    fn load_layered(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            if !path.exists() {
                return Err(ConfigError::file_not_found(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "settings file missing"),
                ));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings: AssistantSettings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        tracing::debug!(file = ?file, "Loaded assistant settings");
        Ok(settings)
    }

    /// Reject values the price engine and console cannot work with
    pub fn validate(&self) -> Result<()> {
        let p = &self.pricing;
        let percents = [
            ("pricing.new_client_percent", p.new_client_percent),
            ("pricing.returning_client_percent", p.returning_client_percent),
            ("pricing.bulk_order_percent", p.bulk_order_percent),
            ("pricing.enterprise_percent", p.enterprise_percent),
        ];
        for (key, value) in percents {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidSetting {
                    key,
                    message: format!("{} is not a percentage", value),
                });
            }
        }

        if p.custom_quote_price < 0.0 || p.additional_requirement_surcharge < 0.0 {
            return Err(ConfigError::InvalidSetting {
                key: "pricing",
                message: "prices must not be negative".to_string(),
            });
        }

        if self.session.recent_messages_capacity == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "session.recent_messages_capacity",
                message: "must be at least 1".to_string(),
            });
        }

        if self.console.thinking_delay_min_ms > self.console.thinking_delay_max_ms {
            return Err(ConfigError::InvalidSetting {
                key: "console.thinking_delay_min_ms",
                message: "must not exceed thinking_delay_max_ms".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_match_constants() {
        let settings = AssistantSettings::load_layered(None, env(&[])).unwrap();
        assert_eq!(settings, AssistantSettings::default());
        assert_eq!(settings.pricing.custom_quote_price, 5000.0);
        assert_eq!(settings.pricing.bulk_order_min_volume, 10);
        assert_eq!(settings.session.recent_messages_capacity, 10);
    }

    #[test]
    fn test_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assistant.yaml");
        std::fs::write(
            &path,
            "pricing:\n  new_client_percent: 12\nbrand:\n  phone: \"+7 000\"\n",
        )
        .unwrap();

        let settings = AssistantSettings::load_layered(Some(&path), env(&[])).unwrap();
        assert_eq!(settings.pricing.new_client_percent, 12.0);
        assert_eq!(settings.brand.phone, "+7 000");
        // Untouched fields keep defaults
        assert_eq!(settings.pricing.returning_client_percent, 15.0);
        assert_eq!(settings.brand.email, constants::brand::EMAIL);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assistant.yaml");
        std::fs::write(&path, "session:\n  recent_messages_capacity: 5\n").unwrap();

        let settings = AssistantSettings::load_layered(
            Some(&path),
            env(&[
                ("COPY_ASSISTANT_SESSION__RECENT_MESSAGES_CAPACITY", "3"),
                ("COPY_ASSISTANT_LOGGING__JSON", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.session.recent_messages_capacity, 3);
        assert!(settings.logging.json);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssistantSettings::load_layered(Some(&dir.path().join("nope.yaml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_percentage_rejected() {
        let mut settings = AssistantSettings::default();
        settings.pricing.bulk_order_percent = 120.0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key, .. } if key == "pricing.bulk_order_percent"));
    }

    #[test]
    fn test_brand_template_vars() {
        let vars = BrandSettings::default().template_vars();
        assert_eq!(vars.get("company").unwrap(), constants::brand::COMPANY_NAME);
        assert_eq!(vars.get("hours").unwrap(), constants::brand::WORKING_HOURS);
        assert_eq!(vars.len(), 7);
    }
}
