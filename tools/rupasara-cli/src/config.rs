//! Storefront configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rupasara_commerce::currency::DEFAULT_RATES_ENDPOINT;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `intake.url`.
pub const ENV_INTAKE_URL: &str = "RUPASARA_INTAKE_URL";
/// Environment variable overriding `rates.url`.
pub const ENV_RATES_URL: &str = "RUPASARA_RATES_URL";
/// Environment variable overriding `messaging.whatsapp_number`.
pub const ENV_WHATSAPP_NUMBER: &str = "RUPASARA_WHATSAPP_NUMBER";
/// Environment variable overriding `storage.state_dir`.
pub const ENV_STATE_DIR: &str = "RUPASARA_STATE_DIR";

/// Storefront configuration file (`rupasara.toml` or `rupasara.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Order intake webhook.
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Exchange rate endpoint.
    #[serde(default)]
    pub rates: RatesConfig,

    /// Chat hand-off.
    #[serde(default)]
    pub messaging: MessagingConfig,

    /// Client-local state.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `RUPASARA_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_INTAKE_URL) {
            self.intake.url = Some(url);
        }
        if let Some(url) = get(ENV_RATES_URL) {
            self.rates.url = url;
        }
        if let Some(number) = get(ENV_WHATSAPP_NUMBER) {
            self.messaging.whatsapp_number = number;
        }
        if let Some(dir) = get(ENV_STATE_DIR) {
            self.storage.state_dir = PathBuf::from(dir);
        }
    }
}

/// Order intake configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntakeConfig {
    /// Webhook URL receiving order JSON. Orders cannot be submitted without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl IntakeConfig {
    /// The configured URL, if it is not blank.
    pub fn endpoint(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Exchange rate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatesConfig {
    #[serde(default = "default_rates_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rates_url() -> String {
    DEFAULT_RATES_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            url: default_rates_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Chat hand-off configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagingConfig {
    /// WhatsApp number in international format, digits only.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
}

fn default_whatsapp_number() -> String {
    "918123320912".to_string()
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
        }
    }
}

/// Where client-local state lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory for the preferences file, relative to the working directory
    /// unless absolute.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".rupasara")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
