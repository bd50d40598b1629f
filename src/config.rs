use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `DM_COPILOT_AI__TEXT_MODEL`.
const ENV_PREFIX: &str = "DM_COPILOT_";
/// Plain environment variables consulted when no key is configured.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub ai: AiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Generative-AI settings shared by the co-pilot, the AI DM and the
/// illustrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub copilot_temperature: f32,
    pub dm_temperature: f32,
    /// How many recent player-chat messages the AI DM sees.
    pub dm_history_window: usize,
    pub request_timeout_secs: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            copilot_temperature: 0.7,
            dm_temperature: 0.9,
            dm_history_window: 10,
            request_timeout_secs: 120,
        }
    }
}

impl AiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl AppConfig {
    /// Load configuration: defaults, then `~/.config/dm-copilot/config.toml`,
    /// then `DM_COPILOT_*` environment variables. Returns `Default` if the
    /// merged result cannot be extracted.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        let figment = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config = match figment.extract::<AppConfig>() {
            Ok(config) => {
                log::info!("Loaded config (file: {})", config_path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config from {}: {e}. Using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };
        config.fill_api_key(|name| std::env::var(name).ok());
        config
    }

    /// Parse a TOML document over the defaults, without touching the
    /// environment.
    pub fn from_toml_str(contents: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string(contents))
            .extract()
    }

    pub fn from_path(path: &Path) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .extract()
    }

    /// Take the API key from the first non-empty well-known variable when the
    /// config carries none.
    pub fn fill_api_key(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.ai.has_api_key() {
            return;
        }
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
        {
            self.ai.api_key = Some(key);
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("dm-copilot"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("dm-copilot").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
