//! Tracker configuration
//!
//! Loaded from `config.toml` when present, otherwise built from defaults.
//! The NeoWs API key is configuration, never a source literal; the
//! `NEO_API_KEY` environment variable overrides whatever the file says.

use serde::{Deserialize, Serialize};

use neotracker_core::feed::client::DEFAULT_API_BASE;

pub const API_KEY_ENV: &str = "NEO_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_api_key")]
    pub api_key: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_image_dir")]
    pub image_dir: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_api_key() -> String {
    // NASA's public demo key; heavily rate limited but always valid.
    "DEMO_KEY".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_image_dir() -> String {
    "data/image_cache".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: default_api_key(),
            log_level: default_log_level(),
            image_dir: default_image_dir(),
        }
    }
}

impl TrackerConfig {
    /// Read the config file if it exists, fall back to defaults otherwise,
    /// then apply the environment override for the API key.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = key;
            }
        }

        Ok(config)
    }
}
