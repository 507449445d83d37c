//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::director::prompt::{AspectRatio, ModelTier, Resolution};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key; empty until the user sets one
    pub api_key: String,
    pub model_tier: ModelTier,
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    pub use_grounding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model_tier: ModelTier::Flash,
            aspect_ratio: AspectRatio::Square,
            resolution: Resolution::OneK,
            use_grounding: false,
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Failed to parse config: {e}"),
                },
                Err(e) => eprintln!("Failed to read config: {e}"),
            }
        }

        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;

        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
            .join("CineBanana")
            .join("config.json")
    }
}
