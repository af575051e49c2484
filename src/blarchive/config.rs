use crate::error::{ArchiveError, Result};
use crate::media::DEFAULT_JPEG_QUALITY;
use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";

pub const DEFAULT_CAPTION_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CAPTION_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_CAPTION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for blarchive, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Category given to new cards when the gallery filter is "All"
    pub default_category: Category,

    /// JPEG quality for captured frames (1-100)
    pub jpeg_quality: u8,

    pub caption_endpoint: String,
    pub caption_model: String,
    pub caption_timeout_secs: u64,

    /// Environment variable holding the caption service API key
    pub caption_api_key_env: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            default_category: Category::Riize,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            caption_endpoint: DEFAULT_CAPTION_ENDPOINT.to_string(),
            caption_model: DEFAULT_CAPTION_MODEL.to_string(),
            caption_timeout_secs: DEFAULT_CAPTION_TIMEOUT_SECS,
            caption_api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// Keys accepted by `config <key> <value>`.
pub const KEYS: [&str; 6] = [
    "default-category",
    "jpeg-quality",
    "caption-endpoint",
    "caption-model",
    "caption-timeout",
    "caption-api-key-env",
];

impl ArchiveConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ArchiveError::Io)?;
        let config: ArchiveConfig =
            serde_json::from_str(&content).map_err(ArchiveError::Serialization)?;
        Ok(config.clamped())
    }

    /// Pull hand-edited values back into the ranges `set` accepts.
    fn clamped(mut self) -> Self {
        if self.caption_timeout_secs == 0 {
            warn!("caption timeout of 0 seconds raised to 1");
            self.caption_timeout_secs = 1;
        }
        let quality = self.jpeg_quality.clamp(1, 100);
        if quality != self.jpeg_quality {
            warn!(from = self.jpeg_quality, to = quality, "jpeg quality out of range");
            self.jpeg_quality = quality;
        }
        self
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ArchiveError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ArchiveError::Serialization)?;
        fs::write(config_path, content).map_err(ArchiveError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "default-category" => self.default_category.to_string(),
            "jpeg-quality" => self.jpeg_quality.to_string(),
            "caption-endpoint" => self.caption_endpoint.clone(),
            "caption-model" => self.caption_model.clone(),
            "caption-timeout" => self.caption_timeout_secs.to_string(),
            "caption-api-key-env" => self.caption_api_key_env.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |why: String| ArchiveError::Api(format!("Invalid value for {}: {}", key, why));
        match key {
            "default-category" => self.default_category = value.parse().map_err(invalid)?,
            "jpeg-quality" => {
                let quality: u8 = value.parse().map_err(|e| invalid(format!("{}", e)))?;
                if !(1..=100).contains(&quality) {
                    return Err(invalid("expected 1-100".to_string()));
                }
                self.jpeg_quality = quality;
            }
            "caption-endpoint" => self.caption_endpoint = value.to_string(),
            "caption-model" => self.caption_model = value.to_string(),
            "caption-timeout" => {
                let secs: u64 = value.parse().map_err(|e| invalid(format!("{}", e)))?;
                if secs == 0 {
                    return Err(invalid("timeout must be at least 1 second".to_string()));
                }
                self.caption_timeout_secs = secs;
            }
            "caption-api-key-env" => self.caption_api_key_env = value.to_string(),
            other => return Err(ArchiveError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}
