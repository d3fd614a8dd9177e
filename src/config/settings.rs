//! Configuration settings for BrandLens.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub openai: OpenAiSettings,
    pub prediction: PredictionSettings,
    pub thumbnail: ThumbnailSettings,
    pub crawler: CrawlerSettings,
    pub agent: AgentSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where downloaded media lands.
    pub downloads_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            downloads_dir: "~/.brandlens/downloads".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct YoutubeSettings {
    /// API key. Falls back to the YOUTUBE_API_KEY environment variable.
    pub api_key: Option<String>,
}


/// OpenAI model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// Chat model for scene analysis, extraction, and the agent.
    pub chat_model: String,
    /// Speech-to-text model.
    pub transcription_model: String,
    /// Duration in seconds for splitting long audio files.
    pub chunk_duration_seconds: u32,
    /// Maximum concurrent chunk transcriptions.
    pub max_concurrent_chunks: usize,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            chat_model: "gpt-4.1-mini".to_string(),
            transcription_model: "whisper-1".to_string(),
            chunk_duration_seconds: 120,
            max_concurrent_chunks: 3,
        }
    }
}

/// View prediction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionSettings {
    /// Confidence level for prediction intervals, in (0, 1).
    pub confidence_level: f64,
    /// How many months of uploads to include in the view series.
    pub months: u32,
    /// Minimum video duration in minutes; shorter uploads are skipped.
    pub min_duration_minutes: f64,
    /// Maximum number of videos in the view series.
    pub max_videos: u32,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            confidence_level: 0.90,
            months: 6,
            min_duration_minutes: 3.0,
            max_videos: 10,
        }
    }
}

/// Thumbnail appeal scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// HTTP endpoint of the image-text similarity scorer.
    pub endpoint: String,
    /// Softmax temperature applied to similarity logits.
    pub temperature: f64,
    /// Multiplier applied to the prompt contrast before the sigmoid.
    pub contrast_scale: f64,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8765/score".to_string(),
            temperature: 0.07,
            contrast_scale: 5.0,
        }
    }
}

/// Firecrawl web crawler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerSettings {
    /// API key. Falls back to the FIRECRAWL_API_KEY environment variable.
    pub api_key: Option<String>,
    /// Base URL of the crawl API.
    pub base_url: String,
    /// Maximum number of pages per crawl.
    pub page_limit: u32,
    /// Seconds between crawl status polls.
    pub poll_interval_seconds: u64,
    /// Seconds before an unfinished crawl is abandoned.
    pub timeout_seconds: u64,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.firecrawl.dev".to_string(),
            page_limit: 20,
            poll_interval_seconds: 5,
            timeout_seconds: 300,
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Chat model driving the tool-calling loop.
    pub model: String,
    /// Maximum tool-call iterations before the agent gives up.
    pub max_iterations: u32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            max_iterations: 15,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::BrandLensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brandlens")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded downloads directory path.
    pub fn downloads_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.downloads_dir)
    }

    /// YouTube API key from config, or the YOUTUBE_API_KEY environment variable.
    pub fn youtube_api_key(&self) -> Option<String> {
        self.youtube
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("YOUTUBE_API_KEY").ok().filter(|k| !k.is_empty()))
    }

    /// Firecrawl API key from config, or the FIRECRAWL_API_KEY environment variable.
    pub fn firecrawl_api_key(&self) -> Option<String> {
        self.crawler
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("FIRECRAWL_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.prediction.confidence_level, 0.90);
        assert_eq!(settings.prediction.months, 6);
        assert_eq!(settings.openai.chat_model, "gpt-4.1-mini");
        assert_eq!(settings.crawler.page_limit, 20);
        assert_eq!(settings.agent.max_iterations, 15);
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let toml_str = r#"
            [prediction]
            confidence_level = 0.95

            [youtube]
            api_key = "test-key"
        "#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.prediction.confidence_level, 0.95);
        assert_eq!(settings.youtube.api_key.as_deref(), Some("test-key"));
        // Untouched sections keep their defaults.
        assert_eq!(settings.prediction.months, 6);
        assert_eq!(settings.thumbnail.temperature, 0.07);
    }
}
