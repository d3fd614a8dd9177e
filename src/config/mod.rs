//! Configuration module for BrandLens.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts, ScenePrompts, SponsorPrompts, TalentPrompts};
pub use settings::{
    AgentSettings, CrawlerSettings, GeneralSettings, OpenAiSettings, PredictionSettings,
    PromptSettings, Settings, ThumbnailSettings, YoutubeSettings,
};
