//! Error types for BrandLens.

use thiserror::Error;

/// Library-level error type for BrandLens operations.
#[derive(Error, Debug)]
pub enum BrandLensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("YouTube API error: {0}")]
    YouTube(String),

    #[error("Media download failed: {0}")]
    Download(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Thumbnail scoring failed: {0}")]
    Thumbnail(String),

    #[error("Crawl failed: {0}")]
    Crawl(String),

    #[error("Video analysis failed: {0}")]
    Analysis(String),

    #[error("Structured extraction failed: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for BrandLens operations.
pub type Result<T> = std::result::Result<T, BrandLensError>;
