//! BrandLens - YouTube Creator Analysis
//!
//! A CLI toolbox for analyzing YouTube creators from a brand's point of view.
//!
//! # Overview
//!
//! BrandLens allows you to:
//! - Inspect channels, videos, statistics, and comments via the YouTube Data API
//! - Predict the view range of a creator's next upload from their recent history
//! - Transcribe videos and break them into summarized scenes with sponsor detection
//! - Score thumbnail appeal with a CLIP model and gauge comment sentiment
//! - Crawl talent agency websites into a structured creator roster
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `youtube` - YouTube Data API client
//! - `media` - Video/audio download and processing via yt-dlp
//! - `transcription` - Speech-to-text transcription
//! - `analysis` - View prediction, scene analysis, and sentiment
//! - `vision` - Thumbnail scoring against a CLIP service
//! - `crawl` - Website crawling and talent roster extraction
//! - `agent` - Tool-calling agent over the full toolbox
//! - `toolkit` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use brandlens::analysis::IntervalMode;
//! use brandlens::config::Settings;
//! use brandlens::toolkit::Toolkit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let toolkit = Toolkit::new(settings)?;
//!
//!     // Predict the view range of a channel's next upload
//!     let prediction = toolkit
//!         .predict_views("UC_x5XG1OV2P6uZZ5FSM9Ttw", 0.90, IntervalMode::TwoSided)
//!         .await?;
//!     println!("Expected median views: {:.0}", prediction.fitted_median);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod media;
pub mod openai;
pub mod toolkit;
pub mod transcription;
pub mod vision;
pub mod youtube;

pub use error::{BrandLensError, Result};
