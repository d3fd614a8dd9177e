//! CLI module for BrandLens.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// BrandLens - YouTube channel and sponsorship analysis
///
/// A CLI for researching creators: channel discovery, video analysis,
/// sponsor detection, view prediction, and talent roster extraction.
#[derive(Parser, Debug)]
#[command(name = "brandlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize BrandLens and verify system requirements
    Init {
        /// Reset an existing config file to the defaults
        #[arg(long)]
        force: bool,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Inspect a channel's profile and recent uploads
    Channel {
        /// Channel ID, @handle, custom URL, or channel name
        identifier: String,

        /// Number of recent uploads to include
        #[arg(short = 'n', long, default_value = "10")]
        videos: u32,
    },

    /// Search YouTube for channels
    Search {
        /// Search query
        query: String,

        /// Maximum number of channels
        #[arg(short, long, default_value = "5")]
        limit: u32,

        /// Minimum subscriber count
        #[arg(long, default_value = "1000")]
        min_subscribers: u64,
    },

    /// List a channel's recent uploads, optionally filtered by a query
    Videos {
        /// Channel ID
        channel_id: String,

        /// Only show uploads matching this query
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum number of videos
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Show a video's full metadata
    Video {
        /// Video ID or URL
        video_id: String,
    },

    /// Show filtered statistics for a channel's recent uploads
    Stats {
        /// Channel ID
        channel_id: String,

        /// Maximum number of videos
        #[arg(short, long, default_value = "10")]
        limit: u32,

        /// Only include uploads from the last N months
        #[arg(short, long, default_value = "6")]
        months: u32,

        /// Skip videos shorter than this many minutes
        #[arg(long, default_value = "3.0")]
        min_duration: f64,
    },

    /// Show a video's newest comments
    Comments {
        /// Video ID
        video_id: String,

        /// Maximum number of comments
        #[arg(short, long, default_value = "25")]
        limit: u32,

        /// Also report the average comment polarity
        #[arg(long)]
        sentiment: bool,
    },

    /// Predict the view range for a channel's next upload
    Predict {
        /// Channel whose recent uploads supply the view counts
        #[arg(long)]
        channel: Option<String>,

        /// Comma-separated view counts to fit directly, skipping the API
        #[arg(long, value_delimiter = ',')]
        views: Option<Vec<f64>>,

        /// Confidence level, strictly between 0 and 1
        #[arg(short = 'c', long, default_value = "0.9")]
        confidence: f64,

        /// Interval mode (lower, upper, two-sided)
        #[arg(long, default_value = "two-sided")]
        mode: String,
    },

    /// Download a video to the downloads directory
    Download {
        /// Video ID or URL
        video_id: String,

        /// Video quality (best, 1080p, 720p, 480p, 360p)
        #[arg(short, long, default_value = "best")]
        quality: String,
    },

    /// Download a video's audio and transcribe it
    Transcribe {
        /// Video ID or URL
        video_id: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Transcribe a video and split it into scenes with sponsor mentions
    Analyze {
        /// Video ID or URL
        video_id: String,

        /// Write the analysis as JSON to a file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Score a thumbnail's visual appeal
    Thumbnail {
        /// Image URL, or a video ID to score that video's thumbnail
        target: String,
    },

    /// Summarize the sentiment of a video's comments
    Sentiment {
        /// Video ID
        video_id: String,

        /// Maximum number of comments to score
        #[arg(short, long, default_value = "25")]
        limit: u32,
    },

    /// Crawl a talent agency website and extract its roster
    Talents {
        /// Agency website URL
        url: String,

        /// Maximum number of pages to crawl
        #[arg(short, long, default_value = "20")]
        pages: u32,

        /// Write the roster as JSON to a file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run an AI agent to research channels, videos, and talent
    Agent {
        /// The task for the agent (e.g., "Find the top tech channels and their sponsors")
        task: String,

        /// Extra context for the agent (e.g., a channel or video ID)
        #[arg(short = 'x', long)]
        context: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "prediction.months")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
