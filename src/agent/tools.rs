//! Tool definitions and implementations for the agent system.

use crate::analysis::{
    summarize, FittedLogNormal, IntervalMode, PredictionInterval, ViewIntervalEstimator,
};
use crate::error::{BrandLensError, Result};
use crate::toolkit::Toolkit;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Resolve a handle, custom URL, or name to a channel ID.
    ResolveChannel { identifier: String },

    /// Get a channel's profile.
    ChannelInfo { channel_id: String },

    /// Get a channel's profile together with its recent uploads.
    IntrospectChannel {
        identifier: String,
        #[serde(default = "default_recent_videos")]
        max_videos: u32,
    },

    /// Search YouTube for channels matching a query.
    SearchChannels {
        query: String,
        #[serde(default = "default_channel_results")]
        max_results: u32,
        #[serde(default = "default_min_subscribers")]
        min_subscribers: u64,
    },

    /// List a channel's most recent uploads.
    ListVideos {
        channel_id: String,
        #[serde(default = "default_recent_videos")]
        max_results: u32,
    },

    /// Search within a channel's uploads.
    SearchChannelVideos {
        channel_id: String,
        query: String,
        #[serde(default = "default_recent_videos")]
        max_results: u32,
    },

    /// Get a video's full metadata.
    VideoDetails { video_id: String },

    /// Get filtered per-video statistics for a channel.
    VideoStatistics {
        channel_id: String,
        #[serde(default = "default_recent_videos")]
        max_results: u32,
        #[serde(default = "default_stats_months")]
        months: u32,
        #[serde(default = "default_min_duration_minutes")]
        min_duration_minutes: f64,
    },

    /// Fetch a video's newest top-level comments.
    FetchComments {
        video_id: String,
        #[serde(default = "default_comment_results")]
        max_results: u32,
    },

    /// Download a video to the local downloads directory.
    DownloadVideo {
        video_id: String,
        #[serde(default = "default_quality")]
        quality: String,
    },

    /// Download a video's audio and transcribe it.
    TranscribeVideo { video_id: String },

    /// Transcribe a video and break it into scenes with sponsor mentions.
    AnalyzeVideo { video_id: String },

    /// Score a thumbnail's visual appeal from its URL.
    ScoreThumbnail { thumbnail_url: String },

    /// Score the sentiment of a batch of texts.
    CommentSentiment { texts: Vec<String> },

    /// Estimate a prediction interval for the next upload's views.
    PredictViews {
        historical_views: Vec<f64>,
        #[serde(default = "default_confidence_level")]
        confidence_level: f64,
        #[serde(default = "default_interval_type")]
        interval_type: String,
    },

    /// Crawl a talent agency website and extract its roster.
    CrawlTalentAgency {
        agency_url: String,
        #[serde(default = "default_page_limit")]
        page_limit: u32,
    },
}

fn default_recent_videos() -> u32 {
    10
}

fn default_channel_results() -> u32 {
    5
}

fn default_min_subscribers() -> u64 {
    1000
}

fn default_stats_months() -> u32 {
    6
}

fn default_min_duration_minutes() -> f64 {
    3.0
}

fn default_comment_results() -> u32 {
    25
}

fn default_quality() -> String {
    "best".to_string()
}

fn default_confidence_level() -> f64 {
    0.90
}

fn default_interval_type() -> String {
    "two-sided".to_string()
}

fn default_page_limit() -> u32 {
    20
}

/// Tool execution context with access to the assembled toolkit.
pub struct ToolContext {
    pub toolkit: Arc<Toolkit>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(toolkit: Arc<Toolkit>) -> Self {
        Self { toolkit }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::ResolveChannel { identifier } => {
                self.execute_resolve_channel(identifier).await
            }
            ToolCall::ChannelInfo { channel_id } => self.execute_channel_info(channel_id).await,
            ToolCall::IntrospectChannel {
                identifier,
                max_videos,
            } => self.execute_introspect_channel(identifier, *max_videos).await,
            ToolCall::SearchChannels {
                query,
                max_results,
                min_subscribers,
            } => {
                self.execute_search_channels(query, *max_results, *min_subscribers)
                    .await
            }
            ToolCall::ListVideos {
                channel_id,
                max_results,
            } => self.execute_list_videos(channel_id, *max_results).await,
            ToolCall::SearchChannelVideos {
                channel_id,
                query,
                max_results,
            } => {
                self.execute_search_channel_videos(channel_id, query, *max_results)
                    .await
            }
            ToolCall::VideoDetails { video_id } => self.execute_video_details(video_id).await,
            ToolCall::VideoStatistics {
                channel_id,
                max_results,
                months,
                min_duration_minutes,
            } => {
                self.execute_video_statistics(
                    channel_id,
                    *max_results,
                    *months,
                    *min_duration_minutes,
                )
                .await
            }
            ToolCall::FetchComments {
                video_id,
                max_results,
            } => self.execute_fetch_comments(video_id, *max_results).await,
            ToolCall::DownloadVideo { video_id, quality } => {
                self.execute_download_video(video_id, quality).await
            }
            ToolCall::TranscribeVideo { video_id } => {
                self.execute_transcribe_video(video_id).await
            }
            ToolCall::AnalyzeVideo { video_id } => self.execute_analyze_video(video_id).await,
            ToolCall::ScoreThumbnail { thumbnail_url } => {
                self.execute_score_thumbnail(thumbnail_url).await
            }
            ToolCall::CommentSentiment { texts } => self.execute_comment_sentiment(texts),
            ToolCall::PredictViews {
                historical_views,
                confidence_level,
                interval_type,
            } => self.execute_predict_views(historical_views, *confidence_level, interval_type),
            ToolCall::CrawlTalentAgency {
                agency_url,
                page_limit,
            } => {
                self.execute_crawl_talent_agency(agency_url, *page_limit)
                    .await
            }
        }
    }

    async fn execute_resolve_channel(&self, identifier: &str) -> Result<String> {
        let channel_id = self
            .toolkit
            .youtube()?
            .resolve_channel_id(identifier)
            .await?;
        Ok(format!("Channel ID: {}", channel_id))
    }

    async fn execute_channel_info(&self, channel_id: &str) -> Result<String> {
        let info = self.toolkit.youtube()?.channel_info(channel_id).await?;
        Ok(serde_json::to_string_pretty(&info)?)
    }

    async fn execute_introspect_channel(
        &self,
        identifier: &str,
        max_videos: u32,
    ) -> Result<String> {
        let report = self
            .toolkit
            .youtube()?
            .introspect_channel(identifier, max_videos)
            .await?;
        Ok(serde_json::to_string_pretty(&report)?)
    }

    async fn execute_search_channels(
        &self,
        query: &str,
        max_results: u32,
        min_subscribers: u64,
    ) -> Result<String> {
        let channels = self
            .toolkit
            .youtube()?
            .search_channels(query, max_results, min_subscribers)
            .await?;

        if channels.is_empty() {
            return Ok("No channels matched the query.".to_string());
        }

        Ok(serde_json::to_string_pretty(&channels)?)
    }

    async fn execute_list_videos(&self, channel_id: &str, max_results: u32) -> Result<String> {
        let videos = self
            .toolkit
            .youtube()?
            .list_videos(channel_id, max_results)
            .await?;

        if videos.is_empty() {
            return Ok("No videos found for this channel.".to_string());
        }

        Ok(serde_json::to_string_pretty(&videos)?)
    }

    async fn execute_search_channel_videos(
        &self,
        channel_id: &str,
        query: &str,
        max_results: u32,
    ) -> Result<String> {
        let videos = self
            .toolkit
            .youtube()?
            .search_channel_videos(channel_id, query, max_results)
            .await?;

        if videos.is_empty() {
            return Ok("No videos on this channel matched the query.".to_string());
        }

        Ok(serde_json::to_string_pretty(&videos)?)
    }

    async fn execute_video_details(&self, video_id: &str) -> Result<String> {
        let details = self.toolkit.youtube()?.video_details(video_id).await?;
        Ok(serde_json::to_string_pretty(&details)?)
    }

    async fn execute_video_statistics(
        &self,
        channel_id: &str,
        max_results: u32,
        months: u32,
        min_duration_minutes: f64,
    ) -> Result<String> {
        let stats = self
            .toolkit
            .youtube()?
            .video_statistics(channel_id, max_results, months, min_duration_minutes)
            .await?;

        if stats.is_empty() {
            return Ok(format!(
                "No uploads in the last {} months of at least {} minutes.",
                months, min_duration_minutes
            ));
        }

        Ok(serde_json::to_string_pretty(&stats)?)
    }

    async fn execute_fetch_comments(&self, video_id: &str, max_results: u32) -> Result<String> {
        let comments = self
            .toolkit
            .youtube()?
            .fetch_comments(video_id, max_results)
            .await?;

        if comments.is_empty() {
            return Ok("No comments found on this video.".to_string());
        }

        Ok(serde_json::to_string_pretty(&comments)?)
    }

    async fn execute_download_video(&self, video_id: &str, quality: &str) -> Result<String> {
        let path = self
            .toolkit
            .downloader()
            .download_video(video_id, quality)
            .await?;
        Ok(format!("Downloaded video to {}", path.display()))
    }

    async fn execute_transcribe_video(&self, video_id: &str) -> Result<String> {
        let transcribed = self.toolkit.transcribe_video(video_id).await?;
        Ok(format!(
            "Transcript of '{}' ({}):\n\n{}",
            transcribed.probe.title, video_id, transcribed.transcript
        ))
    }

    async fn execute_analyze_video(&self, video_id: &str) -> Result<String> {
        let analysis = self.toolkit.analyze_video(video_id).await?;
        Ok(serde_json::to_string_pretty(&analysis)?)
    }

    async fn execute_score_thumbnail(&self, thumbnail_url: &str) -> Result<String> {
        let score = self.toolkit.thumbnails().score_url(thumbnail_url).await?;
        Ok(format!(
            "Appeal: {:.3} (positive prompts {:.4}, negative prompts {:.4})",
            score.appeal, score.positive_mean, score.negative_mean
        ))
    }

    fn execute_comment_sentiment(&self, texts: &[String]) -> Result<String> {
        let summary = summarize(texts)?;
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    fn execute_predict_views(
        &self,
        historical_views: &[f64],
        confidence_level: f64,
        interval_type: &str,
    ) -> Result<String> {
        let mode: IntervalMode = interval_type.parse()?;
        let estimator = ViewIntervalEstimator::with_config(confidence_level, mode);
        let interval = estimator.estimate(historical_views)?;
        let median = FittedLogNormal::fit(historical_views)?.scale();
        Ok(format_prediction(&interval, median, historical_views.len()))
    }

    async fn execute_crawl_talent_agency(
        &self,
        agency_url: &str,
        page_limit: u32,
    ) -> Result<String> {
        let roster = self
            .toolkit
            .crawl_talent_agency(agency_url, page_limit)
            .await?;
        Ok(serde_json::to_string_pretty(&roster)?)
    }
}

/// Format an interval as text the model can relay.
fn format_prediction(interval: &PredictionInterval, fitted_median: f64, samples: usize) -> String {
    format!(
        "Predicted views for the next upload ({:.0}% {} interval, {} samples):\n  \
         Lower: {}\n  Upper: {}\n  Fitted median: {:.0}",
        interval.confidence_level * 100.0,
        interval.mode,
        samples,
        format_views(interval.lower),
        format_views(interval.upper),
        fitted_median
    )
}

/// Render a view bound, folding the infinite side of one-sided intervals.
fn format_views(value: f64) -> String {
    if value.is_infinite() {
        "unbounded".to_string()
    } else {
        format!("{:.0}", value)
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "resolve_channel".to_string(),
                description: Some(
                    "Resolve a channel handle, custom URL, or name to its canonical channel ID. \
                    Use this first when you only have a handle like @mkbhd."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "identifier": {
                            "type": "string",
                            "description": "Channel ID, @handle, custom URL, or channel name"
                        }
                    },
                    "required": ["identifier"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "channel_info".to_string(),
                description: Some(
                    "Get a channel's profile: title, description, subscriber count, \
                    video count, and total views."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_id": {
                            "type": "string",
                            "description": "The canonical channel ID (starts with UC)"
                        }
                    },
                    "required": ["channel_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "introspect_channel".to_string(),
                description: Some(
                    "Get a channel's profile together with its most recent uploads in one call. \
                    Accepts a handle or channel ID. Use this for a quick channel overview."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "identifier": {
                            "type": "string",
                            "description": "Channel ID, @handle, custom URL, or channel name"
                        },
                        "max_videos": {
                            "type": "integer",
                            "description": "Maximum number of recent uploads to include (default: 10)",
                            "default": 10
                        }
                    },
                    "required": ["identifier"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "search_channels".to_string(),
                description: Some(
                    "Search YouTube for channels matching a query, filtered to a minimum \
                    subscriber count and sorted by subscribers. Use the short phrase a person \
                    would realistically type into YouTube, not a full sentence."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        },
                        "max_results": {
                            "type": "integer",
                            "description": "Maximum number of channels (default: 5)",
                            "default": 5
                        },
                        "min_subscribers": {
                            "type": "integer",
                            "description": "Minimum subscriber count (default: 1000)",
                            "default": 1000
                        }
                    },
                    "required": ["query"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "list_videos".to_string(),
                description: Some(
                    "List a channel's most recent uploads with their statistics.".to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_id": {
                            "type": "string",
                            "description": "The canonical channel ID"
                        },
                        "max_results": {
                            "type": "integer",
                            "description": "Maximum number of videos (default: 10)",
                            "default": 10
                        }
                    },
                    "required": ["channel_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "search_channel_videos".to_string(),
                description: Some(
                    "Search within a single channel's uploads for videos matching a query."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_id": {
                            "type": "string",
                            "description": "The canonical channel ID"
                        },
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        },
                        "max_results": {
                            "type": "integer",
                            "description": "Maximum number of videos (default: 10)",
                            "default": 10
                        }
                    },
                    "required": ["channel_id", "query"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "video_details".to_string(),
                description: Some(
                    "Get a video's full metadata: title, description, duration, tags, \
                    and view/like/comment counts."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_id": {
                            "type": "string",
                            "description": "The video ID"
                        }
                    },
                    "required": ["video_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "video_statistics".to_string(),
                description: Some(
                    "Get per-video statistics for a channel's recent uploads, filtered by \
                    upload age and minimum duration. Feed the returned view counts to \
                    predict_views for an interval estimate."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel_id": {
                            "type": "string",
                            "description": "The canonical channel ID"
                        },
                        "max_results": {
                            "type": "integer",
                            "description": "Maximum number of videos (default: 10)",
                            "default": 10
                        },
                        "months": {
                            "type": "integer",
                            "description": "Only include uploads from the last N months (default: 6)",
                            "default": 6
                        },
                        "min_duration_minutes": {
                            "type": "number",
                            "description": "Skip videos shorter than this (default: 3.0)",
                            "default": 3.0
                        }
                    },
                    "required": ["channel_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "fetch_comments".to_string(),
                description: Some(
                    "Fetch a video's newest top-level comments with authors and like counts. \
                    Feed the comment texts to comment_sentiment for a sentiment summary."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_id": {
                            "type": "string",
                            "description": "The video ID"
                        },
                        "max_results": {
                            "type": "integer",
                            "description": "Maximum number of comments (default: 25)",
                            "default": 25
                        }
                    },
                    "required": ["video_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "download_video".to_string(),
                description: Some(
                    "Download a video file to the local downloads directory and return its path."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_id": {
                            "type": "string",
                            "description": "The video ID"
                        },
                        "quality": {
                            "type": "string",
                            "description": "Video quality: best, 1080p, 720p, 480p, or 360p (default: best)",
                            "default": "best"
                        }
                    },
                    "required": ["video_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "transcribe_video".to_string(),
                description: Some(
                    "Download a video's audio and transcribe it to text. \
                    Slow for long videos; prefer analyze_video when you also need scenes."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_id": {
                            "type": "string",
                            "description": "The video ID"
                        }
                    },
                    "required": ["video_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "analyze_video".to_string(),
                description: Some(
                    "Transcribe a video and break it into one-minute scenes with summaries \
                    and sponsor mentions, plus sponsors detected in the description."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "video_id": {
                            "type": "string",
                            "description": "The video ID"
                        }
                    },
                    "required": ["video_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "score_thumbnail".to_string(),
                description: Some(
                    "Score a thumbnail image's visual appeal between 0 and 1 from its URL. \
                    Higher is more appealing."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "thumbnail_url": {
                            "type": "string",
                            "description": "URL of the thumbnail image"
                        }
                    },
                    "required": ["thumbnail_url"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "comment_sentiment".to_string(),
                description: Some(
                    "Score the sentiment of a batch of texts and summarize it: mean \
                    polarity in [-1, 1], a label, and positive/negative/neutral counts."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "texts": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Texts to score, e.g. comment texts from fetch_comments"
                        }
                    },
                    "required": ["texts"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "predict_views".to_string(),
                description: Some(
                    "Estimate a prediction interval for a channel's next upload views \
                    from historical view counts. Fetch the counts first with \
                    video_statistics."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "historical_views": {
                            "type": "array",
                            "items": { "type": "number" },
                            "description": "View counts of recent uploads, all positive"
                        },
                        "confidence_level": {
                            "type": "number",
                            "description": "Confidence level strictly between 0 and 1 (default: 0.9)",
                            "default": 0.9
                        },
                        "interval_type": {
                            "type": "string",
                            "enum": ["lower", "upper", "two-sided"],
                            "description": "Interval type (default: two-sided)",
                            "default": "two-sided"
                        }
                    },
                    "required": ["historical_views"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "crawl_talent_agency".to_string(),
                description: Some(
                    "Crawl a talent agency website and extract its roster: agency name, \
                    contact details, and talents with social links."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "agency_url": {
                            "type": "string",
                            "description": "URL of the agency website"
                        },
                        "page_limit": {
                            "type": "integer",
                            "description": "Maximum number of pages to crawl (default: 20)",
                            "default": 20
                        }
                    },
                    "required": ["agency_url"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    // Parse the arguments JSON and construct the appropriate ToolCall variant
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| BrandLensError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "resolve_channel" => {
            let identifier = require_str(&args, "identifier")?;
            Ok(ToolCall::ResolveChannel { identifier })
        }
        "channel_info" => {
            let channel_id = require_str(&args, "channel_id")?;
            Ok(ToolCall::ChannelInfo { channel_id })
        }
        "introspect_channel" => {
            let identifier = require_str(&args, "identifier")?;
            let max_videos = args["max_videos"].as_u64().unwrap_or(10) as u32;
            Ok(ToolCall::IntrospectChannel {
                identifier,
                max_videos,
            })
        }
        "search_channels" => {
            let query = require_str(&args, "query")?;
            let max_results = args["max_results"].as_u64().unwrap_or(5) as u32;
            let min_subscribers = args["min_subscribers"].as_u64().unwrap_or(1000);
            Ok(ToolCall::SearchChannels {
                query,
                max_results,
                min_subscribers,
            })
        }
        "list_videos" => {
            let channel_id = require_str(&args, "channel_id")?;
            let max_results = args["max_results"].as_u64().unwrap_or(10) as u32;
            Ok(ToolCall::ListVideos {
                channel_id,
                max_results,
            })
        }
        "search_channel_videos" => {
            let channel_id = require_str(&args, "channel_id")?;
            let query = require_str(&args, "query")?;
            let max_results = args["max_results"].as_u64().unwrap_or(10) as u32;
            Ok(ToolCall::SearchChannelVideos {
                channel_id,
                query,
                max_results,
            })
        }
        "video_details" => {
            let video_id = require_str(&args, "video_id")?;
            Ok(ToolCall::VideoDetails { video_id })
        }
        "video_statistics" => {
            let channel_id = require_str(&args, "channel_id")?;
            let max_results = args["max_results"].as_u64().unwrap_or(10) as u32;
            let months = args["months"].as_u64().unwrap_or(6) as u32;
            let min_duration_minutes = args["min_duration_minutes"].as_f64().unwrap_or(3.0);
            Ok(ToolCall::VideoStatistics {
                channel_id,
                max_results,
                months,
                min_duration_minutes,
            })
        }
        "fetch_comments" => {
            let video_id = require_str(&args, "video_id")?;
            let max_results = args["max_results"].as_u64().unwrap_or(25) as u32;
            Ok(ToolCall::FetchComments {
                video_id,
                max_results,
            })
        }
        "download_video" => {
            let video_id = require_str(&args, "video_id")?;
            let quality = args["quality"].as_str().unwrap_or("best").to_string();
            Ok(ToolCall::DownloadVideo { video_id, quality })
        }
        "transcribe_video" => {
            let video_id = require_str(&args, "video_id")?;
            Ok(ToolCall::TranscribeVideo { video_id })
        }
        "analyze_video" => {
            let video_id = require_str(&args, "video_id")?;
            Ok(ToolCall::AnalyzeVideo { video_id })
        }
        "score_thumbnail" => {
            let thumbnail_url = require_str(&args, "thumbnail_url")?;
            Ok(ToolCall::ScoreThumbnail { thumbnail_url })
        }
        "comment_sentiment" => {
            let texts = args["texts"]
                .as_array()
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .ok_or_else(|| BrandLensError::Agent("Missing 'texts' argument".to_string()))?;
            Ok(ToolCall::CommentSentiment { texts })
        }
        "predict_views" => {
            let historical_views = args["historical_views"]
                .as_array()
                .map(|values| values.iter().filter_map(|v| v.as_f64()).collect())
                .ok_or_else(|| {
                    BrandLensError::Agent("Missing 'historical_views' argument".to_string())
                })?;
            let confidence_level = args["confidence_level"].as_f64().unwrap_or(0.90);
            let interval_type = args["interval_type"]
                .as_str()
                .unwrap_or("two-sided")
                .to_string();
            Ok(ToolCall::PredictViews {
                historical_views,
                confidence_level,
                interval_type,
            })
        }
        "crawl_talent_agency" => {
            let agency_url = require_str(&args, "agency_url")?;
            let page_limit = args["page_limit"].as_u64().unwrap_or(20) as u32;
            Ok(ToolCall::CrawlTalentAgency {
                agency_url,
                page_limit,
            })
        }
        _ => Err(BrandLensError::Agent(format!("Unknown tool: {}", name))),
    }
}

fn require_str(args: &serde_json::Value, key: &str) -> Result<String> {
    args[key]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BrandLensError::Agent(format!("Missing '{}' argument", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_channels_tool() {
        let tool = parse_tool_call(
            "search_channels",
            r#"{"query": "tech reviews", "max_results": 3}"#,
        )
        .unwrap();
        match tool {
            ToolCall::SearchChannels {
                query,
                max_results,
                min_subscribers,
            } => {
                assert_eq!(query, "tech reviews");
                assert_eq!(max_results, 3);
                assert_eq!(min_subscribers, 1000);
            }
            _ => panic!("Expected SearchChannels tool"),
        }
    }

    #[test]
    fn test_parse_transcribe_tool() {
        let tool = parse_tool_call("transcribe_video", r#"{"video_id": "abc123"}"#).unwrap();
        match tool {
            ToolCall::TranscribeVideo { video_id } => {
                assert_eq!(video_id, "abc123");
            }
            _ => panic!("Expected TranscribeVideo tool"),
        }
    }

    #[test]
    fn test_parse_predict_views_with_series() {
        let tool = parse_tool_call(
            "predict_views",
            r#"{"historical_views": [1000, 2000, 1500], "interval_type": "lower"}"#,
        )
        .unwrap();
        match tool {
            ToolCall::PredictViews {
                historical_views,
                confidence_level,
                interval_type,
            } => {
                assert_eq!(historical_views, vec![1000.0, 2000.0, 1500.0]);
                assert_eq!(confidence_level, 0.90);
                assert_eq!(interval_type, "lower");
            }
            _ => panic!("Expected PredictViews tool"),
        }
    }

    #[test]
    fn test_parse_predict_views_requires_series() {
        let result = parse_tool_call("predict_views", r#"{"confidence_level": 0.8}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_comment_sentiment_texts() {
        let tool = parse_tool_call(
            "comment_sentiment",
            r#"{"texts": ["Great video!", "This was terrible"]}"#,
        )
        .unwrap();
        match tool {
            ToolCall::CommentSentiment { texts } => {
                assert_eq!(texts.len(), 2);
                assert_eq!(texts[0], "Great video!");
            }
            _ => panic!("Expected CommentSentiment tool"),
        }
    }

    #[test]
    fn test_parse_rejects_missing_argument() {
        let result = parse_tool_call("channel_info", r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_tool() {
        let result = parse_tool_call("delete_channel", r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_definitions_cover_every_tool() {
        let definitions = tool_definitions();
        assert_eq!(definitions.len(), 16);

        let names: Vec<_> = definitions
            .iter()
            .map(|d| d.function.name.as_str())
            .collect();
        for name in [
            "resolve_channel",
            "video_statistics",
            "predict_views",
            "crawl_talent_agency",
        ] {
            assert!(names.contains(&name), "missing definition for {}", name);
        }
    }

    #[test]
    fn test_every_definition_name_round_trips() {
        let canned_args: std::collections::HashMap<&str, &str> = [
            ("resolve_channel", r#"{"identifier": "@mkbhd"}"#),
            ("channel_info", r#"{"channel_id": "UC123"}"#),
            ("introspect_channel", r#"{"identifier": "@mkbhd"}"#),
            ("search_channels", r#"{"query": "tech"}"#),
            ("list_videos", r#"{"channel_id": "UC123"}"#),
            (
                "search_channel_videos",
                r#"{"channel_id": "UC123", "query": "gpu"}"#,
            ),
            ("video_details", r#"{"video_id": "abc"}"#),
            ("video_statistics", r#"{"channel_id": "UC123"}"#),
            ("fetch_comments", r#"{"video_id": "abc"}"#),
            ("download_video", r#"{"video_id": "abc"}"#),
            ("transcribe_video", r#"{"video_id": "abc"}"#),
            ("analyze_video", r#"{"video_id": "abc"}"#),
            (
                "score_thumbnail",
                r#"{"thumbnail_url": "https://i.ytimg.com/vi/abc/hq720.jpg"}"#,
            ),
            ("comment_sentiment", r#"{"texts": ["nice"]}"#),
            ("predict_views", r#"{"historical_views": [100.0, 200.0]}"#),
            ("crawl_talent_agency", r#"{"agency_url": "https://example.com"}"#),
        ]
        .into_iter()
        .collect();

        for definition in tool_definitions() {
            let name = definition.function.name.as_str();
            let arguments = canned_args
                .get(name)
                .copied()
                .unwrap_or_else(|| panic!("no canned arguments for {}", name));
            let tool = parse_tool_call(name, arguments)
                .unwrap_or_else(|e| panic!("{} failed to parse: {}", name, e));
            let tagged = serde_json::to_value(&tool).unwrap();
            assert_eq!(tagged["name"], name, "enum tag mismatch for {}", name);
        }
    }

    #[test]
    fn test_format_views_folds_infinite_bounds() {
        assert_eq!(format_views(12345.6), "12346");
        assert_eq!(format_views(f64::INFINITY), "unbounded");
    }
}
