//! Typed client for the YouTube Data API v3.
//!
//! Every method is a thin wrapper over one or two GET requests. Count
//! fields arrive as JSON strings and are decoded to integers here, so
//! callers only ever see the domain types from [`super::types`].

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::error::{BrandLensError, Result};

use super::types::{
    iso8601_duration_minutes, ChannelHit, ChannelInfo, ChannelReport, Comment, VideoDetails,
    VideoStats,
};

/// YouTube Data API v3 client.
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    channel_id_regex: Regex,
}

impl YouTubeClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/youtube/v3";

    const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// The API caps most list endpoints at 50 items per page.
    const PAGE_SIZE: u32 = 50;

    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(BrandLensError::Config(
                "YouTube API key is not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .build()?;

        let channel_id_regex =
            Regex::new(r"^UC[a-zA-Z0-9_-]{22}$").expect("Invalid regex");

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            channel_id_regex,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, resource);
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("key", self.api_key.clone()));

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(BrandLensError::YouTube(format!("{}: {}", status, message)));
        }

        serde_json::from_str(&body).map_err(|e| {
            BrandLensError::YouTube(format!("Failed to parse {} response: {}", resource, e))
        })
    }

    /// Turns a channel ID, @handle, or channel URL into a canonical
    /// channel ID, falling back to a search when the input is a name.
    pub async fn resolve_channel_id(&self, identifier: &str) -> Result<String> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(BrandLensError::InvalidInput(
                "channel identifier is empty".to_string(),
            ));
        }

        if let Some(channel_id) = self.extract_channel_id(identifier) {
            return Ok(channel_id);
        }

        let term = search_term(identifier);
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet".to_string()),
                    ("type", "channel".to_string()),
                    ("q", term),
                    ("maxResults", "1".to_string()),
                ],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .and_then(|item| {
                item.id
                    .channel_id
                    .or_else(|| item.snippet.and_then(|s| s.channel_id))
            })
            .ok_or_else(|| {
                BrandLensError::NotFound(format!("No channel matched '{}'", identifier))
            })
    }

    fn extract_channel_id(&self, identifier: &str) -> Option<String> {
        if self.channel_id_regex.is_match(identifier) {
            return Some(identifier.to_string());
        }
        if let Some(pos) = identifier.find("/channel/") {
            let tail = &identifier[pos + "/channel/".len()..];
            let segment = tail.split(['/', '?']).next().unwrap_or("");
            if self.channel_id_regex.is_match(segment) {
                return Some(segment.to_string());
            }
        }
        None
    }

    /// Profile and lifetime statistics for a channel.
    pub async fn channel_info(&self, channel_id: &str) -> Result<ChannelInfo> {
        let response: ChannelListResponse = self
            .get_json(
                "channels",
                &[
                    ("part", "snippet,statistics".to_string()),
                    ("id", channel_id.to_string()),
                ],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(channel_info_from)
            .ok_or_else(|| BrandLensError::NotFound(format!("Channel {} not found", channel_id)))
    }

    /// Resolves an identifier, then bundles the channel profile with
    /// its most recent uploads.
    pub async fn introspect_channel(
        &self,
        identifier: &str,
        max_videos: u32,
    ) -> Result<ChannelReport> {
        let channel_id = self.resolve_channel_id(identifier).await?;
        let channel = self.channel_info(&channel_id).await?;
        let videos = self.list_videos(&channel_id, max_videos).await?;
        Ok(ChannelReport { channel, videos })
    }

    /// Most recent uploads of a channel, newest first.
    pub async fn list_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<VideoDetails>> {
        let playlist_id = self.uploads_playlist_id(channel_id).await?;
        let video_ids = self.upload_video_ids(&playlist_id, max_results).await?;
        self.video_details_batch(&video_ids).await
    }

    /// Relevance-ordered search restricted to one channel's uploads.
    pub async fn search_channel_videos(
        &self,
        channel_id: &str,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<VideoDetails>> {
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet".to_string()),
                    ("channelId", channel_id.to_string()),
                    ("q", query.to_string()),
                    ("type", "video".to_string()),
                    ("order", "relevance".to_string()),
                    ("maxResults", max_results.min(Self::PAGE_SIZE).to_string()),
                ],
            )
            .await?;

        let video_ids: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.video_details_batch(&video_ids).await
    }

    /// Full details for a single video.
    pub async fn video_details(&self, video_id: &str) -> Result<VideoDetails> {
        let response: VideoListResponse = self
            .get_json(
                "videos",
                &[
                    ("part", "snippet,statistics,contentDetails".to_string()),
                    ("id", video_id.to_string()),
                ],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(video_details_from)
            .ok_or_else(|| BrandLensError::NotFound(format!("Video {} not found", video_id)))
    }

    /// Details for many videos, batched at the API's page size.
    pub async fn video_details_batch(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>> {
        let mut details = Vec::with_capacity(video_ids.len());
        for chunk in video_ids.chunks(Self::PAGE_SIZE as usize) {
            let response: VideoListResponse = self
                .get_json(
                    "videos",
                    &[
                        ("part", "snippet,statistics,contentDetails".to_string()),
                        ("id", chunk.join(",")),
                    ],
                )
                .await?;
            details.extend(response.items.into_iter().map(video_details_from));
        }
        Ok(details)
    }

    /// Engagement numbers for recent long-form uploads. Shorts and
    /// stale videos are filtered out so the series reflects the
    /// channel's current baseline.
    pub async fn video_statistics(
        &self,
        channel_id: &str,
        max_results: u32,
        months: u32,
        min_duration_minutes: f64,
    ) -> Result<Vec<VideoStats>> {
        let playlist_id = self.uploads_playlist_id(channel_id).await?;
        let video_ids = self
            .upload_video_ids(&playlist_id, Self::PAGE_SIZE)
            .await?;
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let cutoff = Utc::now() - Duration::days(30 * months as i64);
        let mut stats = Vec::new();
        for chunk in video_ids.chunks(Self::PAGE_SIZE as usize) {
            let response: VideoListResponse = self
                .get_json(
                    "videos",
                    &[
                        ("part", "snippet,statistics,contentDetails".to_string()),
                        ("id", chunk.join(",")),
                    ],
                )
                .await?;
            for video in response.items {
                if let Some(item) = video_stats_from(video, cutoff, min_duration_minutes) {
                    stats.push(item);
                    if stats.len() as u32 >= max_results {
                        return Ok(stats);
                    }
                }
            }
        }
        Ok(stats)
    }

    /// Newest top-level comments on a video, paged until the requested
    /// count is reached or the thread runs out.
    pub async fn fetch_comments(&self, video_id: &str, max_results: u32) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = Vec::new();
        let mut page_token: Option<String> = None;

        while (comments.len() as u32) < max_results {
            let batch = (max_results - comments.len() as u32).min(100);
            let mut params = vec![
                ("part", "snippet".to_string()),
                ("videoId", video_id.to_string()),
                ("maxResults", batch.to_string()),
                ("order", "time".to_string()),
                ("textFormat", "plainText".to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let response: CommentThreadsResponse =
                self.get_json("commentThreads", &params).await?;
            if response.items.is_empty() {
                break;
            }
            for item in response.items {
                if let Some(comment) = comment_from(item) {
                    comments.push(comment);
                }
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        comments.truncate(max_results as usize);
        Ok(comments)
    }

    /// Discovers channels behind the most-viewed videos of the last
    /// month for a topic, keeping those above a subscriber floor.
    pub async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
        min_subscribers: u64,
    ) -> Result<Vec<ChannelHit>> {
        let published_after =
            (Utc::now() - Duration::days(30)).to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet".to_string()),
                    ("q", query.to_string()),
                    ("type", "video".to_string()),
                    ("order", "viewCount".to_string()),
                    ("publishedAfter", published_after),
                    ("maxResults", Self::PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        // Results are ordered by view count, so the first video seen
        // per channel is that channel's best one.
        let mut best_videos: Vec<(String, String)> = Vec::new();
        for item in response.items {
            let Some(channel_id) = item.snippet.and_then(|s| s.channel_id) else {
                continue;
            };
            let Some(video_id) = item.id.video_id else {
                continue;
            };
            if !best_videos.iter().any(|(c, _)| c == &channel_id) {
                best_videos.push((channel_id, video_id));
            }
        }
        if best_videos.is_empty() {
            return Ok(Vec::new());
        }

        let channel_ids: Vec<String> = best_videos.iter().map(|(c, _)| c.clone()).collect();
        let channels: ChannelListResponse = self
            .get_json(
                "channels",
                &[
                    ("part", "snippet,statistics".to_string()),
                    ("id", channel_ids.join(",")),
                ],
            )
            .await?;

        let video_ids: Vec<String> = best_videos.iter().map(|(_, v)| v.clone()).collect();
        let videos: VideoListResponse = self
            .get_json(
                "videos",
                &[
                    ("part", "statistics".to_string()),
                    ("id", video_ids.join(",")),
                ],
            )
            .await?;
        let views_by_video: HashMap<String, u64> = videos
            .items
            .into_iter()
            .map(|v| {
                let views = parse_count(v.statistics.and_then(|s| s.view_count));
                (v.id, views)
            })
            .collect();

        let mut hits = Vec::new();
        for resource in channels.items {
            let best_video_views = best_videos
                .iter()
                .find(|(c, _)| c == &resource.id)
                .and_then(|(_, v)| views_by_video.get(v).copied())
                .unwrap_or(0);
            let hit = channel_hit_from(resource, best_video_views);
            if hit.subscriber_count >= min_subscribers {
                hits.push(hit);
            }
        }
        hits.sort_by(|a, b| b.subscriber_count.cmp(&a.subscriber_count));
        hits.truncate(max_results as usize);
        Ok(hits)
    }

    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String> {
        let response: ChannelListResponse = self
            .get_json(
                "channels",
                &[
                    ("part", "contentDetails".to_string()),
                    ("id", channel_id.to_string()),
                ],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.content_details)
            .and_then(|cd| cd.related_playlists)
            .and_then(|rp| rp.uploads)
            .filter(|uploads| !uploads.is_empty())
            .ok_or_else(|| {
                BrandLensError::NotFound(format!(
                    "Channel {} has no uploads playlist",
                    channel_id
                ))
            })
    }

    async fn upload_video_ids(&self, playlist_id: &str, max_results: u32) -> Result<Vec<String>> {
        let mut video_ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;

        while (video_ids.len() as u32) < max_results {
            let batch = (max_results - video_ids.len() as u32).min(Self::PAGE_SIZE);
            let mut params = vec![
                ("part", "contentDetails".to_string()),
                ("playlistId", playlist_id.to_string()),
                ("maxResults", batch.to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let response: PlaylistItemsResponse =
                self.get_json("playlistItems", &params).await?;
            if response.items.is_empty() {
                break;
            }
            for item in response.items {
                if let Some(video_id) = item.content_details.and_then(|cd| cd.video_id) {
                    video_ids.push(video_id);
                }
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        video_ids.truncate(max_results as usize);
        Ok(video_ids)
    }
}

/// Reduces a handle or channel URL to a plain search term.
fn search_term(identifier: &str) -> String {
    let mut term = identifier.trim().to_string();
    for sep in ["/channel/", "/c/", "/user/", "/@"] {
        if let Some(pos) = term.find(sep) {
            let tail = term[pos + sep.len()..].to_string();
            term = tail.split(['/', '?']).next().unwrap_or("").to_string();
        }
    }
    term.trim_start_matches('@').to_string()
}

fn parse_count(value: Option<String>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn parse_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(&v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn best_thumbnail(thumbnails: Option<Thumbnails>) -> Option<String> {
    thumbnails
        .and_then(|t| t.high.or(t.medium).or(t.default))
        .map(|t| t.url)
}

fn channel_info_from(resource: ChannelResource) -> ChannelInfo {
    let snippet = resource.snippet.unwrap_or_default();
    let statistics = resource.statistics.unwrap_or_default();
    ChannelInfo {
        channel_id: resource.id,
        title: snippet.title,
        description: snippet.description,
        custom_url: snippet.custom_url,
        published_at: parse_timestamp(snippet.published_at),
        thumbnail_url: best_thumbnail(snippet.thumbnails),
        subscriber_count: parse_count(statistics.subscriber_count),
        view_count: parse_count(statistics.view_count),
        video_count: parse_count(statistics.video_count),
    }
}

fn channel_hit_from(resource: ChannelResource, best_video_views: u64) -> ChannelHit {
    let info = channel_info_from(resource);
    ChannelHit {
        channel_id: info.channel_id,
        title: info.title,
        description: info.description,
        custom_url: info.custom_url,
        published_at: info.published_at,
        thumbnail_url: info.thumbnail_url,
        subscriber_count: info.subscriber_count,
        view_count: info.view_count,
        video_count: info.video_count,
        best_video_views,
    }
}

fn video_details_from(resource: VideoResource) -> VideoDetails {
    let snippet = resource.snippet.unwrap_or_default();
    let statistics = resource.statistics.unwrap_or_default();
    let duration = resource
        .content_details
        .and_then(|cd| cd.duration)
        .unwrap_or_else(|| "PT0S".to_string());
    VideoDetails {
        video_id: resource.id,
        title: snippet.title,
        description: snippet.description,
        published_at: parse_timestamp(snippet.published_at),
        channel_id: snippet.channel_id.unwrap_or_default(),
        channel_title: snippet.channel_title.unwrap_or_default(),
        duration_minutes: iso8601_duration_minutes(&duration),
        view_count: parse_count(statistics.view_count),
        like_count: parse_count(statistics.like_count),
        comment_count: parse_count(statistics.comment_count),
        thumbnail_url: best_thumbnail(snippet.thumbnails),
        tags: snippet.tags,
    }
}

/// Drops uploads that are too old or too short for the statistics series.
fn video_stats_from(
    resource: VideoResource,
    cutoff: DateTime<Utc>,
    min_duration_minutes: f64,
) -> Option<VideoStats> {
    let snippet = resource.snippet.unwrap_or_default();
    let statistics = resource.statistics.unwrap_or_default();
    let published_at = parse_timestamp(snippet.published_at)?;
    let duration = resource
        .content_details
        .and_then(|cd| cd.duration)
        .unwrap_or_else(|| "PT0S".to_string());
    let duration_minutes = iso8601_duration_minutes(&duration);
    if published_at < cutoff || duration_minutes < min_duration_minutes {
        return None;
    }
    Some(VideoStats {
        video_id: resource.id,
        title: snippet.title,
        published_at: Some(published_at),
        duration_minutes,
        view_count: parse_count(statistics.view_count),
        like_count: parse_count(statistics.like_count),
        comment_count: parse_count(statistics.comment_count),
        favorite_count: parse_count(statistics.favorite_count),
    })
}

/// Threads without a comment id or display text are skipped.
fn comment_from(thread: CommentThread) -> Option<Comment> {
    let top = thread.snippet?.top_level_comment?;
    let comment_id = top.id.filter(|id| !id.is_empty())?;
    let snippet = top.snippet?;
    let text = snippet.text_display.filter(|t| !t.is_empty())?;
    Some(Comment {
        comment_id,
        author: snippet
            .author_display_name
            .unwrap_or_else(|| "Unknown".to_string()),
        text,
        like_count: snippet.like_count.unwrap_or(0),
        published_at: parse_timestamp(snippet.published_at),
    })
}

// Wire types. Count fields are JSON strings, per the API.

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchResultId,
    snippet: Option<SearchSnippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    video_id: Option<String>,
    channel_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    channel_id: Option<String>,
}

#[derive(Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelResource>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelResource {
    id: String,
    snippet: Option<ChannelSnippet>,
    statistics: Option<ChannelStatistics>,
    content_details: Option<ChannelContentDetails>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ChannelSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    custom_url: Option<String>,
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
    view_count: Option<String>,
    video_count: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: Option<RelatedPlaylists>,
}

#[derive(Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    id: String,
    snippet: Option<VideoSnippet>,
    statistics: Option<VideoStatistics>,
    content_details: Option<VideoContentDetails>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    published_at: Option<String>,
    channel_id: Option<String>,
    channel_title: Option<String>,
    thumbnails: Option<Thumbnails>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
    favorite_count: Option<String>,
}

#[derive(Deserialize)]
struct VideoContentDetails {
    duration: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadsResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct CommentThread {
    snippet: Option<CommentThreadSnippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: Option<TopLevelComment>,
}

#[derive(Deserialize)]
struct TopLevelComment {
    id: Option<String>,
    snippet: Option<CommentSnippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    author_display_name: Option<String>,
    text_display: Option<String>,
    like_count: Option<u64>,
    published_at: Option<String>,
}

#[derive(Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = YouTubeClient::new("");
        assert!(matches!(result, Err(BrandLensError::Config(_))));
    }

    #[test]
    fn test_extract_channel_id_passthrough() {
        let client = YouTubeClient::new("test-key").unwrap();
        assert_eq!(
            client.extract_channel_id("UCBJycsmduvYEL83R_U4JriQ"),
            Some("UCBJycsmduvYEL83R_U4JriQ".to_string())
        );
    }

    #[test]
    fn test_extract_channel_id_from_url() {
        let client = YouTubeClient::new("test-key").unwrap();
        assert_eq!(
            client.extract_channel_id(
                "https://www.youtube.com/channel/UCBJycsmduvYEL83R_U4JriQ/videos"
            ),
            Some("UCBJycsmduvYEL83R_U4JriQ".to_string())
        );
    }

    #[test]
    fn test_extract_channel_id_rejects_names() {
        let client = YouTubeClient::new("test-key").unwrap();
        assert_eq!(client.extract_channel_id("@mkbhd"), None);
        assert_eq!(client.extract_channel_id("UCshort"), None);
        assert_eq!(
            client.extract_channel_id("https://www.youtube.com/c/mkbhd"),
            None
        );
    }

    #[test]
    fn test_search_term_strips_handles_and_urls() {
        assert_eq!(search_term("@mkbhd"), "mkbhd");
        assert_eq!(search_term("https://www.youtube.com/c/mkbhd"), "mkbhd");
        assert_eq!(search_term("https://www.youtube.com/user/marques"), "marques");
        assert_eq!(
            search_term("https://youtube.com/@veritasium/videos"),
            "veritasium"
        );
        assert_eq!(search_term("plain name"), "plain name");
    }

    #[test]
    fn test_channel_resource_decodes_string_counts() {
        let value = serde_json::json!({
            "id": "UCBJycsmduvYEL83R_U4JriQ",
            "snippet": {
                "title": "Test Channel",
                "description": "A channel",
                "customUrl": "@testchannel",
                "publishedAt": "2014-03-21T18:02:11Z",
                "thumbnails": { "high": { "url": "https://img.example/hq.jpg" } }
            },
            "statistics": {
                "subscriberCount": "1200",
                "viewCount": "34000",
                "videoCount": "56"
            }
        });
        let resource: ChannelResource = serde_json::from_value(value).unwrap();
        let info = channel_info_from(resource);
        assert_eq!(info.subscriber_count, 1200);
        assert_eq!(info.view_count, 34000);
        assert_eq!(info.video_count, 56);
        assert_eq!(info.custom_url.as_deref(), Some("@testchannel"));
        assert_eq!(
            info.thumbnail_url.as_deref(),
            Some("https://img.example/hq.jpg")
        );
        assert!(info.published_at.is_some());
    }

    #[test]
    fn test_video_resource_with_missing_statistics() {
        let value = serde_json::json!({
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "title": "A Video",
                "description": "",
                "publishedAt": "2024-05-01T12:00:00Z",
                "channelId": "UCBJycsmduvYEL83R_U4JriQ",
                "channelTitle": "Test Channel"
            },
            "contentDetails": { "duration": "PT10M30S" }
        });
        let resource: VideoResource = serde_json::from_value(value).unwrap();
        let details = video_details_from(resource);
        assert_eq!(details.duration_minutes, 10.5);
        assert_eq!(details.view_count, 0);
        assert_eq!(details.like_count, 0);
        assert!(details.tags.is_empty());
    }

    #[test]
    fn test_comment_from_skips_empty_text() {
        let value = serde_json::json!({
            "snippet": {
                "topLevelComment": {
                    "id": "UgxA1",
                    "snippet": {
                        "authorDisplayName": "viewer",
                        "textDisplay": "",
                        "likeCount": 3
                    }
                }
            }
        });
        let thread: CommentThread = serde_json::from_value(value).unwrap();
        assert!(comment_from(thread).is_none());
    }

    #[test]
    fn test_comment_from_skips_missing_id() {
        let value = serde_json::json!({
            "snippet": {
                "topLevelComment": {
                    "snippet": {
                        "authorDisplayName": "viewer",
                        "textDisplay": "nice one",
                        "likeCount": 1
                    }
                }
            }
        });
        let thread: CommentThread = serde_json::from_value(value).unwrap();
        assert!(comment_from(thread).is_none());
    }

    #[test]
    fn test_comment_from_defaults_author() {
        let value = serde_json::json!({
            "snippet": {
                "topLevelComment": {
                    "id": "UgxB2",
                    "snippet": {
                        "textDisplay": "great video",
                        "likeCount": 7,
                        "publishedAt": "2024-06-01T08:30:00Z"
                    }
                }
            }
        });
        let thread: CommentThread = serde_json::from_value(value).unwrap();
        let comment = comment_from(thread).unwrap();
        assert_eq!(comment.comment_id, "UgxB2");
        assert_eq!(comment.author, "Unknown");
        assert_eq!(comment.like_count, 7);
        assert!(comment.published_at.is_some());
    }

    #[test]
    fn test_video_stats_filtering() {
        let recent = (Utc::now() - Duration::days(7)).to_rfc3339();
        let stale = (Utc::now() - Duration::days(400)).to_rfc3339();
        let cutoff = Utc::now() - Duration::days(180);

        let keep = serde_json::json!({
            "id": "vid-keep",
            "snippet": { "title": "Long recent video", "publishedAt": recent },
            "statistics": {
                "viewCount": "12000",
                "likeCount": "800",
                "commentCount": "45",
                "favoriteCount": "0"
            },
            "contentDetails": { "duration": "PT12M" }
        });
        let resource: VideoResource = serde_json::from_value(keep).unwrap();
        let stats = video_stats_from(resource, cutoff, 3.0).unwrap();
        assert_eq!(stats.video_id, "vid-keep");
        assert_eq!(stats.view_count, 12000);
        assert_eq!(stats.favorite_count, 0);
        assert_eq!(stats.duration_minutes, 12.0);

        let too_short = serde_json::json!({
            "id": "vid-short",
            "snippet": { "title": "A short", "publishedAt": recent },
            "contentDetails": { "duration": "PT45S" }
        });
        let resource: VideoResource = serde_json::from_value(too_short).unwrap();
        assert!(video_stats_from(resource, cutoff, 3.0).is_none());

        let too_old = serde_json::json!({
            "id": "vid-old",
            "snippet": { "title": "Old upload", "publishedAt": stale },
            "contentDetails": { "duration": "PT12M" }
        });
        let resource: VideoResource = serde_json::from_value(too_old).unwrap();
        assert!(video_stats_from(resource, cutoff, 3.0).is_none());
    }

    #[test]
    fn test_parse_count_defaults_to_zero() {
        assert_eq!(parse_count(Some("123".to_string())), 123);
        assert_eq!(parse_count(Some("not a number".to_string())), 0);
        assert_eq!(parse_count(None), 0);
    }
}
