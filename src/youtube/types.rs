//! Domain types returned by the YouTube Data API client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel profile with lifetime statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub custom_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
}

/// A channel surfaced by discovery search, ranked by subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelHit {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub custom_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
    /// Views on the channel's best-performing video from the last month.
    pub best_video_views: u64,
}

/// Full metadata and statistics for a single video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub channel_id: String,
    pub channel_title: String,
    pub duration_minutes: f64,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
}

/// Engagement numbers for one upload, used to build view series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStats {
    pub video_id: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub duration_minutes: f64,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub favorite_count: u64,
}

/// A top-level viewer comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: String,
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: Option<DateTime<Utc>>,
}

/// Channel profile bundled with its most recent uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReport {
    pub channel: ChannelInfo,
    pub videos: Vec<VideoDetails>,
}

/// Reduces a video URL to its bare ID. Plain IDs pass through.
pub fn extract_video_id(input: &str) -> &str {
    let input = input.trim();
    for marker in ["watch?v=", "youtu.be/", "/shorts/", "/embed/"] {
        if let Some(pos) = input.find(marker) {
            let tail = &input[pos + marker.len()..];
            return tail.split(['&', '?', '/']).next().unwrap_or(tail);
        }
    }
    input
}

/// Converts an ISO 8601 duration ("PT1H2M30S") to fractional minutes,
/// rounded to two decimals. Unknown designators contribute nothing, so
/// malformed input degrades to zero rather than failing.
pub fn iso8601_duration_minutes(duration: &str) -> f64 {
    let mut seconds: u64 = 0;
    let mut digits = String::new();
    let mut in_time = false;

    for c in duration.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'P' => digits.clear(),
            'T' => {
                in_time = true;
                digits.clear();
            }
            'D' if !in_time => {
                if let Ok(n) = digits.parse::<u64>() {
                    seconds += n * 86_400;
                }
                digits.clear();
            }
            'H' if in_time => {
                if let Ok(n) = digits.parse::<u64>() {
                    seconds += n * 3_600;
                }
                digits.clear();
            }
            'M' if in_time => {
                if let Ok(n) = digits.parse::<u64>() {
                    seconds += n * 60;
                }
                digits.clear();
            }
            'S' if in_time => {
                if let Ok(n) = digits.parse::<u64>() {
                    seconds += n;
                }
                digits.clear();
            }
            _ => digits.clear(),
        }
    }

    let minutes = seconds as f64 / 60.0;
    (minutes * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_from_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_extract_video_id_passes_bare_ids_through() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(extract_video_id("  dQw4w9WgXcQ "), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_duration_with_all_components() {
        assert_eq!(iso8601_duration_minutes("PT1H2M30S"), 62.5);
    }

    #[test]
    fn test_duration_minutes_only() {
        assert_eq!(iso8601_duration_minutes("PT15M"), 15.0);
    }

    #[test]
    fn test_duration_seconds_round_to_two_decimals() {
        assert_eq!(iso8601_duration_minutes("PT45S"), 0.75);
        assert_eq!(iso8601_duration_minutes("PT1M7S"), 1.12);
    }

    #[test]
    fn test_duration_with_days() {
        assert_eq!(iso8601_duration_minutes("P1DT1H"), 1500.0);
    }

    #[test]
    fn test_zero_and_malformed_durations() {
        assert_eq!(iso8601_duration_minutes("PT0S"), 0.0);
        assert_eq!(iso8601_duration_minutes("P0D"), 0.0);
        assert_eq!(iso8601_duration_minutes(""), 0.0);
        assert_eq!(iso8601_duration_minutes("not a duration"), 0.0);
    }
}
