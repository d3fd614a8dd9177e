//! YouTube Data API integration.

mod client;
mod types;

pub use client::YouTubeClient;
pub use types::{
    extract_video_id, iso8601_duration_minutes, ChannelHit, ChannelInfo, ChannelReport, Comment,
    VideoDetails, VideoStats,
};
