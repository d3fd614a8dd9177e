//! Video command implementation.

use crate::cli::output::{content_preview, format_count, format_duration};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use crate::youtube::extract_video_id;
use anyhow::Result;

/// Run the video command.
pub async fn run_video(video_id: &str, settings: Settings) -> Result<()> {
    let video_id = extract_video_id(video_id);
    let toolkit = Toolkit::new(settings)?;
    let youtube = toolkit.youtube()?;

    let spinner = Output::spinner("Fetching video...");
    let details = youtube.video_details(video_id).await;
    spinner.finish_and_clear();

    match details {
        Ok(details) => {
            Output::header(&details.title);
            Output::kv("ID", &details.video_id);
            Output::kv(
                "Channel",
                &format!("{} ({})", details.channel_title, details.channel_id),
            );
            if let Some(published) = details.published_at {
                Output::kv("Published", &published.format("%Y-%m-%d").to_string());
            }
            Output::kv(
                "Duration",
                &format_duration(details.duration_minutes * 60.0),
            );
            Output::kv("Views", &format_count(details.view_count));
            Output::kv("Likes", &format_count(details.like_count));
            Output::kv("Comments", &format_count(details.comment_count));
            if let Some(thumbnail) = &details.thumbnail_url {
                Output::kv("Thumbnail", thumbnail);
            }
            if !details.tags.is_empty() {
                Output::kv("Tags", &details.tags.join(", "));
            }
            if !details.description.is_empty() {
                Output::kv("Description", &content_preview(&details.description, 300));
            }
            println!();
        }
        Err(e) => {
            Output::error(&format!("Video lookup failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
