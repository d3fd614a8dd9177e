//! Videos command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use anyhow::Result;

/// Run the videos command.
pub async fn run_videos(
    channel_id: &str,
    query: Option<String>,
    limit: u32,
    settings: Settings,
) -> Result<()> {
    let toolkit = Toolkit::new(settings)?;
    let youtube = toolkit.youtube()?;

    let spinner = Output::spinner("Fetching uploads...");
    let videos = match &query {
        Some(q) => youtube.search_channel_videos(channel_id, q, limit).await,
        None => youtube.list_videos(channel_id, limit).await,
    };
    spinner.finish_and_clear();

    match videos {
        Ok(videos) => {
            if videos.is_empty() {
                match &query {
                    Some(q) => Output::warning(&format!("No uploads matched '{}'.", q)),
                    None => Output::warning("No uploads found for this channel."),
                }
            } else {
                Output::success(&format!("Found {} videos", videos.len()));
                for video in &videos {
                    Output::video_row(
                        &video.title,
                        &video.video_id,
                        video.view_count,
                        video.duration_minutes,
                    );
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Listing uploads failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
