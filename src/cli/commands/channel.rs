//! Channel command implementation.

use crate::cli::output::{content_preview, format_count};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use anyhow::Result;

/// Run the channel command.
pub async fn run_channel(identifier: &str, videos: u32, settings: Settings) -> Result<()> {
    let toolkit = Toolkit::new(settings)?;
    let youtube = toolkit.youtube()?;

    let spinner = Output::spinner("Fetching channel...");
    let report = youtube.introspect_channel(identifier, videos).await;
    spinner.finish_and_clear();

    match report {
        Ok(report) => {
            let channel = &report.channel;

            Output::header(&channel.title);
            Output::kv("ID", &channel.channel_id);
            if let Some(url) = &channel.custom_url {
                Output::kv("URL", &format!("https://www.youtube.com/{}", url));
            }
            Output::kv("Subscribers", &format_count(channel.subscriber_count));
            Output::kv("Videos", &channel.video_count.to_string());
            Output::kv("Total views", &format_count(channel.view_count));
            if let Some(published) = channel.published_at {
                Output::kv("Created", &published.format("%Y-%m-%d").to_string());
            }
            if !channel.description.is_empty() {
                Output::kv("About", &content_preview(&channel.description, 200));
            }

            if !report.videos.is_empty() {
                Output::header(&format!("Recent uploads ({})", report.videos.len()));
                for video in &report.videos {
                    Output::video_row(
                        &video.title,
                        &video.video_id,
                        video.view_count,
                        video.duration_minutes,
                    );
                }
            }
            println!();
        }
        Err(e) => {
            Output::error(&format!("Channel lookup failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
