//! Search command implementation.

use crate::cli::output::{content_preview, format_count};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use anyhow::Result;
use console::style;

/// Run the search command.
pub async fn run_search(
    query: &str,
    limit: u32,
    min_subscribers: u64,
    settings: Settings,
) -> Result<()> {
    let toolkit = Toolkit::new(settings)?;
    let youtube = toolkit.youtube()?;

    let spinner = Output::spinner("Searching channels...");
    let channels = youtube
        .search_channels(query, limit, min_subscribers)
        .await;
    spinner.finish_and_clear();

    match channels {
        Ok(channels) => {
            if channels.is_empty() {
                Output::warning("No channels matched your query.");
            } else {
                Output::success(&format!("Found {} channels", channels.len()));

                for channel in &channels {
                    println!(
                        "\n{} {} ({})",
                        style(">>").green(),
                        style(&channel.title).bold(),
                        style(&channel.channel_id).dim()
                    );
                    println!(
                        "   {} subscribers, {} videos, best recent video: {} views",
                        format_count(channel.subscriber_count),
                        channel.video_count,
                        format_count(channel.best_video_views)
                    );
                    if !channel.description.is_empty() {
                        println!("   {}", content_preview(&channel.description, 160));
                    }
                }
                println!();
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
