//! Stats command implementation.

use crate::cli::output::format_count;
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use anyhow::Result;
use console::style;

/// Run the stats command.
pub async fn run_stats(
    channel_id: &str,
    limit: u32,
    months: u32,
    min_duration: f64,
    settings: Settings,
) -> Result<()> {
    let toolkit = Toolkit::new(settings)?;
    let youtube = toolkit.youtube()?;

    let spinner = Output::spinner("Fetching statistics...");
    let stats = youtube
        .video_statistics(channel_id, limit, months, min_duration)
        .await;
    spinner.finish_and_clear();

    match stats {
        Ok(stats) => {
            if stats.is_empty() {
                Output::warning(&format!(
                    "No uploads in the last {} months of at least {} minutes.",
                    months, min_duration
                ));
                return Ok(());
            }

            Output::success(&format!(
                "Statistics for {} recent uploads",
                stats.len()
            ));

            for video in &stats {
                let published = video
                    .published_at
                    .map(|p| p.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!(
                    "\n  {} ({})",
                    style(&video.title).bold(),
                    style(&video.video_id).dim()
                );
                println!(
                    "    {} views, {} likes, {} comments, {:.1} min, published {}",
                    format_count(video.view_count),
                    format_count(video.like_count),
                    format_count(video.comment_count),
                    video.duration_minutes,
                    published
                );
            }

            let views: Vec<u64> = stats.iter().map(|s| s.view_count).collect();
            let total: u64 = views.iter().sum();
            let mean = total as f64 / views.len() as f64;
            println!();
            Output::kv("Mean views", &format_count(mean as u64));
            Output::kv(
                "Range",
                &format!(
                    "{} to {}",
                    format_count(*views.iter().min().unwrap_or(&0)),
                    format_count(*views.iter().max().unwrap_or(&0))
                ),
            );
            println!();
        }
        Err(e) => {
            Output::error(&format!("Fetching statistics failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
