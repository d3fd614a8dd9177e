//! Comments command implementation.

use crate::analysis::{label, mean_polarity};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use crate::youtube::extract_video_id;
use anyhow::Result;

/// Run the comments command.
pub async fn run_comments(
    video_id: &str,
    limit: u32,
    sentiment: bool,
    settings: Settings,
) -> Result<()> {
    let video_id = extract_video_id(video_id);
    let toolkit = Toolkit::new(settings)?;
    let youtube = toolkit.youtube()?;

    let spinner = Output::spinner("Fetching comments...");
    let comments = youtube.fetch_comments(video_id, limit).await;
    spinner.finish_and_clear();

    match comments {
        Ok(comments) => {
            if comments.is_empty() {
                Output::warning("No comments found on this video.");
            } else {
                Output::success(&format!("Newest {} comments", comments.len()));
                for comment in &comments {
                    Output::comment(&comment.author, comment.like_count, &comment.text);
                }
                println!();

                if sentiment {
                    let texts: Vec<String> =
                        comments.iter().map(|c| c.text.clone()).collect();
                    let score = mean_polarity(&texts)?;
                    Output::kv(
                        "Average polarity",
                        &format!("{:+.3} ({})", score, label(score)),
                    );
                    println!();
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Fetching comments failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
