//! Sentiment command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use crate::youtube::extract_video_id;
use anyhow::Result;

/// Run the sentiment command.
pub async fn run_sentiment(video_id: &str, limit: u32, settings: Settings) -> Result<()> {
    let video_id = extract_video_id(video_id);
    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner("Scoring comments...");
    let summary = toolkit.comment_sentiment(video_id, limit).await;
    spinner.finish_and_clear();

    match summary {
        Ok(summary) => {
            Output::header("Comment sentiment");
            Output::kv("Comments scored", &summary.comments_scored.to_string());
            Output::kv("Mean polarity", &format!("{:+.3}", summary.score));
            Output::kv("Positive", &summary.positive.to_string());
            Output::kv("Negative", &summary.negative.to_string());
            Output::kv("Neutral", &summary.neutral.to_string());
            println!();

            match summary.label.as_str() {
                "positive" => Output::success("Viewers are responding positively."),
                "negative" => Output::warning("Viewers are responding negatively."),
                _ => Output::info("Viewer sentiment is neutral."),
            }
        }
        Err(e) => {
            Output::error(&format!("Sentiment analysis failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
