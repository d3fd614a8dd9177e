//! Thumbnail command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::BrandLensError;
use crate::toolkit::Toolkit;
use crate::youtube::extract_video_id;
use anyhow::Result;

/// Run the thumbnail command.
pub async fn run_thumbnail(target: &str, settings: Settings) -> Result<()> {
    let toolkit = Toolkit::new(settings)?;

    // A bare ID or watch URL means "score that video's thumbnail";
    // anything else http-ish is treated as a direct image URL.
    let looks_like_video = !target.starts_with("http")
        || target.contains("watch?v=")
        || target.contains("youtu.be/")
        || target.contains("/shorts/");

    let url = if looks_like_video {
        let video_id = extract_video_id(target);
        let details = toolkit.youtube()?.video_details(video_id).await?;
        details.thumbnail_url.ok_or_else(|| {
            BrandLensError::NotFound(format!("Video {} has no thumbnail", video_id))
        })?
    } else {
        target.to_string()
    };

    let spinner = Output::spinner("Scoring thumbnail...");
    let score = toolkit.thumbnails().score_url(&url).await;
    spinner.finish_and_clear();

    match score {
        Ok(score) => {
            Output::header("Thumbnail appeal");
            Output::kv("Image", &url);
            Output::kv("Appeal", &format!("{:.3}", score.appeal));
            Output::kv("Positive match", &format!("{:.4}", score.positive_mean));
            Output::kv("Negative match", &format!("{:.4}", score.negative_mean));
            println!();
            Output::success(&format!(
                "This thumbnail scores {:.0}% on visual appeal.",
                score.appeal * 100.0
            ));
        }
        Err(e) => {
            Output::error(&format!("Scoring failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
