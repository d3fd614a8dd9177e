//! Download command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use crate::youtube::extract_video_id;
use anyhow::Result;

/// Run the download command.
pub async fn run_download(video_id: &str, quality: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Download) {
        Output::error(&format!("{}", e));
        Output::info("Run 'brandlens doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let video_id = extract_video_id(video_id);
    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner(&format!("Downloading {} ({})...", video_id, quality));
    let result = toolkit.downloader().download_video(video_id, quality).await;
    spinner.finish_and_clear();

    match result {
        Ok(path) => {
            Output::success(&format!("Downloaded to {}", path.display()));
        }
        Err(e) => {
            Output::error(&format!("Download failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
