//! Transcribe command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use crate::youtube::extract_video_id;
use anyhow::Result;

/// Run the transcribe command.
pub async fn run_transcribe(
    video_id: &str,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcribe) {
        Output::error(&format!("{}", e));
        Output::info("Run 'brandlens doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let video_id = extract_video_id(video_id);
    let toolkit = Toolkit::new(settings)?;

    Output::info(&format!("Transcribing {}", video_id));

    let transcribed = match toolkit.transcribe_video(video_id).await {
        Ok(transcribed) => transcribed,
        Err(e) => {
            Output::error(&format!("Transcription failed: {}", e));
            return Err(e.into());
        }
    };

    let words = transcribed.transcript.split_whitespace().count();

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &transcribed.transcript)?;
            Output::success(&format!(
                "Transcript of '{}' saved to {} ({} words)",
                transcribed.probe.title, path, words
            ));
        }
        _ => {
            Output::header(&transcribed.probe.title);
            println!("\n{}\n", transcribed.transcript);
        }
    }

    Ok(())
}
