//! Analyze command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use crate::youtube::extract_video_id;
use anyhow::Result;
use console::style;

/// Run the analyze command.
pub async fn run_analyze(
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

    Output::info(&format!("Analyzing {}", video_id));

    let analysis = match toolkit.analyze_video(video_id).await {
        Ok(analysis) => analysis,
        Err(e) => {
            Output::error(&format!("Analysis failed: {}", e));
            return Err(e.into());
        }
    };

    Output::header(&analysis.metadata.title);

    if analysis.scenes.is_empty() {
        Output::warning("The transcript was empty, so no scenes were produced.");
    } else {
        for scene in &analysis.scenes {
            println!(
                "\n  {} {}",
                style(format!(
                    "[{} - {}]",
                    format_timestamp(scene.start_seconds),
                    format_timestamp(scene.end_seconds)
                ))
                .cyan(),
                scene.summary
            );
            if !scene.sponsor.is_empty() {
                println!("    {} {}", style("sponsor:").dim(), scene.sponsor);
            }
        }
    }

    println!();
    if analysis.sponsors.is_empty() {
        Output::info("No sponsors detected in the description.");
    } else {
        Output::header(&format!(
            "Sponsors in description ({})",
            analysis.sponsors.len()
        ));
        for sponsor in &analysis.sponsors {
            Output::list_item(&sponsor.name);
        }
        println!();
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&analysis)?;
        if path == "-" {
            println!("{}", json);
        } else {
            std::fs::write(&path, &json)?;
            Output::success(&format!("Analysis saved to {}", path));
        }
    }

    Ok(())
}

/// Format seconds as a mm:ss or hh:mm:ss timestamp.
fn format_timestamp(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(65), "01:05");
        assert_eq!(format_timestamp(3665), "01:01:05");
        assert_eq!(format_timestamp(0), "00:00");
    }
}
