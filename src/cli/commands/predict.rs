//! Predict command implementation.

use crate::analysis::{FittedLogNormal, IntervalMode, PredictionInterval, ViewIntervalEstimator};
use crate::cli::output::format_count;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::BrandLensError;
use crate::toolkit::Toolkit;
use anyhow::Result;

/// Run the predict command.
pub async fn run_predict(
    channel: Option<&str>,
    views: Option<&[f64]>,
    confidence: f64,
    mode: &str,
    settings: Settings,
) -> Result<()> {
    let mode: IntervalMode = mode.parse()?;

    match (views, channel) {
        (Some(views), None) => predict_from_views(views, confidence, mode),
        (None, Some(channel_id)) => {
            predict_from_channel(channel_id, confidence, mode, settings).await
        }
        _ => Err(BrandLensError::InvalidInput(
            "provide either --views or --channel, not both".to_string(),
        )
        .into()),
    }
}

/// Fit the estimator directly on a view series given on the command line.
fn predict_from_views(views: &[f64], confidence: f64, mode: IntervalMode) -> Result<()> {
    let estimator = ViewIntervalEstimator::with_config(confidence, mode);
    let interval = match estimator.estimate(views) {
        Ok(interval) => interval,
        Err(e) => {
            Output::error(&format!("Prediction failed: {}", e));
            return Err(e.into());
        }
    };
    let fit = FittedLogNormal::fit(views)?;

    Output::header("View prediction");
    Output::kv("Samples", &views.len().to_string());
    Output::kv("Fitted median", &format_count(fit.scale() as u64));
    print_interval(&interval);
    println!();

    Ok(())
}

/// Fetch a channel's recent view counts, then fit and predict.
async fn predict_from_channel(
    channel_id: &str,
    confidence: f64,
    mode: IntervalMode,
    settings: Settings,
) -> Result<()> {
    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner("Fetching view history...");
    let prediction = toolkit.predict_views(channel_id, confidence, mode).await;
    spinner.finish_and_clear();

    match prediction {
        Ok(prediction) => {
            Output::header("View prediction");
            Output::kv("Channel", channel_id);
            Output::kv("Samples", &prediction.views.len().to_string());
            Output::kv("Fitted median", &format_count(prediction.fitted_median as u64));
            print_interval(&prediction.interval);

            Output::header(&format!("Based on {} uploads", prediction.stats.len()));
            for video in &prediction.stats {
                Output::video_row(
                    &video.title,
                    &video.video_id,
                    video.view_count,
                    video.duration_minutes,
                );
            }
            println!();
        }
        Err(e) => {
            Output::error(&format!("Prediction failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn print_interval(interval: &PredictionInterval) {
    Output::kv(
        "Confidence",
        &format!("{:.0}%", interval.confidence_level * 100.0),
    );
    Output::kv("Mode", interval.mode.as_str());
    println!();

    match interval.mode {
        IntervalMode::Lower => Output::success(&format!(
            "The next upload should exceed {} views.",
            format_bound(interval.lower)
        )),
        IntervalMode::Upper => Output::success(&format!(
            "The next upload should stay under {} views.",
            format_bound(interval.upper)
        )),
        IntervalMode::TwoSided => Output::success(&format!(
            "The next upload should land between {} and {} views.",
            format_bound(interval.lower),
            format_bound(interval.upper)
        )),
    }
}

fn format_bound(value: f64) -> String {
    if value.is_infinite() {
        "unbounded".to_string()
    } else {
        format_count(value.round() as u64)
    }
}
