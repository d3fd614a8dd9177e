//! BrandLens CLI entry point.

use anyhow::Result;
use brandlens::cli::{commands, Cli, Commands};
use brandlens::config::Settings;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("brandlens={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Init { force } => {
            commands::run_init(*force, &settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Channel { identifier, videos } => {
            commands::run_channel(identifier, *videos, settings).await?;
        }

        Commands::Search {
            query,
            limit,
            min_subscribers,
        } => {
            commands::run_search(query, *limit, *min_subscribers, settings).await?;
        }

        Commands::Videos {
            channel_id,
            query,
            limit,
        } => {
            commands::run_videos(channel_id, query.clone(), *limit, settings).await?;
        }

        Commands::Video { video_id } => {
            commands::run_video(video_id, settings).await?;
        }

        Commands::Stats {
            channel_id,
            limit,
            months,
            min_duration,
        } => {
            commands::run_stats(channel_id, *limit, *months, *min_duration, settings).await?;
        }

        Commands::Comments {
            video_id,
            limit,
            sentiment,
        } => {
            commands::run_comments(video_id, *limit, *sentiment, settings).await?;
        }

        Commands::Predict {
            channel,
            views,
            confidence,
            mode,
        } => {
            commands::run_predict(
                channel.as_deref(),
                views.as_deref(),
                *confidence,
                mode,
                settings,
            )
            .await?;
        }

        Commands::Download { video_id, quality } => {
            commands::run_download(video_id, quality, settings).await?;
        }

        Commands::Transcribe { video_id, output } => {
            commands::run_transcribe(video_id, output.clone(), settings).await?;
        }

        Commands::Analyze { video_id, output } => {
            commands::run_analyze(video_id, output.clone(), settings).await?;
        }

        Commands::Thumbnail { target } => {
            commands::run_thumbnail(target, settings).await?;
        }

        Commands::Sentiment { video_id, limit } => {
            commands::run_sentiment(video_id, *limit, settings).await?;
        }

        Commands::Talents { url, pages, output } => {
            commands::run_talents(url, *pages, output.clone(), settings).await?;
        }

        Commands::Agent {
            task,
            context,
            model,
        } => {
            commands::run_agent(task, context.clone(), model.clone(), settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
