//! Component toolkit for BrandLens.
//!
//! Builds every service client from settings once and hands out shared
//! handles, plus the multi-step pipelines (transcribe, analyze, predict)
//! that commands and agent tools share.

use std::sync::Arc;
use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::analysis::{
    summarize, ContentAnalyzer, FittedLogNormal, IntervalMode, PredictionInterval,
    SentimentSummary, VideoAnalysis, ViewIntervalEstimator,
};
use crate::config::{Prompts, Settings};
use crate::crawl::{FirecrawlClient, TalentExtractor, TalentRoster};
use crate::error::{BrandLensError, Result};
use crate::media::{MediaDownloader, VideoProbe};
use crate::transcription::{Transcriber, WhisperTranscriber};
use crate::vision::{ClipScorer, ThumbnailScorer};
use crate::youtube::{VideoStats, YouTubeClient};

/// The assembled BrandLens components.
pub struct Toolkit {
    settings: Settings,
    prompts: Prompts,
    openai: Client<OpenAIConfig>,
    youtube: Option<Arc<YouTubeClient>>,
    crawler: Option<Arc<FirecrawlClient>>,
    downloader: Arc<MediaDownloader>,
    transcriber: Arc<dyn Transcriber>,
    analyzer: Arc<ContentAnalyzer>,
    thumbnails: Arc<ThumbnailScorer>,
    talent_extractor: Arc<TalentExtractor>,
}

impl Toolkit {
    /// Build all components from settings.
    ///
    /// Key-gated clients (YouTube, Firecrawl) are only constructed when
    /// a key resolves; their accessors report the missing key otherwise,
    /// so commands that never touch them still work.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let openai = crate::openai::create_client();

        let youtube = match settings.youtube_api_key() {
            Some(key) => Some(Arc::new(YouTubeClient::new(key)?)),
            None => None,
        };

        let crawler = match settings.firecrawl_api_key() {
            Some(key) => {
                let client = FirecrawlClient::with_base_url(key, &settings.crawler.base_url)?
                    .with_polling(
                        Duration::from_secs(settings.crawler.poll_interval_seconds),
                        Duration::from_secs(settings.crawler.timeout_seconds),
                    );
                Some(Arc::new(client))
            }
            None => None,
        };

        let downloads_dir = settings.downloads_dir();
        std::fs::create_dir_all(&downloads_dir)?;
        let downloader = Arc::new(MediaDownloader::new(&downloads_dir));

        let transcriber: Arc<dyn Transcriber> = Arc::new(WhisperTranscriber::with_config(
            openai.clone(),
            settings.openai.transcription_model.clone(),
            settings.openai.chunk_duration_seconds,
            settings.openai.max_concurrent_chunks,
        ));

        let analyzer = Arc::new(ContentAnalyzer::new(
            openai.clone(),
            settings.openai.chat_model.clone(),
            prompts.clone(),
        ));

        let thumbnails = Arc::new(ThumbnailScorer::with_config(
            Arc::new(ClipScorer::new(settings.thumbnail.endpoint.clone())?),
            settings.thumbnail.temperature,
            settings.thumbnail.contrast_scale,
        )?);

        let talent_extractor = Arc::new(TalentExtractor::new(
            openai.clone(),
            settings.openai.chat_model.clone(),
            prompts.clone(),
        ));

        Ok(Self {
            settings,
            prompts,
            openai,
            youtube,
            crawler,
            downloader,
            transcriber,
            analyzer,
            thumbnails,
            talent_extractor,
        })
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the loaded prompt templates.
    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    /// Get the OpenAI client.
    pub fn openai(&self) -> Client<OpenAIConfig> {
        self.openai.clone()
    }

    /// Get the YouTube client, or report the missing key.
    pub fn youtube(&self) -> Result<Arc<YouTubeClient>> {
        self.youtube.clone().ok_or_else(|| {
            BrandLensError::Config(
                "YouTube API key not configured. Set youtube.api_key in the config file \
                 or the YOUTUBE_API_KEY environment variable."
                    .to_string(),
            )
        })
    }

    /// Get the crawl client, or report the missing key.
    pub fn crawler(&self) -> Result<Arc<FirecrawlClient>> {
        self.crawler.clone().ok_or_else(|| {
            BrandLensError::Config(
                "Firecrawl API key not configured. Set crawler.api_key in the config file \
                 or the FIRECRAWL_API_KEY environment variable."
                    .to_string(),
            )
        })
    }

    /// Get the downloader rooted at the configured downloads directory.
    pub fn downloader(&self) -> Arc<MediaDownloader> {
        self.downloader.clone()
    }

    /// Get the transcriber.
    pub fn transcriber(&self) -> Arc<dyn Transcriber> {
        self.transcriber.clone()
    }

    /// Get the content analyzer.
    pub fn analyzer(&self) -> Arc<ContentAnalyzer> {
        self.analyzer.clone()
    }

    /// Get the thumbnail scorer.
    pub fn thumbnails(&self) -> Arc<ThumbnailScorer> {
        self.thumbnails.clone()
    }

    /// Download a video's audio track and transcribe it.
    ///
    /// The audio lands in a temporary directory and is cleaned up with it;
    /// use the downloader directly to keep media.
    #[instrument(skip(self))]
    pub async fn transcribe_video(&self, video_id: &str) -> Result<TranscribedVideo> {
        let temp_dir = tempfile::tempdir()?;
        let downloader = MediaDownloader::new(temp_dir.path());

        info!("Fetching metadata for {}", video_id);
        eprintln!("  Fetching metadata...");
        let probe = downloader.probe_metadata(video_id).await?;
        eprintln!("  Title: {}", probe.title);

        eprintln!("  Downloading audio...");
        let audio_path = downloader.download_audio(video_id).await?;

        eprintln!("  Transcribing...");
        let transcript = self.transcriber.transcribe(&audio_path).await?;
        eprintln!("  Transcription complete ({} words)", transcript.split_whitespace().count());

        Ok(TranscribedVideo { probe, transcript })
    }

    /// Transcribe a video and analyze it for scenes and sponsors.
    #[instrument(skip(self))]
    pub async fn analyze_video(&self, video_id: &str) -> Result<VideoAnalysis> {
        let transcribed = self.transcribe_video(video_id).await?;

        eprintln!("  Analyzing content...");
        self.analyzer
            .analyze(
                &transcribed.transcript,
                &transcribed.probe.title,
                transcribed.probe.description.as_deref().unwrap_or(""),
            )
            .await
    }

    /// Build a channel's recent view series and estimate a prediction
    /// interval for its next upload.
    #[instrument(skip(self))]
    pub async fn predict_views(
        &self,
        channel_id: &str,
        confidence_level: f64,
        mode: IntervalMode,
    ) -> Result<ViewPrediction> {
        let prediction = &self.settings.prediction;
        let stats = self
            .youtube()?
            .video_statistics(
                channel_id,
                prediction.max_videos,
                prediction.months,
                prediction.min_duration_minutes,
            )
            .await?;

        if stats.is_empty() {
            return Err(BrandLensError::NotFound(format!(
                "No uploads in the last {} months of at least {} minutes for channel {}",
                prediction.months, prediction.min_duration_minutes, channel_id
            )));
        }

        let views: Vec<f64> = stats.iter().map(|s| s.view_count as f64).collect();
        let estimator = ViewIntervalEstimator::with_config(confidence_level, mode);
        let interval = estimator.estimate(&views)?;
        let fitted_median = FittedLogNormal::fit(&views)?.scale();

        Ok(ViewPrediction {
            interval,
            views,
            fitted_median,
            stats,
        })
    }

    /// Fetch a video's newest comments and score their sentiment.
    #[instrument(skip(self))]
    pub async fn comment_sentiment(
        &self,
        video_id: &str,
        max_comments: u32,
    ) -> Result<SentimentSummary> {
        let comments = self
            .youtube()?
            .fetch_comments(video_id, max_comments)
            .await?;
        let texts: Vec<String> = comments.into_iter().map(|c| c.text).collect();
        summarize(&texts)
    }

    /// Crawl a talent agency site and extract its roster.
    #[instrument(skip(self))]
    pub async fn crawl_talent_agency(
        &self,
        agency_url: &str,
        page_limit: u32,
    ) -> Result<TalentRoster> {
        let pages = self.crawler()?.crawl(agency_url, page_limit).await?;
        if pages.is_empty() {
            warn!("Crawl of {} returned no pages", agency_url);
        }
        self.talent_extractor.extract(&pages).await
    }
}

/// A video's metadata together with its transcript.
#[derive(Debug, Serialize)]
pub struct TranscribedVideo {
    pub probe: VideoProbe,
    pub transcript: String,
}

/// A view series and the interval estimated from it.
#[derive(Debug, Serialize)]
pub struct ViewPrediction {
    pub interval: PredictionInterval,
    /// View counts the fit was produced from, newest upload first.
    pub views: Vec<f64>,
    /// Median of the fitted distribution.
    pub fitted_median: f64,
    pub stats: Vec<VideoStats>,
}
