//! Statistical and content analysis.

mod prediction;
mod scenes;
mod sentiment;

pub use prediction::{FittedLogNormal, IntervalMode, PredictionInterval, ViewIntervalEstimator};
pub use scenes::{ContentAnalyzer, Scene, Sponsor, VideoAnalysis, VideoMetadata};
pub use sentiment::{label, mean_polarity, polarity, summarize, SentimentSummary};
