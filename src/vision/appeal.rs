//! Thumbnail appeal scoring.
//!
//! An image is compared against two fixed prompt sets. The gap between
//! the mean positive and mean negative similarity, sharpened by a
//! temperature and squashed through a sigmoid, gives an appeal score
//! in (0, 1) where 0.5 is neutral.

use std::sync::Arc;

use serde::Serialize;

use super::ImageTextScorer;
use crate::error::{BrandLensError, Result};

/// Traits of thumbnails that pull clicks.
pub const POSITIVE_PROMPTS: &[&str] = &[
    "eye-catching thumbnail",
    "bold, vibrant colors",
    "clear, readable text",
    "prominent faces",
    "professional design",
];

/// Traits of thumbnails that repel them.
pub const NEGATIVE_PROMPTS: &[&str] = &[
    "blurry or out of focus",
    "dark or underexposed",
    "dull colors",
    "small or unreadable text",
    "cluttered layout",
];

const SIMILARITY_TEMPERATURE: f64 = 0.07;
const CONTRAST_SCALE: f64 = 5.0;
const DOWNLOAD_TIMEOUT_SECS: u64 = 5;

/// Appeal verdict for one thumbnail.
#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailScore {
    /// In (0, 1); 0.5 means the positive and negative prompt sets
    /// matched equally well.
    pub appeal: f64,
    pub positive_mean: f64,
    pub negative_mean: f64,
}

/// Scores thumbnails with an image-text model.
pub struct ThumbnailScorer {
    scorer: Arc<dyn ImageTextScorer>,
    client: reqwest::Client,
    temperature: f64,
    scale: f64,
}

impl ThumbnailScorer {
    pub fn new(scorer: Arc<dyn ImageTextScorer>) -> Result<Self> {
        Self::with_config(scorer, SIMILARITY_TEMPERATURE, CONTRAST_SCALE)
    }

    pub fn with_config(
        scorer: Arc<dyn ImageTextScorer>,
        temperature: f64,
        scale: f64,
    ) -> Result<Self> {
        if temperature <= 0.0 {
            return Err(BrandLensError::Config(
                "thumbnail similarity temperature must be positive".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            scorer,
            client,
            temperature,
            scale,
        })
    }

    /// Download the image at `url` and score it.
    pub async fn score_url(&self, url: &str) -> Result<ThumbnailScore> {
        let response = self.client.get(url).send().await.map_err(|e| {
            BrandLensError::Thumbnail(format!("Failed to download {}: {}", url, e))
        })?;
        if !response.status().is_success() {
            return Err(BrandLensError::Thumbnail(format!(
                "Image download returned {} for {}",
                response.status(),
                url
            )));
        }
        let bytes = response.bytes().await.map_err(|e| {
            BrandLensError::Thumbnail(format!("Failed to read image body: {}", e))
        })?;
        self.score_bytes(&bytes).await
    }

    /// Score raw image bytes against the appeal prompt sets.
    pub async fn score_bytes(&self, image: &[u8]) -> Result<ThumbnailScore> {
        if image.is_empty() {
            return Err(BrandLensError::InvalidInput(
                "thumbnail image is empty".to_string(),
            ));
        }

        let prompts: Vec<String> = POSITIVE_PROMPTS
            .iter()
            .chain(NEGATIVE_PROMPTS.iter())
            .map(|p| p.to_string())
            .collect();
        let similarities = self.scorer.similarities(image, &prompts).await?;
        if similarities.len() != prompts.len() {
            return Err(BrandLensError::Thumbnail(format!(
                "Expected {} similarity scores, got {}",
                prompts.len(),
                similarities.len()
            )));
        }

        Ok(self.appeal_from(&similarities))
    }

    fn appeal_from(&self, similarities: &[f64]) -> ThumbnailScore {
        let split = POSITIVE_PROMPTS.len();
        let positive_mean = mean(&similarities[..split]);
        let negative_mean = mean(&similarities[split..]);
        let contrast = (positive_mean - negative_mean) / self.temperature;
        ThumbnailScore {
            appeal: sigmoid(contrast * self.scale),
            positive_mean,
            negative_mean,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubScorer {
        scores: Vec<f64>,
    }

    #[async_trait]
    impl ImageTextScorer for StubScorer {
        async fn similarities(&self, _image: &[u8], _prompts: &[String]) -> Result<Vec<f64>> {
            Ok(self.scores.clone())
        }
    }

    fn scorer_with(scores: Vec<f64>) -> ThumbnailScorer {
        ThumbnailScorer::new(Arc::new(StubScorer { scores })).unwrap()
    }

    #[test]
    fn test_prompt_sets_are_balanced() {
        assert_eq!(POSITIVE_PROMPTS.len(), NEGATIVE_PROMPTS.len());
    }

    #[test]
    fn test_non_positive_temperature_rejected() {
        let stub = Arc::new(StubScorer { scores: vec![] });
        assert!(ThumbnailScorer::with_config(stub, 0.0, 5.0).is_err());
    }

    #[tokio::test]
    async fn test_balanced_similarities_are_neutral() {
        let scorer = scorer_with(vec![0.2; 10]);
        let score = scorer.score_bytes(b"fake image").await.unwrap();
        assert!((score.appeal - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_positive_leaning_image_scores_high() {
        let mut scores = vec![0.30; 5];
        scores.extend(vec![0.10; 5]);
        let scorer = scorer_with(scores);
        let score = scorer.score_bytes(b"fake image").await.unwrap();
        assert!(score.appeal > 0.9);
        assert!(score.positive_mean > score.negative_mean);
    }

    #[tokio::test]
    async fn test_negative_leaning_image_scores_low() {
        let mut scores = vec![0.10; 5];
        scores.extend(vec![0.30; 5]);
        let scorer = scorer_with(scores);
        let score = scorer.score_bytes(b"fake image").await.unwrap();
        assert!(score.appeal < 0.1);
    }

    #[tokio::test]
    async fn test_empty_image_rejected() {
        let scorer = scorer_with(vec![0.2; 10]);
        let result = scorer.score_bytes(b"").await;
        assert!(matches!(result, Err(BrandLensError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_wrong_similarity_count_rejected() {
        let scorer = scorer_with(vec![0.2; 3]);
        let result = scorer.score_bytes(b"fake image").await;
        assert!(matches!(result, Err(BrandLensError::Thumbnail(_))));
    }
}
