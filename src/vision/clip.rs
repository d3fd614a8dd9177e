//! Client for a CLIP inference endpoint.
//!
//! The model runs out of process (any server that accepts an image
//! plus a list of texts and returns one cosine similarity per text).
//! Keeping the weights behind HTTP means no model load at startup and
//! no global state in this crate.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;

use super::ImageTextScorer;
use crate::error::{BrandLensError, Result};

/// HTTP client for a CLIP similarity server.
pub struct ClipScorer {
    client: reqwest::Client,
    endpoint: String,
}

impl ClipScorer {
    pub const DEFAULT_ENDPOINT: &'static str = "http://127.0.0.1:8765/score";

    const REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(BrandLensError::Config(
                "CLIP endpoint is not set".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ImageTextScorer for ClipScorer {
    async fn similarities(&self, image: &[u8], prompts: &[String]) -> Result<Vec<f64>> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let request = serde_json::json!({
            "image": encoded,
            "texts": prompts,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BrandLensError::Thumbnail(format!(
                "CLIP endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: SimilarityResponse = serde_json::from_str(&body).map_err(|e| {
            BrandLensError::Thumbnail(format!("Failed to parse CLIP response: {}", e))
        })?;

        if parsed.similarities.len() != prompts.len() {
            return Err(BrandLensError::Thumbnail(format!(
                "CLIP endpoint returned {} scores for {} prompts",
                parsed.similarities.len(),
                prompts.len()
            )));
        }

        Ok(parsed.similarities)
    }
}

#[derive(Deserialize)]
struct SimilarityResponse {
    similarities: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_endpoint_rejected() {
        let result = ClipScorer::new("");
        assert!(matches!(result, Err(BrandLensError::Config(_))));
    }

    #[test]
    fn test_similarity_response_decodes() {
        let parsed: SimilarityResponse =
            serde_json::from_str(r#"{"similarities": [0.31, 0.12, -0.05]}"#).unwrap();
        assert_eq!(parsed.similarities.len(), 3);
    }
}
