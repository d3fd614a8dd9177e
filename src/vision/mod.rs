//! Image-text similarity scoring for thumbnails.

mod appeal;
mod clip;

pub use appeal::{ThumbnailScore, ThumbnailScorer, NEGATIVE_PROMPTS, POSITIVE_PROMPTS};
pub use clip::ClipScorer;

use async_trait::async_trait;

use crate::error::Result;

/// A joint image-text embedding model.
#[async_trait]
pub trait ImageTextScorer: Send + Sync {
    /// Cosine similarity between the image and each prompt, in prompt
    /// order.
    async fn similarities(&self, image: &[u8], prompts: &[String]) -> Result<Vec<f64>>;
}
