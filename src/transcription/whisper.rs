//! OpenAI Whisper transcription implementation.

use std::path::Path;

use async_openai::config::OpenAIConfig;
use async_openai::types::{AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, instrument};

use super::Transcriber;
use crate::error::{BrandLensError, Result};
use crate::media::MediaDownloader;

/// OpenAI Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: Client<OpenAIConfig>,
    model: String,
    chunk_duration_seconds: u32,
    max_concurrent_chunks: usize,
}

impl WhisperTranscriber {
    /// Create a transcriber with default settings.
    pub fn new(client: Client<OpenAIConfig>) -> Self {
        Self::with_config(client, "whisper-1", 120, 3)
    }

    /// Create a transcriber with custom model and chunking settings.
    pub fn with_config(
        client: Client<OpenAIConfig>,
        model: impl Into<String>,
        chunk_duration_seconds: u32,
        max_concurrent_chunks: usize,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            chunk_duration_seconds,
            max_concurrent_chunks,
        }
    }

    /// Transcribe a single audio file (no splitting).
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_single(&self, audio_path: &Path) -> Result<String> {
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path).await?;

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.mp3")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model)
            .response_format(AudioResponseFormat::Json)
            .build()
            .map_err(|e| BrandLensError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| BrandLensError::OpenAI(format!("Whisper API error: {}", e)))?;

        Ok(response.text.trim().to_string())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    fn name(&self) -> &str {
        "whisper"
    }

    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let temp_dir = tempfile::tempdir()?;
        let splitter = MediaDownloader::new(temp_dir.path());
        let chunks = splitter
            .split_audio(audio_path, self.chunk_duration_seconds)
            .await?;

        if chunks.len() == 1 {
            return self.transcribe_single(audio_path).await;
        }

        let chunk_count = chunks.len();
        info!("Processing {} audio chunks with {}", chunk_count, self.model);

        let pb = ProgressBar::new(chunk_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} Whisper   [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("█▓░"),
        );

        // Process chunks in parallel with a concurrency limit, fail
        // fast on error.
        let mut results: Vec<(usize, String)> = Vec::with_capacity(chunk_count);

        let mut stream = stream::iter(chunks.into_iter().enumerate())
            .map(|(idx, chunk_path)| async move {
                let result = self.transcribe_single(&chunk_path).await;
                (idx, result)
            })
            .buffer_unordered(self.max_concurrent_chunks);

        while let Some((idx, result)) = stream.next().await {
            pb.inc(1);
            match result {
                Ok(text) => results.push((idx, text)),
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(BrandLensError::Transcription(format!(
                        "Chunk {} failed: {}",
                        idx, e
                    )));
                }
            }
        }

        pb.finish_and_clear();

        results.sort_by_key(|(idx, _)| *idx);
        let text = results
            .into_iter()
            .map(|(_, t)| t)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client<OpenAIConfig> {
        Client::with_config(OpenAIConfig::new().with_api_key("test-key"))
    }

    #[test]
    fn test_default_configuration() {
        let transcriber = WhisperTranscriber::new(test_client());
        assert_eq!(transcriber.name(), "whisper");
        assert_eq!(transcriber.model, "whisper-1");
        assert_eq!(transcriber.chunk_duration_seconds, 120);
        assert_eq!(transcriber.max_concurrent_chunks, 3);
    }

    #[test]
    fn test_custom_configuration() {
        let transcriber = WhisperTranscriber::with_config(test_client(), "whisper-large", 60, 5);
        assert_eq!(transcriber.model, "whisper-large");
        assert_eq!(transcriber.chunk_duration_seconds, 60);
    }
}
