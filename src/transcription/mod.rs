//! Speech-to-text transcription backends.

mod whisper;

pub use whisper::WhisperTranscriber;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Turns a local media file into transcript text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Backend name for logs and errors.
    fn name(&self) -> &str;

    /// Transcribe the file at `audio_path` to plain text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}
