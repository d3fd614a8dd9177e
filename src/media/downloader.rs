//! Video and audio download via yt-dlp, with ffmpeg post-processing.

use std::path::{Path, PathBuf};

use crate::error::{BrandLensError, Result};

/// Metadata probed from a video without downloading it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VideoProbe {
    pub video_id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_seconds: Option<u32>,
    pub channel: Option<String>,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Downloads media files into a working directory.
pub struct MediaDownloader {
    output_dir: PathBuf,
}

impl MediaDownloader {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Download the full video at the requested quality. `quality` is
    /// a yt-dlp format selector such as "best" or "bestvideo+bestaudio".
    pub async fn download_video(&self, video_id: &str, quality: &str) -> Result<PathBuf> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let output_template = format!("{}/%(id)s.%(ext)s", self.output_dir.display());

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "-f",
                quality,
                "--output",
                &output_template,
                "--no-playlist",
                "--quiet",
                "--no-warnings",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BrandLensError::ToolNotFound("yt-dlp".to_string())
                } else {
                    BrandLensError::Download(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrandLensError::Download(format!(
                "yt-dlp failed for {}: {}",
                video_id, stderr
            )));
        }

        self.find_media_file(video_id)
    }

    /// Download just the audio track as an mp3.
    pub async fn download_audio(&self, video_id: &str) -> Result<PathBuf> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let output_template = format!("{}/%(id)s.%(ext)s", self.output_dir.display());

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "0",
                "--output",
                &output_template,
                "--no-playlist",
                "--quiet",
                "--no-warnings",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BrandLensError::ToolNotFound("yt-dlp".to_string())
                } else {
                    BrandLensError::Download(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrandLensError::Download(format!(
                "yt-dlp failed for {}: {}",
                video_id, stderr
            )));
        }

        self.find_media_file(video_id)
    }

    /// Fetch metadata with yt-dlp without downloading the media.
    pub async fn probe_metadata(&self, video_id: &str) -> Result<VideoProbe> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--ignore-errors",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BrandLensError::ToolNotFound("yt-dlp".to_string())
                } else {
                    BrandLensError::Download(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrandLensError::NotFound(format!(
                "Video {} not found or unavailable: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str).map_err(|e| {
            BrandLensError::Download(format!("Failed to parse yt-dlp output: {}", e))
        })?;

        let title = json["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();
        let description = json["description"].as_str().map(|s| s.to_string());
        let duration_seconds = json["duration"].as_f64().map(|d| d as u32);
        let channel = json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .map(|s| s.to_string());
        let thumbnail_url = json["thumbnail"].as_str().map(|s| s.to_string());

        let published_at = json["upload_date"].as_str().and_then(|date_str| {
            // yt-dlp returns dates as YYYYMMDD
            if date_str.len() == 8 {
                chrono::NaiveDate::parse_from_str(date_str, "%Y%m%d")
                    .ok()
                    .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
            } else {
                None
            }
        });

        Ok(VideoProbe {
            video_id: video_id.to_string(),
            title,
            description,
            duration_seconds,
            channel,
            thumbnail_url,
            published_at,
        })
    }

    /// Duration of a local media file in seconds, via ffprobe.
    pub async fn probe_duration(&self, path: &Path) -> Result<f64> {
        let output = tokio::process::Command::new("ffprobe")
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                &path.display().to_string(),
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BrandLensError::ToolNotFound("ffprobe".to_string())
                } else {
                    BrandLensError::Download(format!("Failed to run ffprobe: {}", e))
                }
            })?;

        if !output.status.success() {
            return Err(BrandLensError::Download(format!(
                "ffprobe failed for {}",
                path.display()
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str).map_err(|e| {
            BrandLensError::Download(format!("Failed to parse ffprobe output: {}", e))
        })?;

        json["format"]["duration"]
            .as_str()
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| {
                BrandLensError::Download(format!(
                    "No duration in ffprobe output for {}",
                    path.display()
                ))
            })
    }

    /// Split an audio file into chunks of at most `chunk_seconds`.
    /// Files already short enough are returned untouched.
    pub async fn split_audio(&self, input: &Path, chunk_seconds: u32) -> Result<Vec<PathBuf>> {
        let duration = self.probe_duration(input).await?;
        let chunk_length = chunk_seconds as f64;

        if duration <= chunk_length {
            return Ok(vec![input.to_path_buf()]);
        }

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("chunk");
        let num_chunks = (duration / chunk_length).ceil() as u32;
        let mut chunks = Vec::with_capacity(num_chunks as usize);

        for i in 0..num_chunks {
            let start = i as f64 * chunk_length;
            let output_path = self.output_dir.join(format!("{}_part{:03}.mp3", stem, i));
            self.extract_segment(input, start, chunk_length, &output_path)
                .await?;
            chunks.push(output_path);
        }

        Ok(chunks)
    }

    async fn extract_segment(
        &self,
        input: &Path,
        start_seconds: f64,
        length_seconds: f64,
        output_path: &Path,
    ) -> Result<()> {
        // Stream copy first; fall back to re-encoding when the
        // container doesn't allow clean cuts.
        let copy_result = tokio::process::Command::new("ffmpeg")
            .args([
                "-ss",
                &start_seconds.to_string(),
                "-t",
                &length_seconds.to_string(),
                "-i",
                &input.display().to_string(),
                "-acodec",
                "copy",
                &output_path.display().to_string(),
                "-y",
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BrandLensError::ToolNotFound("ffmpeg".to_string())
                } else {
                    BrandLensError::Download(format!("Failed to run ffmpeg: {}", e))
                }
            })?;

        if copy_result.status.success() && output_path.exists() {
            return Ok(());
        }

        let output = tokio::process::Command::new("ffmpeg")
            .args([
                "-ss",
                &start_seconds.to_string(),
                "-t",
                &length_seconds.to_string(),
                "-i",
                &input.display().to_string(),
                "-codec:a",
                "libmp3lame",
                "-qscale:a",
                "2",
                &output_path.display().to_string(),
                "-y",
            ])
            .output()
            .await
            .map_err(|e| BrandLensError::Download(format!("Failed to run ffmpeg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrandLensError::Download(format!(
                "ffmpeg failed to extract segment: {}",
                stderr
            )));
        }

        Ok(())
    }

    fn find_media_file(&self, video_id: &str) -> Result<PathBuf> {
        for ext in ["mp3", "m4a", "mp4", "mkv", "webm", "opus"] {
            let path = self.output_dir.join(format!("{}.{}", video_id, ext));
            if path.exists() {
                return Ok(path);
            }
        }

        // yt-dlp occasionally picks an extension outside the usual
        // set, so scan for anything with the video's stem.
        let entries = std::fs::read_dir(&self.output_dir)?;
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(video_id) {
                return Ok(entry.path());
            }
        }

        Err(BrandLensError::NotFound(format!(
            "Downloaded file for {} not found in {}",
            video_id,
            self.output_dir.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_media_file_prefers_known_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.mp3"), b"x").unwrap();
        std::fs::write(dir.path().join("abc123.description"), b"y").unwrap();

        let downloader = MediaDownloader::new(dir.path());
        let found = downloader.find_media_file("abc123").unwrap();
        assert_eq!(found.extension().and_then(|e| e.to_str()), Some("mp3"));
    }

    #[test]
    fn test_find_media_file_falls_back_to_prefix_scan() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("xyz789.weird"), b"x").unwrap();

        let downloader = MediaDownloader::new(dir.path());
        let found = downloader.find_media_file("xyz789").unwrap();
        assert!(found.to_string_lossy().ends_with("xyz789.weird"));
    }

    #[test]
    fn test_find_media_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = MediaDownloader::new(dir.path());
        let result = downloader.find_media_file("nothing");
        assert!(matches!(result, Err(BrandLensError::NotFound(_))));
    }
}
