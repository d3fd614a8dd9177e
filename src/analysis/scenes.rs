//! Scene-level content and sponsor analysis of video transcripts.
//!
//! A transcript is cut into fixed-size word windows, each standing in for
//! roughly one minute of speech. Every window is summarized by a chat
//! model that also reports any sponsor mentioned inside it, and the video
//! description is scanned separately for the overall sponsor list.

use std::collections::HashMap;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use futures::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::Prompts;
use crate::error::{BrandLensError, Result};
use crate::openai::extract_json_block;

/// Words per scene window, assuming an average speaking rate of 150
/// words per minute.
const WORDS_PER_SCENE: usize = 150;

/// Seconds of video each scene window represents.
const SCENE_SECONDS: u64 = 60;

const MAX_CONCURRENT_SCENES: usize = 3;

/// One analyzed transcript window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub start_seconds: u64,
    pub end_seconds: u64,
    pub summary: String,
    /// Sponsor mentioned in this scene, empty when there is none.
    pub sponsor: String,
}

/// A sponsor detected in the video description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sponsor {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
}

/// Full content analysis for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub scenes: Vec<Scene>,
    pub sponsors: Vec<Sponsor>,
    pub metadata: VideoMetadata,
}

/// Analyzes transcripts for scene content and sponsor mentions.
pub struct ContentAnalyzer {
    client: Client<OpenAIConfig>,
    model: String,
    prompts: Prompts,
    max_concurrent: usize,
}

impl ContentAnalyzer {
    pub fn new(client: Client<OpenAIConfig>, model: impl Into<String>, prompts: Prompts) -> Self {
        Self {
            client,
            model: model.into(),
            prompts,
            max_concurrent: MAX_CONCURRENT_SCENES,
        }
    }

    /// Analyze a transcript against its video title and description.
    ///
    /// An empty transcript yields zero scenes; sponsor detection still
    /// runs against the description.
    #[instrument(skip(self, transcript, title, description))]
    pub async fn analyze(
        &self,
        transcript: &str,
        title: &str,
        description: &str,
    ) -> Result<VideoAnalysis> {
        let windows = split_scenes(transcript);
        info!(scenes = windows.len(), "Analyzing video content");

        let scenes = self.analyze_scenes(windows).await?;
        let sponsors = self.detect_sponsors(description).await?;

        Ok(VideoAnalysis {
            scenes,
            sponsors,
            metadata: VideoMetadata {
                title: title.to_string(),
                description: description.to_string(),
            },
        })
    }

    async fn analyze_scenes(&self, windows: Vec<String>) -> Result<Vec<Scene>> {
        if windows.is_empty() {
            return Ok(Vec::new());
        }

        let total = windows.len();
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} Scenes    [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("█▓░"),
        );

        // Analyze windows in parallel with a concurrency limit, fail fast
        // on the first API error.
        let mut stream = stream::iter(windows.into_iter().enumerate())
            .map(|(idx, text)| async move {
                let outcome = self.analyze_scene(&text).await;
                (idx, outcome)
            })
            .buffer_unordered(self.max_concurrent);

        let mut outcomes: Vec<(usize, SceneOutcome)> = Vec::with_capacity(total);
        while let Some((idx, result)) = stream.next().await {
            pb.inc(1);
            match result {
                Ok(outcome) => outcomes.push((idx, outcome)),
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(BrandLensError::Analysis(format!(
                        "Scene {} failed: {}",
                        idx + 1,
                        e
                    )));
                }
            }
        }
        pb.finish_and_clear();

        outcomes.sort_by_key(|(idx, _)| *idx);
        Ok(outcomes
            .into_iter()
            .map(|(idx, outcome)| {
                let (start_seconds, end_seconds) = scene_window(idx);
                Scene {
                    start_seconds,
                    end_seconds,
                    summary: outcome.summary,
                    sponsor: outcome.sponsor,
                }
            })
            .collect())
    }

    /// Ask the model for a summary and sponsor of one window. A reply
    /// that cannot be decoded falls back to a leading-text summary
    /// rather than failing the whole analysis.
    async fn analyze_scene(&self, scene_text: &str) -> Result<SceneOutcome> {
        let mut vars = HashMap::new();
        vars.insert("scene_text".to_string(), scene_text.to_string());
        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.scenes.user, &vars);

        let reply = self
            .chat(&self.prompts.scenes.system, &user_prompt, 0.2)
            .await?;

        Ok(match decode_scene_reply(&reply) {
            Some(outcome) => outcome,
            None => {
                debug!("Scene reply was not valid JSON, using fallback summary");
                SceneOutcome {
                    summary: fallback_summary(scene_text),
                    sponsor: String::new(),
                }
            }
        })
    }

    /// Detect sponsors in the video description.
    async fn detect_sponsors(&self, description: &str) -> Result<Vec<Sponsor>> {
        if description.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut vars = HashMap::new();
        vars.insert("description".to_string(), description.to_string());
        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.sponsors.user, &vars);

        let reply = self
            .chat(&self.prompts.sponsors.system, &user_prompt, 0.0)
            .await?;

        Ok(parse_sponsor_list(&reply))
    }

    async fn chat(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| BrandLensError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| BrandLensError::OpenAI(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(temperature)
            .build()
            .map_err(|e| BrandLensError::OpenAI(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| BrandLensError::OpenAI(e.to_string()))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .cloned()
            .ok_or_else(|| BrandLensError::OpenAI("model returned no content".to_string()))
    }
}

struct SceneOutcome {
    summary: String,
    sponsor: String,
}

#[derive(Deserialize)]
struct SceneReply {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    sponsor: String,
}

/// Cut a transcript into windows of [`WORDS_PER_SCENE`] words.
fn split_scenes(transcript: &str) -> Vec<String> {
    let words: Vec<&str> = transcript.split_whitespace().collect();
    words
        .chunks(WORDS_PER_SCENE)
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Timestamp range a scene index covers.
fn scene_window(index: usize) -> (u64, u64) {
    let start = index as u64 * SCENE_SECONDS;
    (start, start + SCENE_SECONDS)
}

fn decode_scene_reply(reply: &str) -> Option<SceneOutcome> {
    let block = extract_json_block(reply)?;
    let parsed: SceneReply = serde_json::from_str(block).ok()?;
    Some(SceneOutcome {
        summary: parsed.summary,
        sponsor: parsed.sponsor,
    })
}

/// First sentence of the window, truncated to 50 characters.
fn fallback_summary(scene_text: &str) -> String {
    let first_sentence = scene_text.split('.').next().unwrap_or(scene_text);
    let truncated: String = first_sentence.chars().take(50).collect();
    format!("{}...", truncated)
}

fn parse_sponsor_list(reply: &str) -> Vec<Sponsor> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Sponsor {
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_transcript_into_word_windows() {
        let word = "hello";
        let transcript = vec![word; 400].join(" ");
        let scenes = split_scenes(&transcript);

        assert_eq!(scenes.len(), 3);
        assert_eq!(scenes[0].split_whitespace().count(), 150);
        assert_eq!(scenes[1].split_whitespace().count(), 150);
        assert_eq!(scenes[2].split_whitespace().count(), 100);
    }

    #[test]
    fn test_empty_transcript_has_no_scenes() {
        assert!(split_scenes("").is_empty());
        assert!(split_scenes("   \n  ").is_empty());
    }

    #[test]
    fn test_scene_windows_are_minute_aligned() {
        assert_eq!(scene_window(0), (0, 60));
        assert_eq!(scene_window(1), (60, 120));
        assert_eq!(scene_window(5), (300, 360));
    }

    #[test]
    fn test_decodes_scene_reply_json() {
        let outcome =
            decode_scene_reply(r#"{"summary": "Intro to the product", "sponsor": "NordVPN"}"#)
                .unwrap();
        assert_eq!(outcome.summary, "Intro to the product");
        assert_eq!(outcome.sponsor, "NordVPN");
    }

    #[test]
    fn test_decodes_fenced_scene_reply() {
        let outcome =
            decode_scene_reply("```json\n{\"summary\": \"Recap\", \"sponsor\": \"\"}\n```")
                .unwrap();
        assert_eq!(outcome.summary, "Recap");
        assert!(outcome.sponsor.is_empty());
    }

    #[test]
    fn test_garbage_reply_decodes_to_none() {
        assert!(decode_scene_reply("the scene was about cooking").is_none());
    }

    #[test]
    fn test_fallback_summary_truncates_first_sentence() {
        let text = "This sentence is deliberately much longer than fifty characters in total. Second.";
        let summary = fallback_summary(text);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 53);

        assert_eq!(fallback_summary("Short intro. More."), "Short intro...");
    }

    #[test]
    fn test_parses_sponsor_lists() {
        let sponsors = parse_sponsor_list("NordVPN, Squarespace , ,Raid Shadow Legends");
        let names: Vec<&str> = sponsors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["NordVPN", "Squarespace", "Raid Shadow Legends"]);

        assert!(parse_sponsor_list("").is_empty());
        assert!(parse_sponsor_list("  ").is_empty());
    }
}
