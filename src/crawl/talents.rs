//! Talent roster extraction from crawled agency pages.
//!
//! Aggregated page markdown is handed to a chat model, whose JSON reply
//! is decoded against a fixed schema. A reply that does not match the
//! schema is an extraction failure, never partially accepted.

use std::collections::HashMap;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::firecrawl::CrawledPage;
use crate::config::Prompts;
use crate::error::{BrandLensError, Result};
use crate::openai::extract_json_block;

/// Longest content slice handed to the extraction model.
const MAX_CONTENT_CHARS: usize = 60_000;

/// Structured roster extracted from an agency site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentRoster {
    #[serde(default)]
    pub agency_name: String,
    #[serde(default)]
    pub agency_contact: AgencyContact,
    #[serde(default)]
    pub talents: Vec<Talent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgencyContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talent {
    pub name: String,
    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub youtube: Option<String>,
    pub instagram: Option<String>,
    pub other: Option<String>,
}

/// LLM-backed extractor turning crawled pages into a [`TalentRoster`].
pub struct TalentExtractor {
    client: Client<OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl TalentExtractor {
    pub fn new(client: Client<OpenAIConfig>, model: impl Into<String>, prompts: Prompts) -> Self {
        Self {
            client,
            model: model.into(),
            prompts,
        }
    }

    /// Extract the talent roster from crawled agency pages.
    #[instrument(skip(self, pages), fields(pages = pages.len()))]
    pub async fn extract(&self, pages: &[CrawledPage]) -> Result<TalentRoster> {
        if pages.is_empty() {
            return Err(BrandLensError::Crawl(
                "crawl returned no pages to extract from".to_string(),
            ));
        }

        let content = aggregate_markdown(pages);
        debug!(chars = content.len(), "Extracting talent roster");

        let mut vars = HashMap::new();
        vars.insert("content".to_string(), content);
        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.talents.user, &vars);

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.talents.system.as_str())
                .build()
                .map_err(|e| BrandLensError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| BrandLensError::OpenAI(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.0)
            .build()
            .map_err(|e| BrandLensError::OpenAI(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| BrandLensError::OpenAI(format!("Talent extraction failed: {}", e)))?;

        let reply = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .cloned()
            .ok_or_else(|| {
                BrandLensError::Extraction("model returned no content".to_string())
            })?;

        decode_roster(&reply)
    }
}

/// Join page markdown under per-page source headers, capped at
/// [`MAX_CONTENT_CHARS`] so the request stays within model context.
fn aggregate_markdown(pages: &[CrawledPage]) -> String {
    let mut content = String::new();
    for page in pages {
        if !content.is_empty() {
            content.push_str("\n\n---\n\n");
        }
        if let Some(url) = &page.url {
            content.push_str("Page: ");
            content.push_str(url);
            content.push_str("\n\n");
        }
        content.push_str(page.markdown.trim());
        if content.len() >= MAX_CONTENT_CHARS {
            break;
        }
    }

    if content.len() > MAX_CONTENT_CHARS {
        let mut end = MAX_CONTENT_CHARS;
        while !content.is_char_boundary(end) {
            end -= 1;
        }
        content.truncate(end);
    }
    content
}

/// Decode the model's reply into a roster, tolerating code fences and
/// surrounding prose but nothing looser.
fn decode_roster(reply: &str) -> Result<TalentRoster> {
    let block = extract_json_block(reply).ok_or_else(|| {
        BrandLensError::Extraction("no JSON object found in model reply".to_string())
    })?;
    serde_json::from_str(block).map_err(|e| {
        BrandLensError::Extraction(format!(
            "talent roster did not match the expected shape: {}",
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, markdown: &str) -> CrawledPage {
        CrawledPage {
            url: Some(url.to_string()),
            title: None,
            markdown: markdown.to_string(),
        }
    }

    #[test]
    fn test_decodes_full_roster() {
        let reply = r#"{
            "agency_name": "Starlight Talent",
            "agency_contact": {"email": "hello@starlight.example", "phone": null, "address": "12 Main St"},
            "talents": [
                {
                    "name": "Ava Chen",
                    "social_links": {"youtube": "https://youtube.com/@avachen", "instagram": null, "other": null},
                    "bio": "Tech reviewer covering consumer gadgets."
                }
            ]
        }"#;

        let roster = decode_roster(reply).unwrap();
        assert_eq!(roster.agency_name, "Starlight Talent");
        assert_eq!(
            roster.agency_contact.email.as_deref(),
            Some("hello@starlight.example")
        );
        assert!(roster.agency_contact.phone.is_none());
        assert_eq!(roster.talents.len(), 1);
        assert_eq!(roster.talents[0].name, "Ava Chen");
        assert_eq!(
            roster.talents[0].social_links.youtube.as_deref(),
            Some("https://youtube.com/@avachen")
        );
    }

    #[test]
    fn test_decodes_fenced_reply() {
        let reply = "```json\n{\"agency_name\": \"A\", \"agency_contact\": {}, \"talents\": []}\n```";
        let roster = decode_roster(reply).unwrap();
        assert_eq!(roster.agency_name, "A");
        assert!(roster.talents.is_empty());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let roster = decode_roster(r#"{"talents": [{"name": "Solo"}]}"#).unwrap();
        assert!(roster.agency_name.is_empty());
        assert!(roster.agency_contact.email.is_none());
        assert!(roster.talents[0].social_links.youtube.is_none());
        assert!(roster.talents[0].bio.is_none());
    }

    #[test]
    fn test_rejects_reply_without_json() {
        let result = decode_roster("I could not find any talent information.");
        assert!(matches!(result, Err(BrandLensError::Extraction(_))));
    }

    #[test]
    fn test_rejects_mismatched_shape() {
        // talents must be an array of objects with a name
        let result = decode_roster(r#"{"talents": ["just a string"]}"#);
        assert!(matches!(result, Err(BrandLensError::Extraction(_))));
    }

    #[test]
    fn test_aggregation_separates_pages_and_caps_length() {
        let pages = vec![
            page("https://agency.example/a", "Page A body"),
            page("https://agency.example/b", "Page B body"),
        ];
        let content = aggregate_markdown(&pages);
        assert!(content.contains("Page: https://agency.example/a"));
        assert!(content.contains("\n\n---\n\n"));
        assert!(content.contains("Page B body"));

        let huge = vec![page("https://agency.example/big", &"x".repeat(MAX_CONTENT_CHARS * 2))];
        let capped = aggregate_markdown(&huge);
        assert!(capped.len() <= MAX_CONTENT_CHARS);
    }
}
