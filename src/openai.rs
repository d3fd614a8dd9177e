//! OpenAI client configuration and chat response helpers.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with configured timeout.
///
/// Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client() -> Client<OpenAIConfig> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}

/// Extract the first JSON object or array from a chat completion reply.
///
/// Models often wrap structured output in Markdown code fences or add
/// prose around it. This finds the outermost `{...}` or `[...]` span so
/// the caller can hand it straight to serde.
pub fn extract_json_block(content: &str) -> Option<&str> {
    let object = content.find('{').zip(content.rfind('}'));
    let array = content.find('[').zip(content.rfind(']'));

    let (start, end) = match (object, array) {
        (Some(obj), Some(arr)) => {
            if arr.0 < obj.0 {
                arr
            } else {
                obj
            }
        }
        (Some(obj), None) => obj,
        (None, Some(arr)) => arr,
        (None, None) => return None,
    };

    if start > end {
        return None;
    }
    Some(&content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_plain_object() {
        let content = r#"{"name": "test"}"#;
        assert_eq!(extract_json_block(content), Some(r#"{"name": "test"}"#));
    }

    #[test]
    fn test_strips_code_fences() {
        let content = "```json\n{\"key\": [1, 2]}\n```";
        assert_eq!(extract_json_block(content), Some("{\"key\": [1, 2]}"));
    }

    #[test]
    fn test_extracts_array_with_surrounding_prose() {
        let content = "Here are the results:\n[{\"a\": 1}, {\"a\": 2}]\nLet me know!";
        assert_eq!(extract_json_block(content), Some("[{\"a\": 1}, {\"a\": 2}]"));
    }

    #[test]
    fn test_prefers_array_when_it_opens_first() {
        let content = "[{\"inner\": true}]";
        assert_eq!(extract_json_block(content), Some("[{\"inner\": true}]"));
    }

    #[test]
    fn test_returns_none_without_json() {
        assert_eq!(extract_json_block("no structured output here"), None);
        assert_eq!(extract_json_block(""), None);
    }
}
