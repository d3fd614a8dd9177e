//! Firecrawl crawl API client.
//!
//! Starts a crawl job, polls it to completion, and collects the markdown
//! of every visited page.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::error::{BrandLensError, Result};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_CRAWL_TIMEOUT_SECS: u64 = 300;

/// One page collected by a crawl.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CrawledPage {
    pub url: Option<String>,
    pub title: Option<String>,
    pub markdown: String,
}

/// Client for the Firecrawl v1 crawl API.
pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    timeout: Duration,
}

impl FirecrawlClient {
    /// Create a client against the public Firecrawl endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(BrandLensError::Config(
                "Firecrawl API key is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_CRAWL_TIMEOUT_SECS),
        })
    }

    /// Override the status polling cadence and the overall crawl deadline.
    pub fn with_polling(mut self, poll_interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.timeout = timeout;
        self
    }

    /// Crawl a site and collect the markdown of every visited page.
    ///
    /// The crawl runs server-side; this polls the job until it completes,
    /// fails, or the configured deadline passes.
    #[instrument(skip(self))]
    pub async fn crawl(&self, url: &str, page_limit: u32) -> Result<Vec<CrawledPage>> {
        let parsed = url::Url::parse(url)
            .map_err(|e| BrandLensError::InvalidInput(format!("invalid crawl URL '{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BrandLensError::InvalidInput(format!(
                "crawl URL must be http or https, got '{}'",
                url
            )));
        }

        let job_id = self.start_crawl(url, page_limit).await?;
        debug!(job_id = %job_id, "Crawl started");

        let deadline = tokio::time::Instant::now() + self.timeout;
        loop {
            let status = self
                .fetch_status(&format!("{}/v1/crawl/{}", self.base_url, job_id))
                .await?;

            match status.status.as_str() {
                "completed" => {
                    let pages = self.collect_pages(status).await?;
                    info!(pages = pages.len(), "Crawl completed");
                    return Ok(pages);
                }
                "failed" | "cancelled" => {
                    return Err(BrandLensError::Crawl(format!(
                        "crawl of '{}' ended with status '{}'",
                        url, status.status
                    )));
                }
                _ => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(BrandLensError::Crawl(format!(
                            "crawl of '{}' did not finish within {}s",
                            url,
                            self.timeout.as_secs()
                        )));
                    }
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    async fn start_crawl(&self, url: &str, page_limit: u32) -> Result<String> {
        let body = json!({
            "url": url,
            "limit": page_limit,
            "scrapeOptions": {
                "formats": ["markdown"],
                "onlyMainContent": true,
                "excludeTags": ["script", "style", "nav", "footer", "header"],
            }
        });

        let response = self
            .client
            .post(format!("{}/v1/crawl", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::api_error(status, &text));
        }

        let started: StartCrawlResponse = serde_json::from_str(&text)?;
        if !started.success {
            return Err(BrandLensError::Crawl(
                started
                    .error
                    .unwrap_or_else(|| "crawl request was rejected".to_string()),
            ));
        }
        started
            .id
            .ok_or_else(|| BrandLensError::Crawl("crawl response carried no job id".to_string()))
    }

    async fn fetch_status(&self, status_url: &str) -> Result<CrawlStatusResponse> {
        let response = self
            .client
            .get(status_url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::api_error(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Drain a completed crawl, following pagination links for large jobs.
    async fn collect_pages(&self, first: CrawlStatusResponse) -> Result<Vec<CrawledPage>> {
        let mut pages = Vec::new();
        let mut batch = first;
        loop {
            for doc in batch.data {
                if let Some(page) = page_from(doc) {
                    pages.push(page);
                }
            }
            let Some(next) = batch.next else { break };
            batch = self.fetch_status(&next).await?;
        }
        Ok(pages)
    }

    fn api_error(status: reqwest::StatusCode, body: &str) -> BrandLensError {
        let message = serde_json::from_str::<ApiErrorEnvelope>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.to_string());
        BrandLensError::Crawl(format!("{}: {}", status, message))
    }
}

/// Pages without usable markdown are dropped.
fn page_from(doc: CrawlDocument) -> Option<CrawledPage> {
    let markdown = doc.markdown.filter(|m| !m.trim().is_empty())?;
    let (url, title) = match doc.metadata {
        Some(meta) => (meta.source_url, meta.title),
        None => (None, None),
    };
    Some(CrawledPage {
        url,
        title,
        markdown,
    })
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: String,
}

#[derive(Deserialize)]
struct StartCrawlResponse {
    #[serde(default)]
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct CrawlStatusResponse {
    status: String,
    #[serde(default)]
    data: Vec<CrawlDocument>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct CrawlDocument {
    markdown: Option<String>,
    metadata: Option<DocumentMetadata>,
}

#[derive(Deserialize)]
struct DocumentMetadata {
    title: Option<String>,
    #[serde(rename = "sourceURL")]
    source_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_empty_api_key() {
        let result = FirecrawlClient::new("");
        assert!(matches!(result, Err(BrandLensError::Config(_))));
    }

    #[test]
    fn test_decodes_start_response() {
        let response: StartCrawlResponse =
            serde_json::from_value(json!({"success": true, "id": "job-123"})).unwrap();
        assert!(response.success);
        assert_eq!(response.id.as_deref(), Some("job-123"));
    }

    #[test]
    fn test_decodes_status_with_source_url() {
        let response: CrawlStatusResponse = serde_json::from_value(json!({
            "status": "completed",
            "data": [{
                "markdown": "# Our Talents",
                "metadata": {"title": "Talents", "sourceURL": "https://agency.example/talents"}
            }],
            "next": null
        }))
        .unwrap();

        assert_eq!(response.status, "completed");
        assert_eq!(response.data.len(), 1);
        let page = page_from(response.data.into_iter().next().unwrap()).unwrap();
        assert_eq!(page.url.as_deref(), Some("https://agency.example/talents"));
        assert_eq!(page.title.as_deref(), Some("Talents"));
        assert_eq!(page.markdown, "# Our Talents");
    }

    #[test]
    fn test_drops_pages_without_markdown() {
        let empty: CrawlDocument =
            serde_json::from_value(json!({"markdown": "   ", "metadata": null})).unwrap();
        assert!(page_from(empty).is_none());

        let missing: CrawlDocument = serde_json::from_value(json!({"metadata": null})).unwrap();
        assert!(page_from(missing).is_none());
    }

    #[test]
    fn test_api_error_prefers_envelope_message() {
        let err = FirecrawlClient::api_error(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error": "Invalid token"}"#,
        );
        let text = err.to_string();
        assert!(text.contains("Invalid token"));
        assert!(text.contains("401"));
    }
}
