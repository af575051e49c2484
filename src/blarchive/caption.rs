//! Caption suggestions from a hosted generative text model.
//!
//! One request per call, no retries. Whatever happens, the caller gets a
//! [`CaptionOutcome`] whose [`text`](CaptionOutcome::text) can be shown in
//! place of the caption.

use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, Result};
use crate::model::Category;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

pub const EMPTY_TEXT: &str = "No caption generated.";
pub const FAILED_TEXT: &str = "Error generating caption.";
pub const TIMED_OUT_TEXT: &str = "Caption request timed out.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionOutcome {
    Generated(String),
    Empty,
    Failed,
    TimedOut,
}

impl CaptionOutcome {
    pub fn text(&self) -> &str {
        match self {
            CaptionOutcome::Generated(text) => text,
            CaptionOutcome::Empty => EMPTY_TEXT,
            CaptionOutcome::Failed => FAILED_TEXT,
            CaptionOutcome::TimedOut => TIMED_OUT_TEXT,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, CaptionOutcome::Generated(_))
    }
}

pub fn prompt(category: Category) -> String {
    format!(
        "Generate a short, cute, and aesthetic Instagram caption for a photocard of the idol {}. \
         Include some relevant emojis. Keep it minimalist.",
        category.label()
    )
}

pub struct CaptionClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl CaptionClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ArchiveError::Caption(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            timeout,
        })
    }

    /// Build a client from config, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        let api_key = std::env::var(&config.caption_api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::new(
            config.caption_endpoint.clone(),
            config.caption_model.clone(),
            api_key,
            Duration::from_secs(config.caption_timeout_secs),
        )
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    pub async fn generate(&self, category: Category) -> CaptionOutcome {
        match tokio::time::timeout(self.timeout, self.request(category)).await {
            Err(_) => {
                warn!(timeout = ?self.timeout, "caption request timed out");
                CaptionOutcome::TimedOut
            }
            Ok(Err(e)) => {
                error!(error = %e, "caption request failed");
                CaptionOutcome::Failed
            }
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    CaptionOutcome::Empty
                } else {
                    CaptionOutcome::Generated(text.to_string())
                }
            }
        }
    }

    async fn request(&self, category: Category) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ArchiveError::Caption("no API key configured".to_string()))?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt(category),
                }],
            }],
        };

        debug!(model = %self.model, %category, "requesting caption");
        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ArchiveError::Caption(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Caption(format!(
                "service answered {}",
                status
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ArchiveError::Caption(e.to_string()))?;
        Ok(parsed.text())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_group() {
        assert!(prompt(Category::Nct127).contains("idol NCT 127."));
    }

    #[test]
    fn outcome_texts() {
        assert_eq!(CaptionOutcome::Generated("hi ✨".into()).text(), "hi ✨");
        assert_eq!(CaptionOutcome::Empty.text(), EMPTY_TEXT);
        assert_ne!(CaptionOutcome::Failed.text(), CaptionOutcome::TimedOut.text());
    }

    #[test]
    fn response_text_joins_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), "ab");

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn url_has_no_double_slash() {
        let client = CaptionClient::new(
            "https://example.test/v1beta/",
            "m",
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/m:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client =
            CaptionClient::new("http://127.0.0.1:9", "m", None, Duration::from_secs(1)).unwrap();
        assert_eq!(client.generate(Category::Riize).await, CaptionOutcome::Failed);
    }
}
