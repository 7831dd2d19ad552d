use super::retry::RetryPolicy;
use super::{NarrativeFailure, NarrativeProvider, NarrativeRequest};
use crate::config::NarrativeConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` adapter.
#[derive(Clone)]
pub struct GeminiNarrator {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    retry: RetryPolicy,
}

impl GeminiNarrator {
    /// Builds a client bounded by the configured per-request timeout.
    pub fn new(
        api_key: impl Into<String>,
        config: &NarrativeConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, api_key, config))
    }

    /// Uses a caller-built client; the configured timeout is not applied to it.
    pub fn with_client(client: Client, api_key: impl Into<String>, config: &NarrativeConfig) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            retry: RetryPolicy::new(config.max_retries, config.initial_backoff),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn attempt(&self, body: &GenerateRequest<'_>) -> Result<String, NarrativeFailure> {
        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_failure(status));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| NarrativeFailure::Malformed(err.to_string()))?;

        payload
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(NarrativeFailure::EmptyResponse)
    }
}

#[async_trait]
impl NarrativeProvider for GeminiNarrator {
    async fn summarize(&self, request: &NarrativeRequest) -> Result<String, NarrativeFailure> {
        let prompt = request.prompt();
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!(model = %self.model, company = %request.company_name, "requesting executive narrative");
        let body = &body;
        self.retry.run(|_| self.attempt(body)).await
    }
}

impl fmt::Debug for GeminiNarrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiNarrator")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("retry", &self.retry)
            .finish()
    }
}

fn status_failure(status: StatusCode) -> NarrativeFailure {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NarrativeFailure::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::TOO_MANY_REQUESTS => NarrativeFailure::RateLimited,
        other => NarrativeFailure::Upstream {
            status: other.as_u16(),
        },
    }
}

fn transport_failure(err: reqwest::Error) -> NarrativeFailure {
    if err.is_timeout() {
        NarrativeFailure::Timeout
    } else {
        NarrativeFailure::Network(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_http_status_to_failure_class() {
        assert_eq!(
            status_failure(StatusCode::UNAUTHORIZED),
            NarrativeFailure::Unauthorized { status: 401 }
        );
        assert_eq!(
            status_failure(StatusCode::TOO_MANY_REQUESTS),
            NarrativeFailure::RateLimited
        );
        let upstream = status_failure(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream, NarrativeFailure::Upstream { status: 503 });
        assert!(upstream.is_transient());
        assert!(!status_failure(StatusCode::BAD_REQUEST).is_transient());
    }

    #[test]
    fn extracts_first_candidate_text() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Primeiro."},{"text":"\nSegundo."}]}},
                {"content":{"parts":[{"text":"ignorado"}]}}]}"#,
        )
        .expect("payload parses");
        assert_eq!(payload.text().as_deref(), Some("Primeiro.\nSegundo."));
    }

    #[test]
    fn missing_candidates_yield_no_text() {
        let payload: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{}}"#).expect("payload parses");
        assert!(payload.text().is_none());
    }

    #[test]
    fn url_targets_generate_content() {
        let config = NarrativeConfig {
            endpoint: "http://127.0.0.1:9/v1beta/".to_string(),
            model: "gemini-test".to_string(),
            ..NarrativeConfig::default()
        };
        let narrator = GeminiNarrator::new("top-secret", &config).expect("client builds");
        assert_eq!(
            narrator.url(),
            "http://127.0.0.1:9/v1beta/models/gemini-test:generateContent"
        );
        assert!(!format!("{narrator:?}").contains("top-secret"));
    }
}
