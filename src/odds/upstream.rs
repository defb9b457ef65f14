//! Odds upstream client.
//!
//! # Responsibilities
//! - Issue exactly one GET per date variant
//! - Inject the odds API key as a query parameter
//! - Classify the result into an [`UpstreamAttemptOutcome`]
//!
//! Retrying across variants is the orchestrator's job, never this client's.

use async_trait::async_trait;
use reqwest::Client;

use crate::odds::types::UpstreamAttemptOutcome;

/// Longest upstream error body kept for logs.
const MAX_ERROR_BODY: usize = 400;

/// One call against the odds provider for one date variant.
#[async_trait]
pub trait OddsUpstream: Send + Sync {
    /// Endpoint for log records; must not contain secrets.
    fn endpoint(&self) -> &str;

    async fn fetch(&self, meeting_date: &str) -> UpstreamAttemptOutcome;
}

/// HTTP implementation backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpOddsUpstream {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpOddsUpstream {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl OddsUpstream for HttpOddsUpstream {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, meeting_date: &str) -> UpstreamAttemptOutcome {
        let mut params = vec![("meetingDate", meeting_date)];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("apikey", key));
        }

        let response = match self.client.get(&self.base_url).query(&params).send().await {
            Ok(r) => r,
            Err(e) => return classify_error(e),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return classify_error(e),
        };

        if status.as_u16() >= 400 {
            return UpstreamAttemptOutcome::HttpError {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            };
        }

        decode_payload(status.as_u16(), &body)
    }
}

/// Decode a 2xx body. Empty and non-JSON bodies are malformed.
pub fn decode_payload(status: u16, body: &str) -> UpstreamAttemptOutcome {
    if body.trim().is_empty() {
        return UpstreamAttemptOutcome::MalformedPayload("empty body".to_string());
    }
    match serde_json::from_str(body) {
        Ok(payload) => UpstreamAttemptOutcome::Success { status, payload },
        Err(e) => UpstreamAttemptOutcome::MalformedPayload(format!("invalid JSON: {}", e)),
    }
}

fn classify_error(err: reqwest::Error) -> UpstreamAttemptOutcome {
    if err.is_timeout() {
        UpstreamAttemptOutcome::Timeout
    } else {
        // Strip the URL: it carries the api key in its query string.
        UpstreamAttemptOutcome::TransportError(err.without_url().to_string())
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
