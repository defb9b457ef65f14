//! AI chat upstream client.
//!
//! # Responsibilities
//! - Build the upstream URL (`{base}/{assistantId}?projectId=`)
//! - Inject the AI key as `X-API-Key`
//! - Forward error statuses verbatim; map unusable bodies to 502

use std::time::Instant;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::ai::types::{AiChatRequest, AiChatResponse, AiError, UpstreamChatPayload};
use crate::config::AiUpstreamConfig;
use crate::observability::metrics;
use crate::resilience::UpstreamTimeouts;

const API_KEY_HEADER: &str = "X-API-Key";

/// Pass-through client for the conversational-AI upstream.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl AiClient {
    pub fn new(client: Client, base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn from_config(config: &AiUpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = UpstreamTimeouts::for_ai(config).build_client()?;
        Ok(Self::new(client, config.base_url.clone(), config.api_key.clone()))
    }

    /// Forward one chat request.
    pub async fn chat(
        &self,
        request: &AiChatRequest,
        request_id: &str,
    ) -> Result<AiChatResponse, AiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AiError::Misconfigured("AI_API_KEY"))?;
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(AiError::Misconfigured("AI_BASE_URL"))?;

        let url = chat_url(base_url, &request.assistant_id, request.project_id.as_deref())?;
        let payload = UpstreamChatPayload {
            prompt: &request.prompt,
            context: request.context.as_ref(),
        };

        let started = Instant::now();
        let response = self
            .client
            .post(url.clone())
            .header(API_KEY_HEADER, api_key)
            .json(&payload)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                let outcome = if e.is_timeout() { "timeout" } else { "transport_error" };
                metrics::record_upstream_attempt("ai", outcome, started);
                tracing::error!(request_id = %request_id, upstream = %url.path(), error = %e, "AI upstream unreachable");
                return Err(AiError::Transport(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;
        let body = body.trim();

        tracing::info!(
            request_id = %request_id,
            upstream = %url.path(),
            status,
            body_bytes = body.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "AI upstream responded"
        );

        let result = interpret(status, body);
        let outcome = match &result {
            Ok(_) => "success",
            Err(AiError::UpstreamStatus { .. }) => "http_error",
            Err(_) => "malformed_payload",
        };
        metrics::record_upstream_attempt("ai", outcome, started);
        result
    }
}

fn chat_url(base_url: &str, assistant_id: &str, project_id: Option<&str>) -> Result<Url, AiError> {
    let assistant_id = assistant_id.trim();
    if assistant_id.is_empty() {
        return Err(AiError::InvalidRequest("assistantId must not be empty".to_string()));
    }

    let mut url = Url::parse(base_url)
        .map_err(|e| AiError::Transport(format!("invalid AI base URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| AiError::Transport("AI base URL cannot carry a path".to_string()))?
        .pop_if_empty()
        .push(assistant_id);

    if let Some(project) = project_id.filter(|p| !p.trim().is_empty()) {
        url.query_pairs_mut().append_pair("projectId", project);
    }
    Ok(url)
}

fn interpret(status: u16, body: &str) -> Result<AiChatResponse, AiError> {
    if status >= 400 {
        return Err(AiError::UpstreamStatus {
            status,
            body: body.to_string(),
        });
    }
    if body.is_empty() {
        return Err(AiError::EmptyBody);
    }
    let raw: Value = serde_json::from_str(body).map_err(|_| AiError::InvalidJson)?;
    Ok(AiChatResponse::from_upstream(raw))
}
