//! AI chat types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Body of `POST /ai/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiChatRequest {
    #[serde(alias = "assistant_id")]
    pub assistant_id: String,

    #[serde(default, alias = "project_id")]
    pub project_id: Option<String>,

    pub prompt: String,

    /// Free-form context (meeting, track, race number, ...).
    #[serde(default)]
    pub context: Option<Map<String, Value>>,
}

/// Payload sent to the AI upstream.
#[derive(Debug, Serialize)]
pub(crate) struct UpstreamChatPayload<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a Map<String, Value>>,
}

/// Client-facing chat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiChatResponse {
    /// Text answer, `""` when the upstream sent none.
    pub response: String,
    /// Full upstream JSON.
    pub raw: Value,
}

impl AiChatResponse {
    pub fn from_upstream(raw: Value) -> Self {
        let response = raw
            .get("response")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { response, raw }
    }
}

/// Errors from the AI chat pass-through.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0} not configured")]
    Misconfigured(&'static str),

    #[error("AI upstream error: {0}")]
    Transport(String),

    /// Upstream answered with an error status; forwarded verbatim.
    #[error("{}", status_detail(.body))]
    UpstreamStatus { status: u16, body: String },

    #[error("Empty response from AI upstream")]
    EmptyBody,

    #[error("Invalid JSON from AI upstream")]
    InvalidJson,
}

fn status_detail(body: &str) -> &str {
    if body.is_empty() {
        "AI upstream error"
    } else {
        body
    }
}
