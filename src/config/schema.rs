//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Shared-secret client authentication.
    pub auth: AuthConfig,

    /// Conversational-AI upstream.
    pub ai: AiUpstreamConfig,

    /// Odds-data upstream.
    pub odds: OddsUpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 256 * 1024,
        }
    }
}

/// Client authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret every client must present in `x-app-token`.
    /// `None` makes every protected route answer 500.
    pub app_token: Option<String>,
}

/// Conversational-AI upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AiUpstreamConfig {
    /// Base URL; the assistant id is appended as the last path segment.
    pub base_url: Option<String>,

    /// Key injected as `X-API-Key`.
    pub api_key: Option<String>,

    /// Total timeout for one chat call in seconds.
    pub timeout_secs: u64,
}

impl Default for AiUpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// What the odds route returns once every date variant has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustedPolicy {
    /// Answer with an empty row collection.
    #[default]
    Degrade,
    /// Answer 502 with the last upstream failure.
    FailClosed,
}

impl std::str::FromStr for ExhaustedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "fail_closed" | "fail-closed" => Ok(Self::FailClosed),
            other => Err(format!("unknown exhausted policy '{}'", other)),
        }
    }
}

/// Odds-data upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OddsUpstreamConfig {
    /// Endpoint queried with `meetingDate` and `apikey`.
    pub base_url: Option<String>,

    /// Key sent as the `apikey` query parameter.
    pub api_key: Option<String>,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Timeout for the whole attempt once connected, in milliseconds.
    pub read_timeout_ms: u64,

    /// Behaviour once both date variants fail.
    pub exhausted_policy: ExhaustedPolicy,
}

impl Default for OddsUpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            connect_timeout_ms: 3_000,
            read_timeout_ms: 10_000,
            exhausted_policy: ExhaustedPolicy::Degrade,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 45 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Formatter for log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
