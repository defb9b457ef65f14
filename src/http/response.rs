//! Client-facing error responses.
//!
//! # Responsibilities
//! - Map subsystem errors to HTTP status codes
//! - Render every failure as `{"detail": "..."}`, never a raw trace
//!
//! # Design Decisions
//! - Odds upstream failures only reach this point under the fail-closed policy
//! - AI upstream error statuses pass through unchanged

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ai::AiError;
use crate::odds::OddsError;

/// Every error a handler or middleware can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed client input.
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid app token")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// The whole-request deadline elapsed.
    #[error("Request timed out")]
    RequestTimeout,

    /// A secret or URL the route needs is absent.
    #[error("{0} not configured")]
    Misconfigured(&'static str),

    #[error("{0}")]
    BadGateway(String),

    /// Upstream status forwarded verbatim.
    #[error("{detail}")]
    Upstream { status: u16, detail: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %self, "Request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl From<OddsError> for ApiError {
    fn from(err: OddsError) -> Self {
        match err {
            OddsError::InvalidDate(_) => ApiError::BadRequest(err.to_string()),
            OddsError::Misconfigured(name) => ApiError::Misconfigured(name),
            OddsError::UpstreamExhausted { .. } => ApiError::BadGateway(err.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            AiError::Misconfigured(name) => ApiError::Misconfigured(name),
            AiError::UpstreamStatus { status, .. } => ApiError::Upstream {
                status,
                detail: err.to_string(),
            },
            AiError::Transport(_) | AiError::EmptyBody | AiError::InvalidJson => {
                ApiError::BadGateway(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odds_error_mapping() {
        let err: ApiError = OddsError::InvalidDate("x".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = OddsError::Misconfigured("ODDS_BASE_URL").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "ODDS_BASE_URL not configured");

        let err: ApiError = OddsError::UpstreamExhausted {
            attempts: 2,
            last_failure: "upstream timed out".into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_ai_error_mapping() {
        let err: ApiError = AiError::UpstreamStatus { status: 429, body: "slow down".into() }.into();
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.to_string(), "slow down");

        let err: ApiError = AiError::EmptyBody.into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = AiError::InvalidRequest("assistantId must not be empty".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_upstream_status_becomes_bad_gateway() {
        let err = ApiError::Upstream { status: 1000, detail: "?".into() };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
