//! Shared-secret authentication.
//! Every protected route requires `x-app-token` to equal the configured secret.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::RequestId;
use crate::http::response::ApiError;
use crate::http::server::AppState;

pub const APP_TOKEN_HEADER: &str = "x-app-token";

pub async fn require_app_token(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = state
        .config
        .auth
        .app_token
        .as_deref()
        .ok_or(ApiError::Misconfigured("Gateway APP_TOKEN"))?;

    let presented = request.headers().get(APP_TOKEN_HEADER);
    let header_present = presented.is_some();
    let authorized =
        presented.is_some_and(|token| constant_time_eq(token.as_bytes(), expected.as_bytes()));

    if authorized {
        return Ok(next.run(request).await);
    }

    tracing::warn!(
        request_id = %RequestId::from_headers(request.headers()).as_str(),
        path = %request.uri().path(),
        header_present,
        "Rejected app token"
    );
    Err(ApiError::Unauthorized)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
