//! JSON bodies for responses produced by tower-http layers.
//!
//! `TimeoutLayer` answers 408 with an empty body and `RequestBodyLimitLayer`
//! answers 413 in plain text. Clients always get `{"detail": ...}`.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::RequestId;
use crate::http::response::ApiError;

pub async fn render_layer_errors(request: Request<Body>, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    match response.status() {
        StatusCode::REQUEST_TIMEOUT => {
            tracing::warn!(request_id = %request_id.as_str(), path = %path, "Request deadline exceeded");
            ApiError::RequestTimeout.into_response()
        }
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge.into_response(),
        _ => response,
    }
}
