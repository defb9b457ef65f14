//! Per-route request metrics.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = route_label(request.extensions().get::<MatchedPath>().map(MatchedPath::as_str));

    let response = next.run(request).await;
    metrics::record_request(route, response.status().as_u16(), start);
    response
}

/// Bounded label set: unknown paths collapse into one series.
fn route_label(matched: Option<&str>) -> &'static str {
    match matched {
        Some("/health") => "/health",
        Some("/ai/chat") => "/ai/chat",
        Some("/odds/prices") => "/odds/prices",
        _ => "other",
    }
}
