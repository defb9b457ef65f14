//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, auth, metrics)
//! - Bind server to listener
//! - Shut down gracefully on signal or coordinator trigger

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::ai::AiClient;
use crate::config::GatewayConfig;
use crate::http::chat::ai_chat;
use crate::http::health::health;
use crate::http::middleware::{render_layer_errors, require_app_token, track_metrics};
use crate::http::odds::odds_prices;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::ApiError;
use crate::lifecycle::signals::shutdown_signal;
use crate::odds::OddsProxy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub odds: Arc<OddsProxy>,
    pub ai: Arc<AiClient>,
}

impl AppState {
    /// Build the production state: HTTP-backed upstream clients.
    pub fn from_config(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let odds = OddsProxy::from_config(&config.odds)?;
        let ai = AiClient::from_config(&config.ai)?;
        Ok(Self {
            config: Arc::new(config),
            odds: Arc::new(odds),
            ai: Arc::new(ai),
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_state(AppState::from_config(config)?))
    }

    /// Create a server around prebuilt state (e.g. fake upstreams).
    pub fn with_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            odds_configured = self.state.odds.ensure_configured().is_ok(),
            odds_policy = ?self.state.odds.policy(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => tracing::info!("Shutdown triggered"),
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.state.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let protected = Router::new()
        .route("/ai/chat", post(ai_chat))
        .route("/odds/prices", post(odds_prices))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_app_token));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .route_layer(middleware::from_fn(track_metrics))
        .fallback(|| async { ApiError::NotFound })
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
        .layer(middleware::from_fn(render_layer_errors))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(set_request_id_layer())
}
