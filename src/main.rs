//! Race gateway
//!
//! Sits between the mobile app and two third-party upstreams, keeping their
//! keys server-side.
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                 RACE GATEWAY                  │
//!   Mobile app         │  ┌──────────┐   ┌───────────┐                 │
//!   x-app-token ───────┼─▶│ request  │──▶│ app token │──┐              │
//!                      │  │ id/trace │   │   gate    │  │              │
//!                      │  └──────────┘   └───────────┘  │              │
//!                      │         ┌──────────────────────┼───────┐      │
//!                      │         ▼                      ▼       │      │
//!                      │  ┌─────────────┐   ┌─────────────────┐ │      │
//!                      │  │  /ai/chat   │   │  /odds/prices   │ │      │
//!                      │  │ pass-through│   │ date variants + │ │      │
//!                      │  │ + X-API-Key │   │ normalization   │ │      │
//!                      │  └──────┬──────┘   └────────┬────────┘ │      │
//!                      └─────────┼───────────────────┼──────────┘──────┘
//!                                ▼                   ▼
//!                           AI upstream        odds upstream
//!                                              (?meetingDate=&apikey=)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use race_gateway::config::load_config;
use race_gateway::observability::{logging, metrics};
use race_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "race-gateway", version, about = "Credential-hiding gateway for the AI and odds upstreams")]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("race-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        odds_connect_timeout_ms = config.odds.connect_timeout_ms,
        odds_read_timeout_ms = config.odds.read_timeout_ms,
        app_token_set = config.auth.app_token.is_some(),
        ai_configured = config.ai.base_url.is_some() && config.ai.api_key.is_some(),
        odds_configured = config.odds.base_url.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
