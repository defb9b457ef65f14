//! Credential-hiding gateway for the racing app's AI and odds upstreams.

pub mod ai;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod odds;
pub mod resilience;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
