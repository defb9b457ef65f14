//! Timeout enforcement for upstream calls.
//!
//! # Responsibilities
//! - Build the shared outbound clients with explicit deadlines
//! - Keep connect and read deadlines distinct for the odds upstream
//!
//! # Design Decisions
//! - Every external call has a deadline; there is no unbounded client
//! - Timeout errors stay distinguishable (`reqwest::Error::is_timeout`)
//! - Dropping the request future cancels the call and frees its connection

use std::time::Duration;

use crate::config::{AiUpstreamConfig, OddsUpstreamConfig};

/// Connect and read deadlines for one upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl UpstreamTimeouts {
    pub fn for_odds(config: &OddsUpstreamConfig) -> Self {
        Self {
            connect: Duration::from_millis(config.connect_timeout_ms),
            read: Duration::from_millis(config.read_timeout_ms),
        }
    }

    pub fn for_ai(config: &AiUpstreamConfig) -> Self {
        let total = Duration::from_secs(config.timeout_secs);
        Self {
            connect: total.min(Duration::from_secs(10)),
            read: total,
        }
    }

    /// Build a pooled client enforcing these deadlines.
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .connect_timeout(self.connect)
            .timeout(self.read)
            .pool_max_idle_per_host(8)
            .user_agent(concat!("race-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}
