//! Odds proxy orchestration.
//!
//! # States
//! ```text
//! Idle → TryingVariant(i) → Success        (first parseable JSON body, even with 0 rows)
//!                         → NextVariant    (timeout / transport / HTTP ≥ 400 / bad JSON)
//!                         → Exhausted      (no variant left)
//! Exhausted → [] (degrade) | 502 (fail-closed)
//! ```
//!
//! Attempts are strictly sequential: the second variant is only worth a call
//! once the first has failed structurally.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{ExhaustedPolicy, OddsUpstreamConfig};
use crate::observability::metrics;
use crate::odds::dates::date_variants;
use crate::odds::normalize::normalize_rows;
use crate::odds::types::{
    CanonicalOddsRow, OddsError, OddsPricesRequest, OddsQuery, OddsResult, UpstreamAttemptOutcome,
};
use crate::odds::upstream::{HttpOddsUpstream, OddsUpstream};
use crate::resilience::UpstreamTimeouts;

/// Orchestrates date-variant attempts against the odds upstream.
#[derive(Clone)]
pub struct OddsProxy {
    /// `None` when no odds base URL is configured.
    upstream: Option<Arc<dyn OddsUpstream>>,
    policy: ExhaustedPolicy,
}

impl OddsProxy {
    pub fn new(upstream: Option<Arc<dyn OddsUpstream>>, policy: ExhaustedPolicy) -> Self {
        Self { upstream, policy }
    }

    /// Build the HTTP-backed proxy from configuration.
    pub fn from_config(config: &OddsUpstreamConfig) -> Result<Self, reqwest::Error> {
        let upstream = match config.base_url.as_deref() {
            Some(base_url) => {
                let client = UpstreamTimeouts::for_odds(config).build_client()?;
                let upstream = HttpOddsUpstream::new(client, base_url, config.api_key.clone());
                Some(Arc::new(upstream) as Arc<dyn OddsUpstream>)
            }
            None => None,
        };
        Ok(Self::new(upstream, config.exhausted_policy))
    }

    pub fn policy(&self) -> ExhaustedPolicy {
        self.policy
    }

    /// Fails when no odds base URL is configured.
    pub fn ensure_configured(&self) -> OddsResult<()> {
        self.upstream_ref().map(|_| ())
    }

    fn upstream_ref(&self) -> OddsResult<&dyn OddsUpstream> {
        self.upstream
            .as_deref()
            .ok_or(OddsError::Misconfigured("ODDS_BASE_URL"))
    }

    /// Validate a client request and run the attempt loop.
    pub async fn fetch_prices(
        &self,
        request: &OddsPricesRequest,
        request_id: &str,
    ) -> OddsResult<Vec<CanonicalOddsRow>> {
        let upstream = self.upstream_ref()?;

        let query = OddsQuery::from_request(request)?;

        let rows = self.run(upstream, &query, request_id).await?;
        Ok(rows.into_iter().filter(|row| query.matches(row)).collect())
    }

    async fn run(
        &self,
        upstream: &dyn OddsUpstream,
        query: &OddsQuery,
        request_id: &str,
    ) -> OddsResult<Vec<CanonicalOddsRow>> {
        let variants = date_variants(query.date);
        let mut last_failure = None;

        for (attempt, variant) in variants.iter().enumerate() {
            let started = Instant::now();
            let outcome = upstream.fetch(variant).await;
            let latency_ms = started.elapsed().as_millis() as u64;
            metrics::record_upstream_attempt("odds", outcome.label(), started);

            match outcome {
                UpstreamAttemptOutcome::Success { status, payload } => {
                    let rows = normalize_rows(&payload);
                    tracing::info!(
                        request_id = %request_id,
                        upstream = %upstream.endpoint(),
                        variant = %variant,
                        attempt = attempt + 1,
                        outcome = "success",
                        status,
                        rows = rows.len(),
                        latency_ms,
                        "Odds upstream attempt"
                    );
                    return Ok(rows);
                }
                failure => {
                    let status = failure.status();
                    if let UpstreamAttemptOutcome::HttpError { body, .. } = &failure {
                        tracing::debug!(request_id = %request_id, body = %body, "Odds upstream error body");
                    }
                    let reason = failure.failure_reason().unwrap_or_default();
                    tracing::warn!(
                        request_id = %request_id,
                        upstream = %upstream.endpoint(),
                        variant = %variant,
                        attempt = attempt + 1,
                        outcome = failure.label(),
                        status = ?status,
                        rows = 0,
                        latency_ms,
                        reason = %reason,
                        "Odds upstream attempt failed"
                    );
                    last_failure = Some(reason);
                }
            }
        }

        let last_failure = last_failure.unwrap_or_else(|| "no attempts made".to_string());
        match self.policy {
            ExhaustedPolicy::Degrade => {
                tracing::warn!(
                    request_id = %request_id,
                    attempts = variants.len(),
                    last_failure = %last_failure,
                    "Odds variants exhausted, returning empty result"
                );
                Ok(Vec::new())
            }
            ExhaustedPolicy::FailClosed => {
                tracing::error!(
                    request_id = %request_id,
                    attempts = variants.len(),
                    last_failure = %last_failure,
                    "Odds variants exhausted"
                );
                Err(OddsError::UpstreamExhausted {
                    attempts: variants.len(),
                    last_failure,
                })
            }
        }
    }
}
