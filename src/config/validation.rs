//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, connect below read)
//! - Keep the whole-request deadline above every upstream budget, so upstream
//!   failures are settled by the odds policy instead of a bare timeout
//! - Check that configured URLs and addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Absent secrets are not errors here; routes report them per request

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;
use crate::odds::VARIANT_COUNT;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be > 0"));
    }

    check_url("ai.base_url", config.ai.base_url.as_deref(), &mut errors);
    check_url("odds.base_url", config.odds.base_url.as_deref(), &mut errors);

    if config.ai.timeout_secs == 0 {
        errors.push(ValidationError::new("ai.timeout_secs", "must be > 0"));
    }
    if config.odds.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("odds.connect_timeout_ms", "must be > 0"));
    }
    if config.odds.read_timeout_ms == 0 {
        errors.push(ValidationError::new("odds.read_timeout_ms", "must be > 0"));
    }
    if config.odds.connect_timeout_ms >= config.odds.read_timeout_ms {
        errors.push(ValidationError::new(
            "odds.connect_timeout_ms",
            "must be lower than odds.read_timeout_ms",
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    let request_ms = config.timeouts.request_secs.saturating_mul(1000);
    let odds_budget_ms = (VARIANT_COUNT as u64).saturating_mul(
        config
            .odds
            .connect_timeout_ms
            .saturating_add(config.odds.read_timeout_ms),
    );
    if request_ms <= odds_budget_ms {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "{}ms must exceed the odds budget of {}ms ({} attempts of connect + read)",
                request_ms, odds_budget_ms, VARIANT_COUNT
            ),
        ));
    }
    if config.ai.timeout_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!("must exceed ai.timeout_secs ({}s)", config.ai.timeout_secs),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: Option<&str>, errors: &mut Vec<ValidationError>) {
    let Some(raw) = value else {
        return;
    };
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", parsed.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}
