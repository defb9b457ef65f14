//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {message}")]
    Env { var: &'static str, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the optional TOML file, then the
/// process environment. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`. Empty values count as unset.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("APP_TOKEN") {
        config.auth.app_token = Some(v);
    }
    if let Some(v) = get("AI_BASE_URL") {
        config.ai.base_url = Some(v);
    }
    if let Some(v) = get("AI_API_KEY") {
        config.ai.api_key = Some(v);
    }
    if let Some(v) = get("ODDS_BASE_URL") {
        config.odds.base_url = Some(v);
    }
    if let Some(v) = get("ODDS_API_KEY") {
        config.odds.api_key = Some(v);
    }
    if let Some(v) = get("ODDS_EXHAUSTED_POLICY") {
        config.odds.exhausted_policy = v.parse().map_err(|message| ConfigError::Env {
            var: "ODDS_EXHAUSTED_POLICY",
            message,
        })?;
    }
    if let Some(v) = get("ODDS_CONNECT_TIMEOUT_MS") {
        config.odds.connect_timeout_ms = parse_number("ODDS_CONNECT_TIMEOUT_MS", &v)?;
    }
    if let Some(v) = get("ODDS_READ_TIMEOUT_MS") {
        config.odds.read_timeout_ms = parse_number("ODDS_READ_TIMEOUT_MS", &v)?;
    }
    if let Some(v) = get("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = get("LOG_FORMAT") {
        config.observability.log_format = match v.trim().to_ascii_lowercase().as_str() {
            "json" => crate::config::LogFormat::Json,
            "pretty" => crate::config::LogFormat::Pretty,
            other => {
                return Err(ConfigError::Env {
                    var: "LOG_FORMAT",
                    message: format!("expected 'pretty' or 'json', got '{}'", other),
                })
            }
        };
    }
    if let Some(v) = get("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse_flag("METRICS_ENABLED", &v)?;
    }
    if let Some(v) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = v;
    }

    Ok(())
}

fn parse_number(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::Env {
        var,
        message: format!("'{}': {}", raw, e),
    })
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Env {
            var,
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}
