//! Odds types and error definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::odds::dates::parse_query_date;

/// Body of `POST /odds/prices`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsPricesRequest {
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,

    /// Keep only rows for this venue (case-insensitive).
    #[serde(default)]
    pub track: Option<String>,

    /// Keep only rows for this race.
    #[serde(default, alias = "race_number")]
    pub race_number: Option<i64>,
}

/// A validated odds query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsQuery {
    pub date: NaiveDate,
    pub track: Option<String>,
    pub race_number: Option<i64>,
}

impl OddsQuery {
    /// Validate a client request. Blank track filters are ignored.
    pub fn from_request(request: &OddsPricesRequest) -> OddsResult<Self> {
        Ok(Self {
            date: parse_query_date(&request.date)?,
            track: request.track.clone().filter(|t| !t.trim().is_empty()),
            race_number: request.race_number,
        })
    }

    /// Whether a normalized row passes the optional filters.
    pub fn matches(&self, row: &CanonicalOddsRow) -> bool {
        if let Some(race) = self.race_number {
            if row.race_number != race {
                return false;
            }
        }
        if let Some(track) = &self.track {
            match &row.track {
                Some(t) if t.eq_ignore_ascii_case(track.trim()) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Fixed client-facing row, independent of upstream field naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalOddsRow {
    pub track: Option<String>,
    pub race_number: i64,
    pub tab_number: i64,
    pub horse_name: Option<String>,
    pub ai_price: Option<f64>,
    pub tab_price: Option<f64>,
    pub rank: Option<i64>,
}

/// Result of one upstream call for one date variant.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamAttemptOutcome {
    Success { status: u16, payload: serde_json::Value },
    Timeout,
    TransportError(String),
    HttpError { status: u16, body: String },
    MalformedPayload(String),
}

impl UpstreamAttemptOutcome {
    /// Short label used for log fields and metric labels.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Timeout => "timeout",
            Self::TransportError(_) => "transport_error",
            Self::HttpError { .. } => "http_error",
            Self::MalformedPayload(_) => "malformed_payload",
        }
    }

    /// HTTP status of the upstream reply, when one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } | Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable reason for a failed attempt.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::Timeout => Some("upstream timed out".to_string()),
            Self::TransportError(cause) => Some(format!("transport error: {}", cause)),
            Self::HttpError { status, .. } => Some(format!("upstream returned HTTP {}", status)),
            Self::MalformedPayload(reason) => Some(format!("malformed payload: {}", reason)),
        }
    }
}

/// Errors surfaced by the odds route.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OddsError {
    /// The client sent something that is not a calendar date.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The odds upstream is not configured.
    #[error("{0} not configured")]
    Misconfigured(&'static str),

    /// Every date variant failed and the policy is fail-closed.
    #[error("Odds upstream unavailable after {attempts} attempts: {last_failure}")]
    UpstreamExhausted { attempts: usize, last_failure: String },
}

/// Result type for odds operations.
pub type OddsResult<T> = Result<T, OddsError>;
