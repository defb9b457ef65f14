//! Meeting-date rendering for the odds upstream.
//!
//! The upstream wants `dd-mon-yyyy` and has accepted both `05-dec-2025` and
//! `05-Dec-2025` at different times, so every query produces both forms,
//! lowercase first.

use chrono::NaiveDate;

use crate::odds::types::{OddsError, OddsResult};

/// Number of variants tried per query.
pub const VARIANT_COUNT: usize = 2;

/// Parse a client date in strict `YYYY-MM-DD` form.
pub fn parse_query_date(raw: &str) -> OddsResult<NaiveDate> {
    let trimmed = raw.trim();
    // chrono accepts unpadded fields and signed years; only the canonical form
    // is a valid query.
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == trimmed)
        .ok_or_else(|| OddsError::InvalidDate(raw.to_string()))
}

/// Upstream date strings for `date`, in the order they are attempted.
pub fn date_variants(date: NaiveDate) -> [String; VARIANT_COUNT] {
    let title = date.format("%d-%b-%Y").to_string();
    [title.to_lowercase(), title]
}
