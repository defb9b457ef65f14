//! Upstream payload → canonical rows.
//!
//! The odds provider has shipped several row schemas over time. Rather than
//! one struct per schema, each canonical field carries the list of upstream
//! keys it may arrive under; the first present, non-null key wins.

use serde_json::{Map, Value};

use crate::odds::types::CanonicalOddsRow;

/// Upstream keys per canonical field, in priority order.
pub struct FieldAliases {
    pub race_number: &'static [&'static str],
    pub tab_number: &'static [&'static str],
    pub track: &'static [&'static str],
    pub horse_name: &'static [&'static str],
    pub ai_price: &'static [&'static str],
    pub tab_price: &'static [&'static str],
    pub rank: &'static [&'static str],
}

pub const FIELD_ALIASES: FieldAliases = FieldAliases {
    race_number: &["raceNo", "raceNumber"],
    tab_number: &["tabNo", "tabNumber"],
    track: &["venue", "track"],
    horse_name: &["horseName", "runnerName", "name"],
    ai_price: &["aiPrice", "price"],
    tab_price: &["tabPrice", "tabCurrentPrice"],
    rank: &["rank"],
};

/// Keys probed, in order, when the payload is a wrapping object.
const WRAPPER_KEYS: &[&str] = &["rows", "prices"];

/// Normalize a decoded upstream payload. Never fails: unusable shapes and
/// rows simply contribute nothing.
pub fn normalize_rows(payload: &Value) -> Vec<CanonicalOddsRow> {
    let Some(rows) = row_collection(payload) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;
    for element in rows {
        match element.as_object().and_then(normalize_row) {
            Some(row) => out.push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(kept = out.len(), dropped, "Dropped unusable odds rows");
    }
    out
}

fn row_collection(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(rows) => Some(rows),
        Value::Object(obj) => {
            let found = WRAPPER_KEYS
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_array));
            if found.is_none() {
                tracing::debug!(
                    keys = ?obj.keys().take(8).collect::<Vec<_>>(),
                    "Odds payload object has no row list"
                );
            }
            found
        }
        other => {
            tracing::warn!(shape = json_kind(other), "Unexpected odds payload shape");
            None
        }
    }
}

fn normalize_row(obj: &Map<String, Value>) -> Option<CanonicalOddsRow> {
    let aliases = &FIELD_ALIASES;
    Some(CanonicalOddsRow {
        race_number: lookup(obj, aliases.race_number).and_then(as_int)?,
        tab_number: lookup(obj, aliases.tab_number).and_then(as_int)?,
        track: lookup(obj, aliases.track).and_then(as_text),
        horse_name: lookup(obj, aliases.horse_name).and_then(as_text),
        ai_price: lookup(obj, aliases.ai_price).and_then(as_decimal),
        tab_price: lookup(obj, aliases.tab_price).and_then(as_decimal),
        rank: lookup(obj, aliases.rank).and_then(as_int),
    })
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
