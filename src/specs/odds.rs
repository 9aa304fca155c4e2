// src/specs/odds.rs
//! The Odds API (v4) shapes. Responses are kept as raw JSON; only the bits the
//! collectors route on (event ids, dates) are read.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::consts::{ODDS_API_BASE, ODDS_SPORT};

const STAMP: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One line of the live odds log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OddsSnapshot {
    /// UTC, `%Y-%m-%dT%H:%M:%SZ`
    pub timestamp: String,
    pub live_odds: Value,
}

/// Historical event listing captured around one UFCStats event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OddsReference {
    pub event_id: String,
    pub name: String,
    /// Event day as `YYYY-MM-DDT00:00:00`.
    pub date: String,
    /// `null` when the request failed.
    pub response: Option<Value>,
}

/// Query window for the historical events endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotWindow {
    pub date: String,
    pub commence_from: String,
    pub commence_to: String,
}

pub fn live_odds_url() -> String {
    format!("{ODDS_API_BASE}/sports/{ODDS_SPORT}/odds")
}

pub fn historical_events_url() -> String {
    format!("{ODDS_API_BASE}/historical/sports/{ODDS_SPORT}/events")
}

pub fn historical_odds_url() -> String {
    format!("{ODDS_API_BASE}/historical/sports/{ODDS_SPORT}/odds")
}

/// Snapshot at 10:05:00Z on the event day; events commencing from the day
/// before (00:00:00Z) through the day after (23:59:59Z).
pub fn snapshot_window(day: NaiveDate) -> SnapshotWindow {
    let at = |d: NaiveDate, h, m, s| {
        NaiveDateTime::new(d, NaiveTime::from_hms_opt(h, m, s).unwrap_or_default())
            .format(STAMP)
            .to_string()
    };
    SnapshotWindow {
        date: at(day, 10, 5, 0),
        commence_from: at(day - Duration::days(1), 0, 0, 0),
        commence_to: at(day + Duration::days(1), 23, 59, 59),
    }
}

/// `YYYY-MM-DDT00:00:00`, the form stored in [`OddsReference::date`].
pub fn reference_date(day: NaiveDate) -> String {
    NaiveDateTime::new(day, NaiveTime::default()).format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn snapshot_timestamp(now: chrono::DateTime<chrono::Utc>) -> String {
    now.format(STAMP).to_string()
}

/// `response.data[].id` of a stored reference.
pub fn reference_event_ids(reference: &Value) -> Vec<String> {
    reference
        .pointer("/response/data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read back a file of JSON objects written one after another (pretty or
/// compact). Stops at the first malformed object, keeping what came before.
pub fn parse_concatenated(text: &str) -> Vec<Value> {
    let mut out = Vec::new();
    for item in serde_json::Deserializer::from_str(text).into_iter::<Value>() {
        match item {
            Ok(v) => out.push(v),
            Err(e) => {
                loge!("Odds: stopped reading references at line {}: {e}", e.line());
                break;
            }
        }
    }
    out
}
