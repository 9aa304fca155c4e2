// src/scrape/odds.rs
//! The Odds API collectors: a live listener, historical event references
//! per UFCStats event, and closing lines for those references.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};

use super::wait;
use crate::{
    config::consts::{ODDS_API_PAUSE_MS, ODDS_REGIONS, REFERENCES_FILE, UFCSTATS_COMPLETED},
    config::options::ScrapeOptions,
    core::net::{self, JsonFetch},
    error::Result,
    file,
    progress::Progress,
    specs::{
        events::{self, EventRow},
        odds::{self, OddsReference, OddsSnapshot, SnapshotWindow},
    },
};

type Query = Vec<(&'static str, String)>;

pub fn live_query(key: &str) -> Query {
    vec![
        ("apiKey", s!(key)),
        ("regions", s!(ODDS_REGIONS)),
        ("markets", s!("h2h")),
        ("dateFormat", s!("iso")),
        ("oddsFormat", s!("decimal")),
        ("includeLinks", s!("true")),
        ("includeSids", s!("true")),
        ("includeBetLimits", s!("true")),
    ]
}

pub fn references_query(key: &str, window: &SnapshotWindow) -> Query {
    vec![
        ("apiKey", s!(key)),
        ("dateFormat", s!("iso")),
        ("commenceTimeFrom", window.commence_from.clone()),
        ("commenceTimeTo", window.commence_to.clone()),
        ("date", window.date.clone()),
    ]
}

/// `date` is the reference's `YYYY-MM-DDT00:00:00`; the API wants it in UTC.
pub fn closing_query(key: &str, date: &str, event_ids: &[String]) -> Query {
    vec![
        ("apiKey", s!(key)),
        ("dateFormat", s!("iso")),
        ("regions", s!(ODDS_REGIONS)),
        ("oddsFormat", s!("decimal")),
        ("markets", s!("h2h,spreads")),
        ("eventIds", event_ids.join(",")),
        ("date", join!(date, "Z")),
    ]
}

fn pause() {
    thread::sleep(Duration::from_millis(ODDS_API_PAUSE_MS));
}

/// Poll live odds every `interval` and append one snapshot per line to `out`.
/// Runs until `stop` is raised or `max_polls` polls were made. A failed poll
/// is logged and skipped. Returns the number of snapshots written.
pub fn live(
    key: &str,
    out: &Path,
    interval: Duration,
    max_polls: Option<usize>,
    stop: &AtomicBool,
    progress: &mut dyn Progress,
) -> Result<usize> {
    poll_live(&net::get_json, key, out, interval, max_polls, stop, progress)
}

/// [`live`] over any JSON source.
pub fn poll_live(
    get: &JsonFetch,
    key: &str,
    out: &Path,
    interval: Duration,
    max_polls: Option<usize>,
    stop: &AtomicBool,
    progress: &mut dyn Progress,
) -> Result<usize> {
    let url = odds::live_odds_url();
    let query = live_query(key);
    let mut polls = 0;
    let mut written = 0;

    progress.log("Live odds listener started; Ctrl-C to stop");
    while !stop.load(Ordering::Relaxed) && max_polls.is_none_or(|max| polls < max) {
        if polls > 0 && wait(interval, stop) {
            break;
        }
        polls += 1;
        match get(&url, &query) {
            Ok(live_odds) => {
                let snap = OddsSnapshot { timestamp: odds::snapshot_timestamp(Utc::now()), live_odds };
                file::append_jsonl(out, &snap)?;
                written += 1;
                progress.log(&format!("Recorded live odds at {}", snap.timestamp));
            }
            Err(e) => {
                loge!("Odds: live poll failed: {e}");
                progress.item_failed("live poll", &e.to_string());
            }
        }
    }

    logf!("Odds: listener stopped after {polls} polls, {written} snapshots → {}", out.display());
    Ok(written)
}

/// Listing rows that have already taken place, with their dates. The
/// highlighted next card and anything dated after `today` are left out.
pub fn reference_rows(rows: &[EventRow], today: NaiveDate) -> Vec<(&EventRow, NaiveDate)> {
    rows.iter()
        .filter(|r| !r.next_event)
        .filter_map(|r| r.date.filter(|d| *d <= today).map(|d| (r, d)))
        .collect()
}

/// For each completed UFCStats event, the historical event listing around
/// its date, appended as one `OddsReference` per object.
pub fn references(
    key: &str,
    opts: &ScrapeOptions,
    today: NaiveDate,
    progress: &mut dyn Progress,
) -> Result<PathBuf> {
    let out = opts.odds_dir().join(REFERENCES_FILE);
    let rows = events::fetch(UFCSTATS_COMPLETED)?;
    let url = odds::historical_events_url();

    let dated = reference_rows(&rows, today);
    progress.begin(dated.len());
    for (row, day) in dated {
        progress.log(&format!("{} on {day}", row.name));
        let response = match net::get_json(&url, &references_query(key, &odds::snapshot_window(day))) {
            Ok(v) => Some(v),
            Err(e) => {
                loge!("Odds: references for {} failed: {e}", row.id);
                progress.item_failed(&row.name, &e.to_string());
                None
            }
        };

        let reference = OddsReference {
            event_id: row.id.clone(),
            name: row.name.clone(),
            date: odds::reference_date(day),
            response,
        };
        file::append_pretty(&out, &reference)?;
        progress.item_done(&row.name);
        pause();
    }
    progress.finish();

    logf!("Odds: references → {}", out.display());
    Ok(out)
}

/// Closing lines for every reference in `input`. `output` is emptied first;
/// a failed request is written as `{}` so lines stay aligned with the input.
pub fn closing(key: &str, input: &Path, output: &Path, progress: &mut dyn Progress) -> Result<usize> {
    let references = odds::parse_concatenated(&file::read_text(input)?);
    file::truncate(output)?;
    let url = odds::historical_odds_url();

    progress.begin(references.len());
    for (i, reference) in references.iter().enumerate() {
        let label = format!("event #{}", i + 1);
        let ids = odds::reference_event_ids(reference);
        let date = reference.get("date").and_then(Value::as_str).unwrap_or_default();

        let result = match net::get_json(&url, &closing_query(key, date, &ids)) {
            Ok(v) => {
                progress.item_done(&label);
                v
            }
            Err(e) => {
                loge!("Odds: closing lines for {label} ({date}) failed: {e}");
                progress.item_failed(&label, &e.to_string());
                json!({})
            }
        };
        file::append_pretty(output, &result)?;
        pause();
    }
    progress.finish();

    logf!("Odds: {} closing records → {}", references.len(), output.display());
    Ok(references.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(q: &'a Query, k: &str) -> Option<&'a str> {
        q.iter().find(|(key, _)| *key == k).map(|(_, v)| v.as_str())
    }

    #[test]
    fn closing_query_appends_utc_marker_and_joins_ids() {
        let q = closing_query("k", "2024-03-01T00:00:00", &svec!["a", "b"]);
        assert_eq!(get(&q, "date"), Some("2024-03-01T00:00:00Z"));
        assert_eq!(get(&q, "eventIds"), Some("a,b"));
        assert_eq!(get(&q, "markets"), Some("h2h,spreads"));
    }

    #[test]
    fn live_query_flags() {
        let q = live_query("k");
        assert_eq!(get(&q, "regions"), Some("us,us2"));
        assert_eq!(get(&q, "oddsFormat"), Some("decimal"));
        assert_eq!(get(&q, "includeBetLimits"), Some("true"));
    }
}
