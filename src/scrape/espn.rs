// src/scrape/espn.rs
//! ESPN fight-center collectors: one event, the current card, whole years of
//! cards, and a live listener on the current card.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use chrono::{NaiveDateTime, Utc};

use super::{pool, wait};
use crate::{
    config::consts::ESPN_FIGHTCENTER,
    config::options::{ScrapeOptions, year_range},
    core::net::{self, PageFetch},
    error::Result,
    file,
    progress::Progress,
    specs::{
        espn::{self, EspnEvent, EspnSnapshot},
        odds::snapshot_timestamp,
    },
};

/// One card by ESPN event id, written to `<espn dir>/<id>.json`.
pub fn event(id: &str, opts: &ScrapeOptions) -> Result<PathBuf> {
    let event = espn::fetch_event(&net::http_get, &espn::fightcenter_url(id))?;
    let path = file::write_json(&opts.espn_dir().join(format!("{id}.json")), &event)?;
    logf!("ESPN: event {id}, {} fights → {}", event.fights.len(), path.display());
    Ok(path)
}

/// The card the fight center opens on, written to
/// `<espn dir>/<timestamp>/latest_event.json`.
pub fn latest(opts: &ScrapeOptions, now: NaiveDateTime, progress: &mut dyn Progress) -> Result<PathBuf> {
    let event = espn::fetch_event(&net::http_get, ESPN_FIGHTCENTER)?;
    progress.log(&format!("{} fights on the current card", event.fights.len()));
    let path = file::timestamp_dir(&opts.espn_dir(), now).join("latest_event.json");
    file::write_json(&path, &event)?;
    logf!("ESPN: latest card → {}", path.display());
    Ok(path)
}

/// Every card listed from year `start` to `end` (either order), written as one
/// JSON array to `<espn dir>/<timestamp>/<start>_<end>.json`.
pub fn historical(
    start: i32,
    end: i32,
    opts: &ScrapeOptions,
    now: NaiveDateTime,
    progress: &mut dyn Progress,
) -> Result<PathBuf> {
    let events = collect_years(&net::http_get, start, end, opts, progress);
    let path = file::timestamp_dir(&opts.espn_dir(), now).join(format!("{start}_{end}.json"));
    file::write_json(&path, &events)?;
    logf!("ESPN: {} cards ({start}..{end}) → {}", events.len(), path.display());
    Ok(path)
}

/// Cards of the year pages `start` to `end`, newest year first. A year page
/// or card that fails is logged, reported and skipped.
pub fn collect_years(
    get: &PageFetch,
    start: i32,
    end: i32,
    opts: &ScrapeOptions,
    progress: &mut dyn Progress,
) -> Vec<EspnEvent> {
    let mut all = Vec::new();

    for year in year_range(start, end) {
        progress.log(&format!("Year {year}"));
        let urls = match espn::fetch_event_links(get, &espn::year_url(year)) {
            Ok(u) => u,
            Err(e) => {
                loge!("ESPN: year {year} skipped: {e}");
                progress.item_failed(&format!("year {year}"), &e.to_string());
                continue;
            }
        };

        all.extend(pool::collect(&urls, |u| s!(u), |u| espn::fetch_event(get, u), opts.pool(), progress));
    }
    all
}

/// Reload the fight center every `interval` and append the parsed card to
/// `out`, one snapshot per line. Same stop rules as the odds listener.
pub fn live(
    url: &str,
    out: &Path,
    interval: Duration,
    max_polls: Option<usize>,
    stop: &AtomicBool,
    progress: &mut dyn Progress,
) -> Result<usize> {
    poll_live(&net::http_get, url, out, interval, max_polls, stop, progress)
}

/// [`live`] over any page source.
pub fn poll_live(
    get: &PageFetch,
    url: &str,
    out: &Path,
    interval: Duration,
    max_polls: Option<usize>,
    stop: &AtomicBool,
    progress: &mut dyn Progress,
) -> Result<usize> {
    let mut polls = 0;
    let mut written = 0;

    progress.log("Fight center listener started; Ctrl-C to stop");
    while !stop.load(Ordering::Relaxed) && max_polls.is_none_or(|max| polls < max) {
        if polls > 0 && wait(interval, stop) {
            break;
        }
        polls += 1;
        match espn::fetch_event(get, url) {
            Ok(event) => {
                let snap = EspnSnapshot { timestamp: snapshot_timestamp(Utc::now()), fights: event.fights };
                file::append_jsonl(out, &snap)?;
                written += 1;
                progress.log(&format!("Recorded {} bouts at {}", snap.fights.len(), snap.timestamp));
            }
            Err(e) => {
                loge!("ESPN: live poll failed: {e}");
                progress.item_failed("live poll", &e.to_string());
            }
        }
    }

    logf!("ESPN: listener stopped after {polls} polls, {written} snapshots → {}", out.display());
    Ok(written)
}
