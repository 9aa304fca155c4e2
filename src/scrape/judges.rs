// src/scrape/judges.rs
use std::path::PathBuf;

use chrono::NaiveDateTime;

use super::pool;
use crate::{
    config::consts::{DECISIONS_BY_EVENT, UFCSTATS_COMPLETED},
    config::options::{ScrapeOptions, year_range},
    core::net::{self, PageFetch},
    error::{Result, ScrapeError},
    file,
    matching::match_judges_event,
    progress::Progress,
    specs::{
        decisions::{self, JudgeEvent},
        events::{self, EventRow},
    },
};

/// UFCStats completed events for matching. A failed listing only costs the ids.
fn ufc_events() -> Vec<EventRow> {
    match events::fetch(UFCSTATS_COMPLETED) {
        Ok(rows) => rows,
        Err(e) => {
            logw!("Judges: UFCStats listing unavailable, events stay unmatched: {e}");
            Vec::new()
        }
    }
}

/// One mmadecisions event with every scored fight, tagged with its UFCStats id.
pub fn scrape_event(
    get: &PageFetch,
    url: &str,
    ufc: &[EventRow],
    opts: &ScrapeOptions,
    progress: &mut dyn Progress,
) -> Result<JudgeEvent> {
    let (event_details, fight_urls) = decisions::fetch_event(get, url)?;
    progress.log(&format!("{} ({} fights)", event_details.name, fight_urls.len()));

    let fights = pool::collect(
        &fight_urls,
        |u| s!(u),
        |u| decisions::fetch_fight(get, u),
        opts.pool(),
        progress,
    )
    .into_iter()
    .flatten()
    .collect();

    let mut event = JudgeEvent {
        event_url: s!(url),
        event_details,
        event_id: None,
        fights,
    };
    event.event_id = match_judges_event(&event, ufc).map(|(id, _)| id);
    Ok(event)
}

/// The first event on the decisions index, written to
/// `<judging dir>/<timestamp>/latest_event.json`.
pub fn latest(opts: &ScrapeOptions, now: NaiveDateTime, progress: &mut dyn Progress) -> Result<PathBuf> {
    let get: &PageFetch = &net::http_get;
    let urls = decisions::fetch_index(get, DECISIONS_BY_EVENT)?;
    let url = urls
        .first()
        .ok_or_else(|| ScrapeError::NoEvents(s!(DECISIONS_BY_EVENT)))?;

    let event = scrape_event(get, url, &ufc_events(), opts, progress)?;
    let path = file::timestamp_dir(&opts.judging_dir(), now).join("latest_event.json");
    file::write_json(&path, &event)?;
    logf!("Judges: latest event → {}", path.display());
    Ok(path)
}

/// Every event from `start` down to `end` (inclusive, either order), written
/// as one JSON array to `<judging dir>/<timestamp>/<start>_<end>.json`.
pub fn range(
    start: i32,
    end: i32,
    opts: &ScrapeOptions,
    now: NaiveDateTime,
    progress: &mut dyn Progress,
) -> Result<PathBuf> {
    let events = collect_range(&net::http_get, &ufc_events(), start, end, opts, progress);
    let path = file::timestamp_dir(&opts.judging_dir(), now).join(format!("{start}_{end}.json"));
    file::write_json(&path, &events)?;
    logf!("Judges: {} events ({start}..{end}) → {}", events.len(), path.display());
    Ok(path)
}

/// Events of the year pages `start` down to `end`, newest year first.
/// A year page or event that fails is logged, reported and skipped.
pub fn collect_range(
    get: &PageFetch,
    ufc: &[EventRow],
    start: i32,
    end: i32,
    opts: &ScrapeOptions,
    progress: &mut dyn Progress,
) -> Vec<JudgeEvent> {
    let mut all = Vec::new();

    for year in year_range(start, end) {
        progress.log(&format!("Year {year}"));
        let urls = match decisions::fetch_index(get, &decisions::year_url(year)) {
            Ok(u) => u,
            Err(e) => {
                loge!("Judges: year {year} skipped: {e}");
                progress.item_failed(&format!("year {year}"), &e.to_string());
                continue;
            }
        };

        for url in &urls {
            match scrape_event(get, url, ufc, opts, progress) {
                Ok(ev) => all.push(ev),
                Err(e) => {
                    loge!("Judges: event {url} skipped: {e}");
                    progress.item_failed(url, &e.to_string());
                }
            }
        }
    }
    all
}
