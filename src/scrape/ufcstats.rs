// src/scrape/ufcstats.rs
use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};

use super::pool;
use crate::{
    config::consts::{UFCSTATS_BASE, UFCSTATS_COMPLETED, UFCSTATS_UPCOMING},
    config::options::ScrapeOptions,
    core::sanitize::sanitize_filename,
    error::{Result, ScrapeError},
    file, geo,
    precomp::PrecompTable,
    progress::Progress,
    specs::{
        event::{self, EventRecord},
        events::{self, EventRow},
        fight::{self, FightRecord},
        fighter,
    },
};

pub fn fight_url(id: &str) -> String {
    format!("{UFCSTATS_BASE}/fight-details/{id}")
}

fn load_precomp(opts: &ScrapeOptions) -> Option<PrecompTable> {
    let path = opts.precomp_csv()?;
    match PrecompTable::load(path) {
        Ok(t) => Some(t),
        Err(e) => {
            logw!("Precomp disabled: {e}");
            None
        }
    }
}

/// One fight page plus both fighters' bios and precomp rows.
fn scrape_fight(id: &str, precomp: Option<&PrecompTable>, now: NaiveDateTime) -> Result<FightRecord> {
    let url = fight_url(id);
    let page = fight::fetch(&url)?;

    if page.fighters.len() < 2 {
        return Err(ScrapeError::Missing { what: "fighters", url }.into());
    }

    // a missing bio does not sink the fight
    let view = |i: usize| {
        let corner = &page.fighters[i];
        let bio = match fighter::fetch(&corner.url, now) {
            Ok(b) => Some(b),
            Err(e) => {
                loge!("Fight {id}: bio for {:?} failed: {e}", corner.name);
                None
            }
        };
        let pre = precomp.and_then(|t| t.lookup(&url, &corner.url));
        fight::fighter_view(&page, i, bio, pre)
    };
    let (f1, f2) = (view(0), view(1));
    Ok(FightRecord::new(&page, f1, f2))
}

/// Scrape one event page and all its fights into `<stats dir>/<event_id>.json`.
pub fn scrape_event(
    url: &str,
    listed_name: &str,
    opts: &ScrapeOptions,
    precomp: Option<&PrecompTable>,
    progress: &mut dyn Progress,
) -> Result<PathBuf> {
    let page = event::fetch(url)?;
    if page.event_id.is_empty() {
        return Err(ScrapeError::Missing { what: "event id", url: s!(url) }.into());
    }
    progress.log(&format!("Event {} ({} fights)", page.event_id, page.fight_ids.len()));

    let now = Local::now().naive_local();
    let fights = pool::collect(
        &page.fight_ids,
        |id| format!("fight {id}"),
        |id| scrape_fight(id, precomp, now),
        opts.pool(),
        progress,
    );

    let name = if page.name.is_empty() { s!(listed_name) } else { page.name.clone() };
    let record = EventRecord {
        event_id: page.event_id.clone(),
        name,
        date: page.date.clone(),
        location: geo::locate(page.location.clone(), opts.google_key.as_deref()),
        fights,
    };

    let path = opts.stats_dir().join(format!("{}.json", record.event_id));
    file::write_json(&path, &record)?;
    logf!("Event {}: {} fights → {}", record.event_id, record.fights.len(), path.display());
    Ok(path)
}

fn scrape_events(rows: &[EventRow], opts: &ScrapeOptions, progress: &mut dyn Progress) -> Vec<PathBuf> {
    let precomp = load_precomp(opts);
    let mut written = Vec::new();
    for row in rows {
        match scrape_event(&row.url, &row.name, opts, precomp.as_ref(), progress) {
            Ok(p) => written.push(p),
            Err(e) => {
                loge!("Event {}: {e}", row.url);
                progress.log(&format!("Event {} failed: {e}", row.name));
            }
        }
    }
    written
}

/// Every event on the upcoming list.
pub fn upcoming(opts: &ScrapeOptions, progress: &mut dyn Progress) -> Result<Vec<PathBuf>> {
    let rows = events::fetch(UFCSTATS_UPCOMING)?;
    progress.log(&format!("Found {} upcoming events", rows.len()));
    Ok(scrape_events(&rows, opts, progress))
}

/// The most recent completed event (dated on or before `today`).
pub fn latest(opts: &ScrapeOptions, today: NaiveDate, progress: &mut dyn Progress) -> Result<PathBuf> {
    let rows = events::fetch(UFCSTATS_COMPLETED)?;
    let row = events::latest_completed(&rows, today)
        .ok_or_else(|| ScrapeError::NoEvents(s!(UFCSTATS_COMPLETED)))?;
    progress.log(&format!("Latest completed event: {} ({})", row.name, row.date_str));
    let precomp = load_precomp(opts);
    scrape_event(&row.url, &row.name, opts, precomp.as_ref(), progress)
}

/// A single event by URL.
pub fn event(url: &str, opts: &ScrapeOptions, progress: &mut dyn Progress) -> Result<PathBuf> {
    let precomp = load_precomp(opts);
    scrape_event(url, "", opts, precomp.as_ref(), progress)
}

/// One fighter's bio into `<fighters dir>/<id>.json`.
pub fn fighter(id: &str, opts: &ScrapeOptions) -> Result<PathBuf> {
    let bio = fighter::fetch(&fighter::fighter_url(id), Local::now().naive_local())?;
    let path = opts.fighters_dir().join(format!("{}.json", sanitize_filename(id, "fighter")));
    file::write_json(&path, &bio)?;
    logf!("Fighter {id} → {}", path.display());
    Ok(path)
}
