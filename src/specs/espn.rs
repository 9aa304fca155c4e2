// src/specs/espn.rs
//! ESPN fight center (`/mma/fightcenter/_/id/<id>/league/ufc`). Each bout is a
//! `div.mb6` gamestrip:
//!
//! ```text
//! <div class="mb6">
//!   <span class="truncate tc db">Alex Pereira</span> ... <span class="truncate tc db">Jamahal Hill</span>
//!   <div class="ScoreCell__Time ..."><div>FinalKO/TKO R1, 3:14</div></div>
//!   <div data-testid="gameStripBarVictory">Alex Pereira</div>
//!   <div data-wrapping="MMAMatchup"><ul>
//!     <li><div class="MMAMatchup__Stat ns8 MMAMatchup__Stat__Text">1</div>
//!         <div class="ns9 fw-medium ttu nowrap clr-gray-04">KD</div>
//!         <div class="MMAMatchup__Stat ns8 MMAMatchup__Stat__Text">0</div></li>
//!   </ul></div>
//! </div>
//! ```
//!
//! The clock cell reads `Final<method> R<n>, M:SS` once a bout is over,
//! `R<n>, M:SS` or `END R<n>` while it runs, and `PRE-FIGHT`, `WALKOUTS` or
//! `INTROS` before it starts. Stats only appear for bouts the static page
//! renders expanded.

use std::time::Instant;

use scraper::{ElementRef, Html};
use serde::{Serialize, Serializer, ser::SerializeMap};

use super::id_after;
use crate::config::consts::{ESPN_BASE, ROUND_SECS};
use crate::core::html::{attr, first_text, sel, text_of};
use crate::core::net::{PageFetch, join_url};
use crate::error::NetError;

const METHODS: [&str; 5] = ["KO/TKO", "S Dec", "U Dec", "Sub", "No Contest"];
const PRE_FIGHT: [&str; 3] = ["PRE-FIGHT", "WALKOUTS", "INTROS"];

/// One fighter with stats keyed by the label ESPN shows (`KD`, `SIG Strikes`, ...).
/// Serialized as `{"<name>": {"<label>": "<value>", ...}}`, labels in page order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corner {
    pub name: String,
    pub stats: Vec<(String, String)>,
}

struct Stats<'a>(&'a [(String, String)]);

impl Serialize for Stats<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for Corner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &Stats(&self.stats))?;
        map.end()
    }
}

impl Corner {
    pub fn stat(&self, label: &str) -> Option<&str> {
        self.stats.iter().find(|(k, _)| k == label).map(|(_, v)| v.as_str())
    }
}

/// Where a bout stands according to its clock cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    /// Finish method for completed bouts, or the upper-cased pre-fight stage.
    pub method: Option<String>,
    /// `R<n>`
    pub round: Option<String>,
    /// `M:SS` into the round.
    pub time: Option<String>,
}

impl Clock {
    /// Seconds since the opening bell, with five-minute rounds.
    pub fn timestamp(&self) -> Option<u32> {
        let round: u32 = self.round.as_deref()?.strip_prefix('R')?.parse().ok()?;
        let (m, s) = self.time.as_deref()?.split_once(':')?;
        let (m, s): (u32, u32) = (m.trim().parse().ok()?, s.trim().parse().ok()?);
        Some(round.checked_sub(1)? * ROUND_SECS + m * 60 + s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EspnFight {
    pub fighter1: Corner,
    pub fighter2: Corner,
    pub method: Option<String>,
    pub round: Option<String>,
    pub time: Option<String>,
    pub timestamp: Option<u32>,
    pub fighter_victory: Option<String>,
}

/// One fight-center page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EspnEvent {
    pub event_url: String,
    pub event_id: Option<String>,
    pub fights: Vec<EspnFight>,
}

/// One line of the live fight-center log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EspnSnapshot {
    /// UTC, `%Y-%m-%dT%H:%M:%SZ`
    pub timestamp: String,
    pub fights: Vec<EspnFight>,
}

pub fn fightcenter_url(id: &str) -> String {
    format!("{ESPN_BASE}/mma/fightcenter/_/id/{id}/league/ufc")
}

pub fn year_url(year: i32) -> String {
    format!("{ESPN_BASE}/mma/fightcenter/_/league/ufc/year/{year}")
}

/// `R<n>` followed by an optional `, M:SS`.
fn round_and_time(s: &str) -> Option<(String, Option<String>)> {
    let rest = s.trim().strip_prefix('R')?;
    let (n, time) = match rest.split_once(',') {
        Some((n, t)) => (n.trim(), Some(t.trim())),
        None => (rest.trim(), None),
    };
    if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let time = match time {
        Some(t) => {
            let (m, sec) = t.split_once(':')?;
            let digits = |x: &str| !x.is_empty() && x.bytes().all(|b| b.is_ascii_digit());
            if !digits(m) || !digits(sec) {
                return None;
            }
            Some(s!(t))
        }
        None => None,
    };
    Some((join!("R", n), time))
}

/// Read a clock cell. Text that fits none of the known shapes gives an empty clock.
pub fn parse_clock(text: &str) -> Clock {
    let text = text.trim();
    let upper = text.to_uppercase();
    if PRE_FIGHT.contains(&upper.as_str()) {
        return Clock { method: Some(upper), ..Clock::default() };
    }

    if let Some(rest) = text.strip_prefix("Final") {
        let rest = rest.trim_start();
        let parsed = METHODS.iter().find_map(|m| {
            let (round, time) = round_and_time(rest.strip_prefix(*m)?)?;
            time.map(|t| Clock { method: Some(s!(*m)), round: Some(round), time: Some(t) })
        });
        return parsed.unwrap_or_default();
    }

    let live = text.strip_prefix("END").map(str::trim_start).unwrap_or(text);
    match round_and_time(live) {
        Some((round, time)) => Clock { method: None, round: Some(round), time },
        None => Clock::default(),
    }
}

fn stat_rows(bout: ElementRef<'_>) -> Vec<(String, String, String)> {
    let matchup_sel = sel(r#"[data-wrapping="MMAMatchup"] li"#);
    let value_sel = sel("div.MMAMatchup__Stat.MMAMatchup__Stat__Text");
    let label_sel = sel("div.ns9.fw-medium.ttu.nowrap.clr-gray-04");

    let mut rows = Vec::new();
    for li in bout.select(&matchup_sel) {
        let values: Vec<String> = li.select(&value_sel).map(text_of).collect();
        let [left, right] = values.as_slice() else { continue };
        let Some(label) = first_text(li, &label_sel) else { continue };
        rows.push((label, left.clone(), right.clone()));
    }
    rows
}

fn clock_text(bout: ElementRef<'_>) -> Option<String> {
    let cell = bout.select(&sel("div.ScoreCell__Time")).next()?;
    Some(first_text(cell, &sel("div")).unwrap_or_else(|| text_of(cell)))
}

/// Every bout on a fight-center page, in page order. Strips that name fewer
/// than two fighters are skipped.
pub fn parse_fightcenter(html: &str) -> Vec<EspnFight> {
    let doc = Html::parse_document(html);
    let bout_sel = sel("div.mb6");
    let name_sel = sel("span.truncate.tc.db");
    let victory_sel = sel(r#"[data-testid="gameStripBarVictory"]"#);

    let mut fights = Vec::new();
    for bout in doc.select(&bout_sel) {
        let names: Vec<String> = bout.select(&name_sel).map(text_of).collect();
        let [first, second, ..] = names.as_slice() else {
            logd!("ESPN: strip with {} names skipped", names.len());
            continue;
        };

        let mut fighter1 = Corner { name: first.clone(), stats: Vec::new() };
        let mut fighter2 = Corner { name: second.clone(), stats: Vec::new() };
        for (label, left, right) in stat_rows(bout) {
            fighter1.stats.push((label.clone(), left));
            fighter2.stats.push((label, right));
        }

        let clock = clock_text(bout).map(|t| parse_clock(&t)).unwrap_or_default();
        fights.push(EspnFight {
            fighter1,
            fighter2,
            timestamp: clock.timestamp(),
            method: clock.method,
            round: clock.round,
            time: clock.time,
            fighter_victory: first_text(bout, &victory_sel).filter(|v| !v.is_empty()),
        });
    }
    fights
}

/// Fight-center links in a year page's event dropdown, deduplicated, in page order.
pub fn parse_event_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let base = join!(ESPN_BASE, "/");
    let mut urls: Vec<String> = Vec::new();
    for opt in doc.select(&sel("select.dropdown__select option[data-url]")) {
        let Some(href) = attr(opt, "data-url") else { continue };
        if href == "#" || !href.contains("/fightcenter/_/id/") {
            continue;
        }
        let url = join_url(&base, &href);
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

pub fn event_id(url: &str) -> Option<String> {
    id_after(url, "/id/")
}

pub fn fetch_event(get: &PageFetch, url: &str) -> Result<EspnEvent, NetError> {
    let doc = get(url)?;
    let t = Instant::now();
    let fights = parse_fightcenter(&doc);
    logd!("ESPN: {} fights from {url} in {:?}", fights.len(), t.elapsed());
    Ok(EspnEvent { event_url: s!(url), event_id: event_id(url), fights })
}

pub fn fetch_event_links(get: &PageFetch, url: &str) -> Result<Vec<String>, NetError> {
    let urls = parse_event_links(&get(url)?);
    logd!("ESPN: {} events listed on {url}", urls.len());
    Ok(urls)
}
