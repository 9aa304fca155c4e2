// src/specs/decisions.rs
//! mmadecisions.com pages:
//! - `decisions-by-event/[<year>/]`: one `tr.decision` per event, link in `td.list`.
//! - `event/<id>/<slug>`: name + venue in `tr.top-row td.decision-top2`, date in
//!   `tr.bottom-row td.decision-bottom2`, fight links `decision/...` in `td.list2`.
//! - `decision/<id>/<slug>`: fighters in `td.decision-top` / `td.decision-bottom`,
//!   one scorecard table per judge.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::config::consts::{JUDGES_PER_FIGHT, MMADECISIONS_BASE};
use crate::core::convert::parse_long_date;
use crate::core::html::{attr, sel, stripped_strings, text_of};
use crate::core::net::{PageFetch, join_url};
use crate::core::sanitize::fold_diacritics;
use crate::error::NetError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub name: String,
    /// `DD/MM/YYYY`, or the raw text if the page's date didn't parse.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub round: String,
    pub fighter1: u32,
    pub fighter2: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalScore {
    pub fighter1: u32,
    pub fighter2: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeCard {
    pub judge_name: String,
    pub rounds: Vec<RoundScore>,
    pub total: Option<TotalScore>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionFight {
    pub fight_url: String,
    pub fighter1: String,
    pub fighter2: String,
    /// `Judge1`..`Judge3`
    pub judges: BTreeMap<String, JudgeCard>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeEvent {
    pub event_url: String,
    pub event_details: EventDetails,
    /// UFCStats id, filled in by `matching`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default)]
    pub fights: Vec<DecisionFight>,
}

pub fn year_url(year: i32) -> String {
    format!("{}{year}/", crate::config::consts::DECISIONS_BY_EVENT)
}

/* ---------------- Index ---------------- */

pub fn fetch_index(get: &PageFetch, url: &str) -> Result<Vec<String>, NetError> {
    let doc = get(url)?;
    let urls = parse_index(&doc);
    logd!("Decisions index {url}: {} events", urls.len());
    Ok(urls)
}

pub fn parse_index(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let link_sel = sel("td.list a[href]");
    doc.select(&sel("tr.decision"))
        .filter_map(|row| row.select(&link_sel).next())
        .filter_map(|a| attr(a, "href"))
        .map(|href| join_url(MMADECISIONS_BASE, &href))
        .collect()
}

/* ---------------- Event ---------------- */

pub fn fetch_event(get: &PageFetch, url: &str) -> Result<(EventDetails, Vec<String>), NetError> {
    let doc = get(url)?;
    let t = Instant::now();
    let out = parse_event(&doc);
    logd!("Decisions event {url}: {} fights, parsed in {:?}", out.1.len(), t.elapsed());
    Ok(out)
}

pub fn parse_event(html: &str) -> (EventDetails, Vec<String>) {
    let doc = Html::parse_document(html);
    let mut details = EventDetails::default();

    if let Some(td) = doc.select(&sel("tr.top-row td.decision-top2")).next() {
        let mut parts = stripped_strings(td).into_iter();
        details.name = parts.next().unwrap_or_default();
        details.location = parts.collect::<Vec<_>>().join(", ");
    }

    if let Some(td) = doc.select(&sel("tr.bottom-row td.decision-bottom2")).next() {
        let raw = text_of(td);
        details.date = match parse_long_date(&raw) {
            Some(d) => d.format("%d/%m/%Y").to_string(),
            None => {
                logw!("Decisions: unparsed event date {raw:?}");
                raw
            }
        };
    }

    let link_sel = sel("a[href]");
    let fights: BTreeSet<String> = doc
        .select(&sel("td.list2"))
        .filter_map(|cell| cell.select(&link_sel).next())
        .filter_map(|a| attr(a, "href"))
        .filter(|href| href.starts_with("decision/"))
        .map(|href| join_url(MMADECISIONS_BASE, &href))
        .collect();

    (details, fights.into_iter().collect())
}

/* ---------------- Fight ---------------- */

pub fn fetch_fight(get: &PageFetch, url: &str) -> Result<Option<DecisionFight>, NetError> {
    let doc = get(url)?;
    Ok(parse_fight(&doc, url))
}

fn int_cell(cell: Option<&ElementRef<'_>>) -> Option<u32> {
    cell.map(|c| text_of(*c)).and_then(|t| t.parse().ok())
}

fn parse_card(table: ElementRef<'_>) -> Option<JudgeCard> {
    let judge_cell = table.select(&sel("td.judge")).next()?;
    let judge_name = stripped_strings(judge_cell)
        .into_iter()
        .next()
        .map(|n| fold_diacritics(&n))
        .unwrap_or_default();

    let td_sel = sel("td");
    let mut rounds = Vec::new();
    for row in table.select(&sel("tr.decision")) {
        let cells: Vec<ElementRef> = row.select(&td_sel).collect();
        if cells.len() < 3 {
            continue;
        }
        // "-" marks an unscored round
        let (Some(f1), Some(f2)) = (int_cell(cells.get(1)), int_cell(cells.get(2))) else { continue };
        rounds.push(RoundScore { round: text_of(cells[0]), fighter1: f1, fighter2: f2 });
    }

    let total = table.select(&sel("tr.bottom-row")).next().and_then(|row| {
        let cells: Vec<ElementRef> = row.select(&td_sel).collect();
        if cells.len() < 3 {
            return None;
        }
        Some(TotalScore { fighter1: int_cell(cells.get(1))?, fighter2: int_cell(cells.get(2))? })
    });

    Some(JudgeCard { judge_name, rounds, total })
}

/// `None` when the page has fewer than three scorecards.
pub fn parse_fight(html: &str, url: &str) -> Option<DecisionFight> {
    let doc = Html::parse_document(html);

    let link_sel = sel("a");
    let names: Vec<String> = doc
        .select(&sel("td.decision-top, td.decision-bottom"))
        .filter_map(|cell| cell.select(&link_sel).next())
        .map(|a| fold_diacritics(&text_of(a)))
        .collect();
    let (fighter1, fighter2) = match names.as_slice() {
        [a, b, ..] => (a.clone(), b.clone()),
        _ => {
            logw!("Decisions: could not read both fighter names from {url}");
            (s!(), s!())
        }
    };

    let tables: Vec<ElementRef> = doc
        .select(&sel(r#"table[style="border-spacing: 1px; width: 100%"]"#))
        .collect();
    if tables.len() < JUDGES_PER_FIGHT {
        logw!("Decisions: expected {JUDGES_PER_FIGHT} scorecards, found {} in {url}", tables.len());
        return None;
    }

    let mut judges = BTreeMap::new();
    for (idx, table) in tables.into_iter().take(JUDGES_PER_FIGHT).enumerate() {
        match parse_card(table) {
            Some(card) => { judges.insert(format!("Judge{}", idx + 1), card); }
            None => logw!("Decisions: judge cell missing in table {} of {url}", idx + 1),
        }
    }

    Some(DecisionFight { fight_url: s!(url), fighter1, fighter2, judges })
}
