// src/specs/fight.rs
//! UFCStats fight page (`/fight-details/<id>`).
//!
//! Layout notes:
//! - `div.b-fight-details__person` ×2: result badge, name link, nickname.
//! - `div.b-fight-details__content`: `i.b-fight-details__text-item*` items, each
//!   with an `i.b-fight-details__label` (Method, Round, Time, Time format,
//!   Referee, Details). Judges follow the Details label as sibling `<i>`s.
//! - Stats tables. Each data cell holds one `<p>` per fighter. Tables are told
//!   apart by their header row (`KD` → totals, `Head` → significant strikes);
//!   per-round tables interleave `Round N` header rows with data rows, so rows
//!   are walked in document order rather than by their (reshuffled) `thead`/`tbody`
//!   parents.

use std::collections::BTreeMap;
use std::time::Instant;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fighter::FighterBio;
use super::id_after;
use crate::core::convert::{parse_clock, parse_count, parse_pct, parse_x_of_y};
use crate::core::html::{attr, first_text, has_class_prefix, next_element_siblings, sel, text_of};
use crate::core::net;
use crate::error::{Result, ScrapeError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landed {
    pub landed: u32,
    pub attempted: u32,
}

impl Landed {
    /// `"12 of 30"`; anything else is 0 of 0.
    pub fn parse(text: &str) -> Landed {
        parse_x_of_y(text)
            .map(|(landed, attempted)| Landed { landed, attempted })
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corner {
    pub name: String,
    pub url: String,
    pub result: String,
    pub nickname: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeScore {
    pub judge: String,
    pub score: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FightDetails {
    pub method: String,
    pub round: String,
    pub time: String,
    pub time_format: String,
    pub referee: String,
    pub judges: Vec<JudgeScore>,
}

/// One fighter's line of a totals table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TotalsLine {
    pub kd: u32,
    pub sig: Landed,
    pub sig_pct: f64,
    pub total: Landed,
    pub td: Landed,
    pub td_pct: f64,
    pub sub_att: u32,
    pub rev: u32,
    /// Raw `M:SS`.
    pub ctrl: String,
}

/// One fighter's line of a significant strikes table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SigLine {
    pub sig: Landed,
    pub sig_pct: f64,
    pub head: Landed,
    pub body: Landed,
    pub leg: Landed,
    pub distance: Landed,
    pub clinch: Landed,
    pub ground: Landed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FightPage {
    pub fight_id: String,
    pub fighters: Vec<Corner>,
    pub details: FightDetails,
    /// Overall tables, indexed by fighter.
    pub totals: Vec<TotalsLine>,
    pub sig: Vec<SigLine>,
    /// Per-round tables: round number → lines indexed by fighter.
    pub round_totals: BTreeMap<u32, Vec<TotalsLine>>,
    pub round_sig: BTreeMap<u32, Vec<SigLine>>,
}

/* ---------------- Output shapes ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SigStrikes {
    pub landed: u32,
    pub attempted: u32,
    #[serde(rename = "Head")]
    pub head: Landed,
    #[serde(rename = "Body")]
    pub body: Landed,
    #[serde(rename = "Leg")]
    pub leg: Landed,
    #[serde(rename = "Distance")]
    pub distance: Landed,
    #[serde(rename = "Clinch")]
    pub clinch: Landed,
    #[serde(rename = "Ground")]
    pub ground: Landed,
}

impl SigStrikes {
    fn merge(total: Landed, breakdown: Option<&SigLine>) -> SigStrikes {
        let b = breakdown.cloned().unwrap_or_default();
        SigStrikes {
            landed: total.landed,
            attempted: total.attempted,
            head: b.head,
            body: b.body,
            leg: b.leg,
            distance: b.distance,
            clinch: b.clinch,
            ground: b.ground,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    #[serde(rename = "KD")]
    pub kd: u32,
    #[serde(rename = "Sig. str.")]
    pub sig_str: SigStrikes,
    #[serde(rename = "Sig. str. %")]
    pub sig_str_pct: f64,
    #[serde(rename = "Total str.")]
    pub total_str: Landed,
    #[serde(rename = "Td")]
    pub td: Landed,
    #[serde(rename = "Td %")]
    pub td_pct: f64,
    #[serde(rename = "Sub. att")]
    pub sub_att: u32,
    #[serde(rename = "Rev.")]
    pub rev: u32,
    /// Control time in seconds.
    #[serde(rename = "Ctrl")]
    pub ctrl: u32,
}

/// Everything written for one fighter of one fight.
#[derive(Clone, Debug, Serialize)]
pub struct FighterFight {
    #[serde(flatten)]
    pub bio: Option<FighterBio>,
    pub result: String,
    #[serde(rename = "KD")]
    pub kd: u32,
    #[serde(rename = "Sig. str.")]
    pub sig_str: SigStrikes,
    #[serde(rename = "Sig. str. %")]
    pub sig_str_pct: f64,
    #[serde(rename = "Total str.")]
    pub total_str: Landed,
    #[serde(rename = "Td")]
    pub td: Landed,
    #[serde(rename = "Td %")]
    pub td_pct: f64,
    #[serde(rename = "Sub. att")]
    pub sub_att: u32,
    #[serde(rename = "Rev.")]
    pub rev: u32,
    #[serde(rename = "Ctrl")]
    pub ctrl: String,
    pub rounds: BTreeMap<String, RoundStats>,
    pub pre_comp: Option<Value>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FightRecord {
    pub fight_id: String,
    pub method: String,
    pub round: String,
    pub time: String,
    pub time_format: String,
    pub referee: String,
    pub details: Vec<JudgeScore>,
    pub fighter1: FighterFight,
    pub fighter2: FighterFight,
}

impl FightRecord {
    pub fn new(page: &FightPage, fighter1: FighterFight, fighter2: FighterFight) -> FightRecord {
        let d = &page.details;
        FightRecord {
            fight_id: page.fight_id.clone(),
            method: d.method.clone(),
            round: d.round.clone(),
            time: d.time.clone(),
            time_format: d.time_format.clone(),
            referee: d.referee.clone(),
            details: d.judges.clone(),
            fighter1,
            fighter2,
        }
    }
}

/* ---------------- Fetch / parse ---------------- */

pub fn fetch(url: &str) -> Result<FightPage> {
    let doc = net::http_get(url)?;
    let t = Instant::now();
    let page = parse(&doc, url)?;
    logd!("Fight {}: parsed in {:?}", page.fight_id, t.elapsed());
    Ok(page)
}

pub fn parse(html: &str, url: &str) -> Result<FightPage, ScrapeError> {
    let doc = Html::parse_document(html);

    let fighters = parse_corners(&doc);
    if fighters.len() < 2 {
        return Err(ScrapeError::Missing { what: "fighters", url: s!(url) });
    }

    let mut page = FightPage {
        fight_id: id_after(url, "fight-details/").unwrap_or_default(),
        fighters,
        details: parse_details(&doc),
        ..FightPage::default()
    };
    parse_tables(&doc, &mut page);
    Ok(page)
}

fn parse_corners(doc: &Html) -> Vec<Corner> {
    let name_sel = sel("h3.b-fight-details__person-name a");
    let nick_sel = sel("p.b-fight-details__person-title");
    let i_sel = sel("i");

    doc.select(&sel("div.b-fight-details__person"))
        .map(|person| {
            let link = person.select(&name_sel).next();
            let result = person
                .select(&i_sel)
                .find(|i| has_class_prefix(*i, "b-fight-details__person-status"))
                .map(text_of)
                .unwrap_or_default();
            Corner {
                name: link.map(text_of).unwrap_or_default(),
                url: link.and_then(|a| attr(a, "href")).unwrap_or_default(),
                result,
                nickname: first_text(person, &nick_sel).unwrap_or_default(),
            }
        })
        .collect()
}

fn parse_details(doc: &Html) -> FightDetails {
    let mut details = FightDetails::default();
    let label_sel = sel("i.b-fight-details__label");
    let span_sel = sel("span");

    let Some(content) = doc.select(&sel("div.b-fight-details__content")).next() else {
        return details;
    };

    for item in content.select(&sel("i")) {
        if !has_class_prefix(item, "b-fight-details__text-item") {
            continue;
        }
        let Some(label_el) = item.select(&label_sel).next() else { continue };
        let label = text_of(label_el);
        let value = text_of(item)
            .strip_prefix(label.as_str())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        match label.trim_end_matches(':').to_ascii_lowercase().as_str() {
            "method" => details.method = value,
            "round" => details.round = value,
            "time" => details.time = value,
            "time format" => details.time_format = value,
            "referee" => details.referee = value,
            "details" => {
                details.judges = next_element_siblings(item)
                    .filter(|el| el.value().name() == "i")
                    .map(|el| {
                        let judge = first_text(el, &span_sel).unwrap_or_default();
                        let mut score = text_of(el);
                        if !judge.is_empty() {
                            score = score.replace(&judge, "").trim().to_string();
                        }
                        JudgeScore { judge, score }
                    })
                    .collect();
            }
            _ => {}
        }
    }
    details
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Totals,
    Sig,
}

/// `"Round 3"` → 3 (case-insensitive, optional space).
fn round_number(text: &str) -> Option<u32> {
    let lower = text.to_ascii_lowercase();
    let at = lower.find("round")? + "round".len();
    let digits: String = lower[at..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// One value per fighter: the cell's `<p>`s, or its whole text if it has none.
fn cell_values(td: ElementRef<'_>) -> Vec<String> {
    let ps: Vec<String> = td.select(&sel("p")).map(text_of).collect();
    if ps.is_empty() { vec![text_of(td)] } else { ps }
}

fn value<'a>(cells: &'a [Vec<String>], col: usize, fighter: usize) -> &'a str {
    cells.get(col).and_then(|c| c.get(fighter)).map(String::as_str).unwrap_or("")
}

// Column 0 is the fighter cell.
fn totals_line(cells: &[Vec<String>], i: usize) -> TotalsLine {
    TotalsLine {
        kd: parse_count(value(cells, 1, i)),
        sig: Landed::parse(value(cells, 2, i)),
        sig_pct: parse_pct(value(cells, 3, i)),
        total: Landed::parse(value(cells, 4, i)),
        td: Landed::parse(value(cells, 5, i)),
        td_pct: parse_pct(value(cells, 6, i)),
        sub_att: parse_count(value(cells, 7, i)),
        rev: parse_count(value(cells, 8, i)),
        ctrl: s!(value(cells, 9, i)),
    }
}

fn sig_line(cells: &[Vec<String>], i: usize) -> SigLine {
    SigLine {
        sig: Landed::parse(value(cells, 1, i)),
        sig_pct: parse_pct(value(cells, 2, i)),
        head: Landed::parse(value(cells, 3, i)),
        body: Landed::parse(value(cells, 4, i)),
        leg: Landed::parse(value(cells, 5, i)),
        distance: Landed::parse(value(cells, 6, i)),
        clinch: Landed::parse(value(cells, 7, i)),
        ground: Landed::parse(value(cells, 8, i)),
    }
}

fn parse_tables(doc: &Html, page: &mut FightPage) {
    let tr_sel = sel("tr");
    let th_sel = sel("th");
    let td_sel = sel("td");

    for table in doc.select(&sel("table")) {
        let mut kind: Option<TableKind> = None;
        let mut round: Option<u32> = None;
        let mut rows: Vec<(Option<u32>, Vec<Vec<String>>)> = Vec::new();

        for tr in table.select(&tr_sel) {
            let headers: Vec<String> = tr.select(&th_sel).map(text_of).collect();
            if !headers.is_empty() {
                if let Some(n) = headers.iter().find_map(|h| round_number(h)) {
                    round = Some(n);
                } else if kind.is_none() {
                    if headers.iter().any(|h| h == "KD") {
                        kind = Some(TableKind::Totals);
                    } else if headers.iter().any(|h| h == "Head") {
                        kind = Some(TableKind::Sig);
                    }
                }
                continue;
            }
            let cells: Vec<Vec<String>> = tr.select(&td_sel).map(cell_values).collect();
            if cells.len() > 1 {
                rows.push((round, cells));
            }
        }

        let Some(kind) = kind else { continue };
        for (round, cells) in rows {
            match (kind, round) {
                (TableKind::Totals, None) if page.totals.is_empty() => {
                    page.totals = (0..2).map(|i| totals_line(&cells, i)).collect();
                }
                (TableKind::Sig, None) if page.sig.is_empty() => {
                    page.sig = (0..2).map(|i| sig_line(&cells, i)).collect();
                }
                (TableKind::Totals, Some(n)) => {
                    page.round_totals.entry(n).or_insert_with(|| (0..2).map(|i| totals_line(&cells, i)).collect());
                }
                (TableKind::Sig, Some(n)) => {
                    page.round_sig.entry(n).or_insert_with(|| (0..2).map(|i| sig_line(&cells, i)).collect());
                }
                _ => {}
            }
        }
    }
}

/// Build the written record for fighter `index` (0 or 1), merging the
/// totals tables with the significant strikes breakdown.
pub fn fighter_view(
    page: &FightPage,
    index: usize,
    bio: Option<FighterBio>,
    pre_comp: Option<Value>,
) -> FighterFight {
    let tot = page.totals.get(index).cloned().unwrap_or_default();
    let sig = page.sig.get(index);

    let rounds = page
        .round_totals
        .iter()
        .map(|(n, lines)| {
            let t = lines.get(index).cloned().unwrap_or_default();
            let breakdown = page.round_sig.get(n).and_then(|l| l.get(index));
            let stats = RoundStats {
                kd: t.kd,
                sig_str: SigStrikes::merge(t.sig, breakdown),
                sig_str_pct: t.sig_pct,
                total_str: t.total,
                td: t.td,
                td_pct: t.td_pct,
                sub_att: t.sub_att,
                rev: t.rev,
                ctrl: parse_clock(&t.ctrl),
            };
            (format!("round{n}"), stats)
        })
        .collect();

    FighterFight {
        bio,
        result: page.fighters.get(index).map(|c| c.result.clone()).unwrap_or_default(),
        kd: tot.kd,
        sig_str: SigStrikes::merge(tot.sig, sig),
        sig_str_pct: tot.sig_pct,
        total_str: tot.total,
        td: tot.td,
        td_pct: tot.td_pct,
        sub_att: tot.sub_att,
        rev: tot.rev,
        ctrl: tot.ctrl,
        rounds,
        pre_comp,
    }
}
