// src/specs/fighter.rs
//! UFCStats fighter page (`/fighter-details/<id>`): name, nickname, record,
//! body measurements and career averages. All facts sit in
//! `li.b-list__box-list-item` rows as `<i class="b-list__box-item-title">Label:</i> value`.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDateTime;
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::core::convert::{dob_to_ddmmyyyy, first_int, height_to_inches, parse_record};
use crate::core::html::{first_text, sel, text_of};
use crate::core::net;
use crate::error::NetError;

/// Site label (without `:` and trailing `.`) → key written to JSON.
const STAT_KEYS: &[(&str, &str)] = &[
    ("SLpM", "SLpM"),
    ("Str. Acc", "Str. Acc.:"),
    ("SApM", "SApM"),
    ("Str. Def", "Str. Def:"),
    ("TD Avg", "TD. Avg."),
    ("TD Acc", "TD. Acc."),
    ("TD Def", "TD, Def"),
    ("Sub. Avg", "Sub. Avg."),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterStats {
    #[serde(flatten)]
    pub career: BTreeMap<String, StatValue>,
    pub record: Record,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterBio {
    pub id: String,
    pub name: String,
    pub nickname: String,
    /// `DD/MM/YYYY` when the site's date parses, else the raw text.
    pub dob: Option<String>,
    /// Inches.
    pub height: Option<u32>,
    /// Pounds.
    pub weight: Option<u32>,
    /// Inches.
    pub reach: Option<u32>,
    pub stance: String,
    pub stats: FighterStats,
    pub timestamp: String,
}

pub fn fighter_url(id: &str) -> String {
    format!("{}/fighter-details/{id}", crate::config::consts::UFCSTATS_BASE)
}

pub fn fetch(url: &str, now: NaiveDateTime) -> Result<FighterBio, NetError> {
    let doc = net::http_get(url)?;
    let t = Instant::now();
    let bio = parse(&doc, url, now);
    logd!("Fighter {}: parsed in {:?}", bio.id, t.elapsed());
    Ok(bio)
}

fn stat_key(label: &str) -> Option<&'static str> {
    let norm = label.replace(':', "");
    let norm = norm.trim().trim_end_matches('.');
    STAT_KEYS.iter().find(|(site, _)| *site == norm).map(|(_, key)| *key)
}

fn stat_value(raw: &str) -> StatValue {
    let stripped = raw.replace('%', "");
    let stripped = stripped.trim();
    match stripped.parse::<f64>() {
        Ok(n) => StatValue::Number(n),
        Err(_) => StatValue::Text(s!(stripped)),
    }
}

pub fn parse(html: &str, url: &str, now: NaiveDateTime) -> FighterBio {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let id = url.trim_matches('/').rsplit('/').next().unwrap_or_default().to_string();
    let (wins, losses, draws) = first_text(root, &sel("span.b-content__title-record"))
        .map(|r| parse_record(&r))
        .unwrap_or_default();

    let mut raw: BTreeMap<String, String> = BTreeMap::new();
    let mut career: BTreeMap<String, StatValue> = BTreeMap::new();
    let title_sel = sel("i.b-list__box-item-title");

    for li in doc.select(&sel("li.b-list__box-list-item")) {
        let Some(title) = li.select(&title_sel).next() else { continue };
        let label = text_of(title);
        let value = text_of(li)
            .strip_prefix(label.as_str())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        match stat_key(&label) {
            Some(key) => { career.insert(s!(key), stat_value(&value)); }
            None => { raw.insert(label.replace(':', "").trim().to_string(), value); }
        }
    }

    let field = |key: &str| raw.get(key).map(String::as_str).unwrap_or("");
    let nonzero = |v: Option<u32>| v.filter(|n| *n != 0);

    FighterBio {
        id,
        name: first_text(root, &sel("span.b-content__title-highlight")).unwrap_or_default(),
        nickname: first_text(root, &sel("p.b-content__Nickname")).unwrap_or_default(),
        dob: dob_to_ddmmyyyy(field("DOB")),
        height: nonzero(height_to_inches(field("Height"))),
        weight: nonzero(first_int(field("Weight"))),
        reach: nonzero(first_int(field("Reach"))),
        stance: field("STANCE").to_lowercase(),
        stats: FighterStats { career, record: Record { wins, losses, draws } },
        timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_labels_map_with_or_without_trailing_dot() {
        assert_eq!(stat_key("Str. Def:"), Some("Str. Def:"));
        assert_eq!(stat_key("Str. Def.:"), Some("Str. Def:"));
        assert_eq!(stat_key("TD Def.:"), Some("TD, Def"));
        assert_eq!(stat_key("SLpM:"), Some("SLpM"));
        assert_eq!(stat_key("Height:"), None);
    }

    #[test]
    fn stat_values_strip_percent() {
        assert_eq!(stat_value("56%"), StatValue::Number(56.0));
        assert_eq!(stat_value("3.29"), StatValue::Number(3.29));
        assert_eq!(stat_value("--"), StatValue::Text(s!("--")));
    }
}
