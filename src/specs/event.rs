// src/specs/event.rs
//! UFCStats event page (`/event-details/<id>`): title, date, location and the
//! fight ids of the card. Fight rows carry their link in an `onclick`:
//! `doNav('http://ufcstats.com/fight-details/<id>')`.

use std::time::Instant;

use scraper::Html;
use serde::{Deserialize, Serialize};

use super::fight::FightRecord;
use super::id_after;
use crate::core::convert::parse_long_date;
use crate::core::html::{attr, first_text, sel, text_of};
use crate::core::net;
use crate::error::NetError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventPage {
    pub event_id: String,
    pub name: String,
    /// `YYYY-MM-DD`, or the page's text when it doesn't parse.
    pub date: String,
    pub location: Option<String>,
    pub fight_ids: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub elevation: Option<f64>,
}

/// One event file under `stats/event_dumps/`.
#[derive(Clone, Debug, Serialize)]
pub struct EventRecord {
    pub event_id: String,
    pub name: String,
    pub date: String,
    pub location: Location,
    pub fights: Vec<FightRecord>,
}

pub fn fetch(url: &str) -> Result<EventPage, NetError> {
    let doc = net::http_get(url)?;
    let t = Instant::now();
    let page = parse(&doc, url);
    logd!("Event {}: {} fights, parsed in {:?}", page.event_id, page.fight_ids.len(), t.elapsed());
    Ok(page)
}

pub fn parse(html: &str, url: &str) -> EventPage {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let mut page = EventPage {
        event_id: id_after(url, "event-details/").unwrap_or_default(),
        name: first_text(root, &sel("span.b-content__title-highlight")).unwrap_or_default(),
        ..EventPage::default()
    };

    let title_sel = sel("i.b-list__box-item-title");
    for li in doc.select(&sel("li.b-list__box-list-item")) {
        let Some(title) = li.select(&title_sel).next() else { continue };
        let label = text_of(title);
        let value = text_of(li)
            .strip_prefix(label.as_str())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        match label.trim_end_matches(':').to_ascii_lowercase().as_str() {
            "date" => {
                page.date = parse_long_date(&value)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or(value);
            }
            "location" if !value.is_empty() => page.location = Some(value),
            _ => {}
        }
    }

    for row in doc.select(&sel("tr.js-fight-details-click")) {
        let Some(onclick) = attr(row, "onclick") else { continue };
        if let Some(id) = do_nav_target(&onclick).and_then(|u| id_after(u, "fight-details/")) {
            page.fight_ids.push(id);
        }
    }

    page
}

/// URL inside `doNav('…')`.
fn do_nav_target(onclick: &str) -> Option<&str> {
    let start = onclick.find("doNav('")? + "doNav('".len();
    let len = onclick[start..].find('\'')?;
    Some(&onclick[start..start + len])
}
