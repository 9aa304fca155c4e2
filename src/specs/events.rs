// src/specs/events.rs
//! UFCStats event listings (`/statistics/events/completed?page=all` and
//! `/statistics/events/upcoming`). Both pages share one table layout:
//!
//! ```text
//! <tr class="b-statistics__table-row">
//!   <td> <a class="b-link ..." href=".../event-details/<id>">Name</a>
//!        <span class="b-statistics__date">April 13, 2024</span> </td>
//!   <td class="... b-statistics__table-col_style_big-top-padding">City, State, Country</td>
//! </tr>
//! ```

use std::time::Instant;

use chrono::NaiveDate;
use scraper::Html;
use serde::{Deserialize, Serialize};

use super::id_after;
use crate::core::convert::parse_long_date;
use crate::core::html::{attr, first_text, sel, text_of};
use crate::core::net;
use crate::error::NetError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub name: String,
    pub url: String,
    /// `None` when the listing shows no date or an unexpected format.
    pub date: Option<NaiveDate>,
    pub date_str: String,
    pub location: String,
    /// The completed listing leads with the next scheduled card, linked in
    /// white (`b-link_style_white`) instead of black.
    #[serde(default)]
    pub next_event: bool,
}

pub fn fetch(url: &str) -> Result<Vec<EventRow>, NetError> {
    let doc = net::http_get(url)?;
    let t = Instant::now();
    let rows = parse(&doc);
    logd!("Events: parsed {} rows from {url} in {:?}", rows.len(), t.elapsed());
    Ok(rows)
}

pub fn parse(html: &str) -> Vec<EventRow> {
    let doc = Html::parse_document(html);
    let row_sel = sel("tr.b-statistics__table-row");
    let link_sel = sel("a.b-link");
    let date_sel = sel("span.b-statistics__date");
    let loc_sel = sel("td.b-statistics__table-col_style_big-top-padding");

    let mut out = Vec::new();
    for row in doc.select(&row_sel) {
        let Some(link) = row.select(&link_sel).next() else { continue };
        let Some(url) = attr(link, "href") else { continue };
        if !url.contains("/event-details/") {
            continue;
        }
        let Some(id) = id_after(&url, "event-details/") else { continue };

        let date_str = first_text(row, &date_sel).unwrap_or_default();
        let next_event = link.value().classes().any(|c| c == "b-link_style_white");
        out.push(EventRow {
            id,
            name: text_of(link),
            date: parse_long_date(&date_str),
            date_str,
            location: first_text(row, &loc_sel).unwrap_or_default(),
            url,
            next_event,
        });
    }
    out
}

/// Most recent event dated on or before `today`.
/// Rows without a parsed date are ignored; on equal dates the first listed wins.
pub fn latest_completed(rows: &[EventRow], today: NaiveDate) -> Option<&EventRow> {
    rows.iter()
        .filter(|r| r.date.is_some_and(|d| d <= today))
        .fold(None, |best: Option<&EventRow>, r| match best {
            Some(b) if b.date >= r.date => Some(b),
            _ => Some(r),
        })
}
