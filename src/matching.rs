// src/matching.rs
//! Link mmadecisions.com events to UFCStats event ids.
//!
//! Two events are candidates when their dates are at most one day apart
//! (time zones shift the listed day). Among candidates the best venue match
//! by `token_set_ratio` wins; on equal scores the first candidate stays.

use std::path::Path;

use chrono::NaiveDate;

use crate::config::consts::MATCH_DATE_TOLERANCE_DAYS;
use crate::core::convert::parse_ddmmyyyy;
use crate::core::fuzzy::token_set_ratio;
use crate::error::Result;
use crate::file::{read_text, write_json};
use crate::specs::decisions::JudgeEvent;
use crate::specs::events::EventRow;

fn within_window(a: NaiveDate, b: NaiveDate) -> bool {
    (a - b).num_days().abs() <= MATCH_DATE_TOLERANCE_DAYS
}

/// UFCStats id for one judges event, with its venue score.
/// Only events named `UFC…` with a parseable date are matched.
pub fn match_judges_event(event: &JudgeEvent, ufc_events: &[EventRow]) -> Option<(String, u8)> {
    let details = &event.event_details;
    if !details.name.contains("UFC") {
        return None;
    }
    let Some(date) = parse_ddmmyyyy(&details.date) else {
        logw!("Matching: no usable date for {:?}", details.name);
        return None;
    };

    let mut best: Option<(String, u8)> = None;
    for row in ufc_events {
        let Some(d) = row.date else { continue };
        if !within_window(d, date) {
            continue;
        }
        let score = token_set_ratio(&row.location, &details.location);
        if best.as_ref().is_none_or(|(_, s)| score > *s) {
            best = Some((row.id.clone(), score));
        }
    }

    match &best {
        Some((id, score)) => logf!("Matching: {:?} → {id} (score {score})", details.name),
        None => logf!("Matching: no UFCStats event for {:?}", details.name),
    }
    best
}

/// For every UFCStats event dated on or after `cutoff`, tag the best
/// matching judges event with its id. A judges event claimed by several
/// UFCStats events keeps the one with the highest venue score (first on ties).
/// Returns how many distinct judges events were tagged.
pub fn attach_event_ids(judges: &mut [JudgeEvent], ufc_events: &[EventRow], cutoff: NaiveDate) -> usize {
    let dates: Vec<Option<NaiveDate>> = judges
        .iter()
        .map(|j| parse_ddmmyyyy(&j.event_details.date))
        .collect();

    let mut claimed: Vec<Option<u8>> = vec![None; judges.len()];
    for row in ufc_events {
        let Some(d) = row.date.filter(|d| *d >= cutoff) else { continue };

        let mut best: Option<(usize, u8)> = None;
        for (i, j) in judges.iter().enumerate() {
            let Some(jd) = dates[i] else { continue };
            if !within_window(d, jd) {
                continue;
            }
            let score = token_set_ratio(&row.location, &j.event_details.location);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((i, score));
            }
        }

        match best {
            Some((i, score)) if claimed[i].is_none_or(|held| score > held) => {
                logd!("Matching: {} ({}) → {:?} (score {score})", row.name, row.date_str, judges[i].event_details.name);
                judges[i].event_id = Some(row.id.clone());
                claimed[i] = Some(score);
            }
            Some((i, score)) => logd!(
                "Matching: {} (score {score}) loses {:?} to a better venue match",
                row.name,
                judges[i].event_details.name
            ),
            None => logd!("Matching: no judges event for {} ({})", row.name, row.date_str),
        }
    }
    claimed.iter().filter(|c| c.is_some()).count()
}

/// File variant: read a JSON array of judges events, tag them, write the result.
pub fn attach_event_ids_file(
    input: &Path,
    output: &Path,
    ufc_events: &[EventRow],
    cutoff: NaiveDate,
) -> Result<usize> {
    let mut judges: Vec<JudgeEvent> = serde_json::from_str(&read_text(input)?)?;
    let matched = attach_event_ids(&mut judges, ufc_events, cutoff);
    write_json(output, &judges)?;
    logf!("Matching: tagged {matched} of {} judges events → {}", judges.len(), output.display());
    Ok(matched)
}
