// src/specs/mod.rs
//! # Page specs
//!
//! One module per remote page or endpoint. A spec knows *where the data lives
//! in the markup* and *how to read it*, and nothing else.
//!
//! ## What lives here
//! - **Pure parsing** over an HTML (or JSON) string: `parse(..)` functions take
//!   the document text and return typed records, so every spec is testable
//!   offline against saved fixtures.
//! - A thin `fetch(..)` next to each parser that does the GET and logs the
//!   parse time.
//! - Output record types (`serde::Serialize`) shaped like the JSON files the
//!   collectors write.
//!
//! ## What does **not** live here
//! - Concurrency, pacing and progress: `scrape::*`.
//! - Writing files: `file`.
//! - Cross-site joins (judges ↔ UFCStats): `matching`.
//!
//! ## Call chain
//! ```text
//! cli → scrape::ufcstats::latest → specs::events::fetch
//!                               ↘ specs::event / fight / fighter ::fetch
//!                                 file::write_json
//! ```
//!
//! ## Conventions
//! - Missing cells become zero/empty values; a spec returns an error only when
//!   the page is unusable as a whole (e.g. no fighters on a fight page).
//! - Selectors are compiled once per parse via `core::html::sel`.

pub mod decisions;
pub mod espn;
pub mod event;
pub mod events;
pub mod fight;
pub mod fighter;
pub mod odds;

/// Path segment following `marker` in a URL, without query or trailing slash.
/// `id_after("http://ufcstats.com/event-details/abc123", "event-details/")` → `"abc123"`.
pub fn id_after(url: &str, marker: &str) -> Option<String> {
    let start = url.find(marker)? + marker.len();
    let id: String = url[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if id.is_empty() { None } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::id_after;

    #[test]
    fn id_after_stops_at_non_alphanumerics() {
        assert_eq!(id_after("http://ufcstats.com/event-details/abc123", "event-details/").as_deref(), Some("abc123"));
        assert_eq!(id_after("http://ufcstats.com/fight-details/f00d/?x=1", "fight-details/").as_deref(), Some("f00d"));
        assert_eq!(id_after("http://ufcstats.com/fight-details/", "fight-details/"), None);
        assert_eq!(id_after("http://ufcstats.com/", "fight-details/"), None);
    }
}
