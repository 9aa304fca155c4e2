// src/geo.rs
//! Optional venue enrichment through Google Places (find-place) and the
//! Elevation API. Only used when a `GOOGLE_KEY` is configured; any failure
//! leaves the fields empty.

use serde_json::Value;

use crate::config::consts::{ELEVATION_URL, PLACES_URL};
use crate::core::net;
use crate::specs::event::{Coordinates, Location};

/// `candidates[0].geometry.location` of a find-place response with status OK.
pub fn parse_place(resp: &Value) -> Option<Coordinates> {
    if resp.get("status").and_then(Value::as_str) != Some("OK") {
        return None;
    }
    let loc = resp.pointer("/candidates/0/geometry/location")?;
    Some(Coordinates {
        lat: loc.get("lat")?.as_f64()?,
        lng: loc.get("lng")?.as_f64()?,
    })
}

/// `results[0].elevation` of an elevation response with status OK.
pub fn parse_elevation(resp: &Value) -> Option<f64> {
    if resp.get("status").and_then(Value::as_str) != Some("OK") {
        return None;
    }
    resp.pointer("/results/0/elevation")?.as_f64()
}

pub fn find_coordinates(name: &str, key: &str) -> Option<Coordinates> {
    let query = [
        ("input", s!(name)),
        ("inputtype", s!("textquery")),
        ("fields", s!("geometry")),
        ("key", s!(key)),
    ];
    match net::get_json(PLACES_URL, &query) {
        Ok(resp) => parse_place(&resp),
        Err(e) => {
            logw!("Geo: place lookup for {name:?} failed: {e}");
            None
        }
    }
}

pub fn elevation(at: Coordinates, key: &str) -> Option<f64> {
    let query = [("locations", format!("{},{}", at.lat, at.lng)), ("key", s!(key))];
    match net::get_json(ELEVATION_URL, &query) {
        Ok(resp) => parse_elevation(&resp),
        Err(e) => {
            logw!("Geo: elevation lookup failed: {e}");
            None
        }
    }
}

/// Build the event location, geocoding it when a key is given.
pub fn locate(name: Option<String>, key: Option<&str>) -> Location {
    let (coordinates, elevation) = match (name.as_deref(), key) {
        (Some(n), Some(k)) => {
            let c = find_coordinates(n, k);
            (c, c.and_then(|c| elevation(c, k)))
        }
        _ => (None, None),
    };
    Location { name, coordinates, elevation }
}
