// src/precomp.rs
//! Pre-competition averages from a flat CSV export (one row per fighter per
//! fight, `precomp_*` columns), reshaped into nested JSON:
//!
//! ```text
//! precomp_avg_head_strikes_landed_differential   → overall.head_strikes.landed.differential
//! precomp_avg_knockdowns                          → overall.knockdowns.avg
//! precomp_avg_reach_differential                  → overall.physicals.reach_differential
//! precomp_recent_avg_takedowns_attempts_per_min   → recent.per_min.takedowns.attempts
//! precomp_recent_avg_knockdowns                   → recent.knockdowns
//! ```

use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::csv::CsvTable;
use crate::error::Result;
use crate::file::read_text;

const SIMPLE: &[&str] = &["knockdowns", "sub_attempts", "reversals", "control"];
const PHYSICALS: &[&str] = &["reach", "height", "age"];
const CATEGORIES: &[&str] = &[
    "takedowns",
    "sig_strikes",
    "total_strikes",
    "head_strikes",
    "body_strikes",
    "leg_strikes",
    "distance_strikes",
    "clinch_strikes",
    "ground_strikes",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Suffix {
    Differential,
    PerMin,
}

impl Suffix {
    fn name(self) -> &'static str {
        match self {
            Suffix::Differential => "differential",
            Suffix::PerMin => "per_min",
        }
    }
}

/// The loaded CSV; load once per run and look rows up per fighter.
#[derive(Clone, Debug, Default)]
pub struct PrecompTable {
    table: CsvTable,
}

impl PrecompTable {
    pub fn load(path: &Path) -> Result<PrecompTable> {
        let table = CsvTable::parse(&read_text(path)?);
        logf!("Precomp: {} rows from {}", table.rows.len(), path.display());
        Ok(PrecompTable { table })
    }

    pub fn from_text(text: &str) -> PrecompTable {
        PrecompTable { table: CsvTable::parse(text) }
    }

    /// Nested stats for the row matching both URLs, or `None`.
    pub fn lookup(&self, fight_url: &str, fighter_url: &str) -> Option<Value> {
        let t = &self.table;
        let row = t.rows.iter().find(|r| {
            t.cell(r, "fight_url") == fight_url && t.cell(r, "fighter_url") == fighter_url
        })?;

        let mut overall = Map::new();
        let mut recent = Map::new();
        for (col, raw) in t.pairs(row) {
            if raw.is_empty() {
                continue;
            }
            let value = convert(raw);
            if let Some(key) = col.strip_prefix("precomp_recent_") {
                insert_recent(&mut recent, key, value);
            } else if let Some(key) = col.strip_prefix("precomp_") {
                insert_overall(&mut overall, key, value);
            }
        }

        let mut out = Map::new();
        out.insert(s!("overall"), Value::Object(overall));
        if !recent.is_empty() {
            out.insert(s!("recent"), Value::Object(recent));
        }
        Some(Value::Object(out))
    }
}

/// int, then float, then the raw string.
fn convert(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(s!(raw))
}

/// `avg_<stat>[_differential|_per_min]` → (stat, suffix). Other keys are ignored.
fn split_key(key: &str) -> Option<(&str, Option<Suffix>)> {
    let stat = key.strip_prefix("avg_")?;
    if let Some(s) = stat.strip_suffix("_differential") {
        return Some((s, Some(Suffix::Differential)));
    }
    if let Some(s) = stat.strip_suffix("_per_min") {
        return Some((s, Some(Suffix::PerMin)));
    }
    Some((stat, None))
}

/// `sig_strikes_landed` → (`significant_strikes`, `landed`).
fn split_category(stat: &str) -> Option<(&'static str, &str)> {
    CATEGORIES.iter().find_map(|cat| {
        let sub = stat.strip_prefix(cat)?.strip_prefix('_')?;
        let name = if *cat == "sig_strikes" { "significant_strikes" } else { *cat };
        Some((name, sub))
    })
}

fn child<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map.entry(s!(key)).or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(m) => m,
        _ => unreachable!("slot was just made an object"),
    }
}

fn insert_overall(overall: &mut Map<String, Value>, key: &str, value: Value) {
    let Some((stat, suffix)) = split_key(key) else { return };
    let leaf = suffix.map_or("avg", Suffix::name);

    if SIMPLE.contains(&stat) {
        child(overall, stat).insert(s!(leaf), value);
        return;
    }
    if PHYSICALS.contains(&stat) && suffix == Some(Suffix::Differential) {
        child(overall, "physicals").insert(format!("{stat}_differential"), value);
        return;
    }
    if let Some((cat, sub)) = split_category(stat) {
        child(child(overall, cat), sub).insert(s!(leaf), value);
        return;
    }
    overall.insert(s!(stat), value);
}

fn insert_recent(recent: &mut Map<String, Value>, key: &str, value: Value) {
    let Some((stat, suffix)) = split_key(key) else { return };

    if SIMPLE.contains(&stat) {
        match suffix {
            None => { recent.insert(s!(stat), value); }
            Some(Suffix::Differential) => {
                child(recent, "physicals").insert(format!("{stat}_differential"), value);
            }
            Some(Suffix::PerMin) => {}
        }
        return;
    }
    if PHYSICALS.contains(&stat) && suffix == Some(Suffix::Differential) {
        child(recent, "physicals").insert(format!("{stat}_differential"), value);
        return;
    }
    if suffix == Some(Suffix::PerMin) {
        let per_min = child(recent, "per_min");
        match split_category(stat) {
            Some((cat, sub)) => { child(per_min, cat).insert(s!(sub), value); }
            None => { per_min.insert(s!(stat), value); }
        }
        return;
    }
    if let Some((cat, sub)) = split_category(stat) {
        child(recent, cat).insert(s!(sub), value);
        return;
    }
    recent.insert(s!(stat), value);
}
