// src/core/convert.rs
// Cell-level conversions for the stats pages. All of them are total:
// bad input yields a zero/None rather than an error, since one odd cell
// shouldn't drop a whole fight.

use chrono::NaiveDate;

/// `"12 of 30"` → `(12, 30)`.
pub fn parse_x_of_y(text: &str) -> Option<(u32, u32)> {
    let (landed, attempted) = text.split_once("of")?;
    let landed = landed.trim().parse().ok()?;
    let attempted = attempted.trim().parse().ok()?;
    Some((landed, attempted))
}

fn is_blank(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t.chars().all(|c| c == '-')
}

/// Plain integer cell. `---` and garbage count as 0.
pub fn parse_count(text: &str) -> u32 {
    if is_blank(text) { return 0; }
    text.trim().parse().unwrap_or(0)
}

/// `"56%"` → 56.0. `---` and garbage become 0.0.
pub fn parse_pct(text: &str) -> f64 {
    if is_blank(text) { return 0.0; }
    text.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0)
}

/// `"M:SS"` → seconds. `---` and garbage become 0.
pub fn parse_clock(text: &str) -> u32 {
    if is_blank(text) { return 0; }
    let Some((m, s)) = text.trim().split_once(':') else { return 0 };
    match (m.trim().parse::<u32>(), s.trim().parse::<u32>()) {
        (Ok(m), Ok(s)) => m * 60 + s,
        _ => 0,
    }
}

/// `5' 11"` or `5'11"` → 71.
pub fn height_to_inches(text: &str) -> Option<u32> {
    let (feet, rest) = text.trim().split_once('\'')?;
    let feet: u32 = feet.trim().parse().ok()?;
    let inches = first_int(rest)?;
    Some(feet * 12 + inches)
}

/// First run of ASCII digits in the text (`"145 lbs."` → 145).
pub fn first_int(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// `"Oct 01, 1991"` → `"01/10/1991"`. Unparseable input is returned unchanged.
pub fn dob_to_ddmmyyyy(text: &str) -> Option<String> {
    let t = text.trim();
    if t.is_empty() { return None; }
    match parse_short_date(t) {
        Some(d) => Some(d.format("%d/%m/%Y").to_string()),
        None => Some(s!(t)),
    }
}

/// Drop a parenthesised note from one record component (`"0 (1 NC)"` → `"0"`).
pub fn clean_record_part(part: &str) -> String {
    match (part.find('('), part.rfind(')')) {
        (Some(open), Some(close)) if close > open => {
            let mut out = s!(part[..open].trim_end());
            out.push_str(&part[close + 1..]);
            out.trim().to_string()
        }
        _ => part.trim().to_string(),
    }
}

/// `"Record: 19-4-0 (1 NC)"` → `(19, 4, 0)`. Anything not shaped W-L-D is `(0, 0, 0)`.
pub fn parse_record(text: &str) -> (u32, u32, u32) {
    let body = text.trim().trim_start_matches("Record:").trim();
    let parts: Vec<String> = body.split('-').map(clean_record_part).collect();
    if parts.len() != 3 {
        return (0, 0, 0);
    }
    match (parts[0].parse(), parts[1].parse(), parts[2].parse()) {
        (Ok(w), Ok(l), Ok(d)) => (w, l, d),
        _ => (0, 0, 0),
    }
}

/// `"February 01, 2025"`
pub fn parse_long_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%B %d, %Y").ok()
}

/// `"Oct 01, 1991"`
pub fn parse_short_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%b %d, %Y").ok()
}

/// `"01/02/2025"` (day first)
pub fn parse_ddmmyyyy(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").ok()
}
