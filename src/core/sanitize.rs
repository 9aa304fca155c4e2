// src/core/sanitize.rs

use deunicode::deunicode;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Turn a free-form label into a safe file stem.
/// Falls back to `fallback` when nothing usable is left.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

/// Transliterate to ASCII (`Jiří Procházka` → `Jiri Prochazka`, `Хабиб` → `Khabib`).
pub fn fold_diacritics(s: &str) -> String {
    deunicode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_common_fighter_names() {
        assert_eq!(fold_diacritics("Jiří Procházka"), "Jiri Prochazka");
        assert_eq!(fold_diacritics("Mateusz Gamrot"), "Mateusz Gamrot");
        assert_eq!(fold_diacritics("Jan Błachowicz"), "Jan Blachowicz");
        assert_eq!(fold_diacritics("Sal D\u{2019}Amato"), "Sal D'Amato");
        assert_eq!(fold_diacritics("Ștefan Struve"), "Stefan Struve");
        assert_eq!(fold_diacritics("Хабиб"), "Khabib");
        assert_eq!(fold_diacritics("Junichirō Kamijō"), "Junichiro Kamijo");
    }

    #[test]
    fn filename_sanitizing_keeps_ascii_words() {
        assert_eq!(sanitize_filename("UFC 300: Pereira vs. Hill", "event"), "UFC_300_Pereira_vs_Hill");
        assert_eq!(sanitize_filename("???", "event"), "event");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(normalize_ws("  a \u{a0}&\n b "), "a & b");
    }
}
