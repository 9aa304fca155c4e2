// src/core/fuzzy.rs
// Token-set string similarity for matching venue strings across sites,
// e.g. "Las Vegas, Nevada, USA" vs "UFC APEX, Las Vegas, Nevada".

use std::collections::BTreeSet;

use super::sanitize::fold_diacritics;

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb { prev[j] + 1 } else { cur[j].max(prev[j + 1]) };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Indel similarity in 0..=100. Empty input on either side scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let total = (a.len() + b.len()) as f64;
    let score = 100.0 * 2.0 * lcs_len(&a, &b) as f64 / total;
    score.round() as u8
}

/// Transliterate to ASCII, lowercase, non-alphanumerics to spaces,
/// de-duplicated tokens in sorted order. Accented letters keep their base
/// letter (`São` → `sao`) instead of being dropped.
fn tokens(s: &str) -> BTreeSet<String> {
    let cleaned: String = fold_diacritics(s)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().map(str::to_string).collect()
}

fn joined<'a>(parts: impl Iterator<Item = &'a String>) -> String {
    parts.map(String::as_str).collect::<Vec<_>>().join(" ")
}

/// Compare the shared tokens against each side's full token set and
/// keep the best score, so extra words on one side don't hurt.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0;
    }

    let sect = joined(ta.intersection(&tb));
    let only_a = joined(ta.difference(&tb));
    let only_b = joined(tb.difference(&ta));

    let with = |diff: &str| {
        if sect.is_empty() { s!(diff) }
        else if diff.is_empty() { sect.clone() }
        else { format!("{sect} {diff}") }
    };
    let combined_a = with(&only_a);
    let combined_b = with(&only_b);

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}
