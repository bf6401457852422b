//! String normalization and similarity scoring.

use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_winkler_similarity;
use rapidfuzz::distance::levenshtein::normalized_similarity as levenshtein_similarity;

const LEVENSHTEIN_WEIGHT: f64 = 0.4;
const JARO_WINKLER_WEIGHT: f64 = 0.4;
const TOKEN_OVERLAP_WEIGHT: f64 = 0.2;

/// Normalizes a raw field name for comparison: lowercased, punctuation
/// collapsed to single spaces.
#[must_use]
pub fn normalize_field_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token set of a normalized name, stopwords removed.
#[must_use]
pub fn token_set(raw: &str) -> BTreeSet<String> {
    normalize_field_name(raw)
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(str::to_string)
        .collect()
}

fn is_stopword(token: &str) -> bool {
    matches!(
        token,
        "of" | "and" | "the" | "to" | "for" | "in" | "on" | "at" | "with" | "by" | "from"
            | "or" | "a" | "an" | "if" | "please"
    )
}

/// Jaccard overlap of two token sets.
#[must_use]
pub fn token_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    intersection / union
}

/// Blended similarity of two raw field names: normalized edit distance,
/// Jaro-Winkler, and token-set overlap, weighted 0.4/0.4/0.2.
#[must_use]
pub fn blended_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize_field_name(a);
    let norm_b = normalize_field_name(b);
    if norm_a.is_empty() || norm_b.is_empty() {
        return 0.0;
    }
    let levenshtein = levenshtein_similarity(norm_a.chars(), norm_b.chars());
    let jaro = jaro_winkler_similarity(norm_a.chars(), norm_b.chars());
    let tokens = token_overlap(&token_set(a), &token_set(b));
    LEVENSHTEIN_WEIGHT * levenshtein + JARO_WINKLER_WEIGHT * jaro + TOKEN_OVERLAP_WEIGHT * tokens
}
