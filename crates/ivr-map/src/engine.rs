//! Candidate generation and ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ivr_model::MatchType;

use crate::catalog::CanonicalCatalog;
use crate::patterns::{PatternRule, builtin_rules};
use crate::score::{blended_similarity, normalize_field_name, token_set};

/// Tunable confidence defaults. The tier values are inferred operating
/// points, not fixed constants; `strict()` and `relaxed()` shift the
/// fuzzy floor for curation sessions that want fewer or more proposals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchThresholds {
    /// Confidence assigned to a normalized match on the path or label.
    pub exact: f64,
    /// Confidence assigned to a known-variant match.
    pub exact_variant: f64,
    /// Confidence assigned to a pattern-family hit.
    pub pattern: f64,
    /// Confidence assigned to a synonym-overlap hit.
    pub semantic: f64,
    /// Minimum blended similarity for a fuzzy candidate to be emitted.
    pub fuzzy_floor: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            exact: 1.0,
            exact_variant: 0.95,
            pattern: 0.90,
            semantic: 0.85,
            fuzzy_floor: 0.4,
        }
    }
}

impl MatchThresholds {
    /// Fewer proposals: only strong fuzzy candidates surface.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            fuzzy_floor: 0.6,
            ..Self::default()
        }
    }

    /// More proposals for exploratory curation.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            fuzzy_floor: 0.3,
            ..Self::default()
        }
    }
}

/// One ranked proposal linking a raw template field to a canonical path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub path: String,
    pub confidence: f64,
    pub match_type: MatchType,
}

impl MatchCandidate {
    /// Fuzzy-tier candidates are surfaced for curator confirmation only;
    /// every other tier may enter configuration automatically.
    #[must_use]
    pub fn auto_acceptable(&self) -> bool {
        self.match_type.auto_acceptable()
    }
}

/// Engine proposing canonical-path candidates for raw field names.
///
/// Strategies run strongest-first per catalog entry: a literal variant
/// match short-circuits pattern matching, which short-circuits semantic
/// keyword overlap, which short-circuits the fuzzy blend. Each entry
/// contributes at most one candidate.
pub struct MatchEngine {
    catalog: CanonicalCatalog,
    rules: Vec<PatternRule>,
    thresholds: MatchThresholds,
}

impl MatchEngine {
    #[must_use]
    pub fn new(catalog: CanonicalCatalog, thresholds: MatchThresholds) -> Self {
        Self {
            catalog,
            rules: builtin_rules(),
            thresholds,
        }
    }

    /// Engine over the built-in catalog with default thresholds.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(CanonicalCatalog::builtin(), MatchThresholds::default())
    }

    /// Proposes candidates for one raw field name, ranked by tier then
    /// confidence; ties break on lexical path order for determinism.
    #[must_use]
    pub fn candidates(&self, raw_field: &str) -> Vec<MatchCandidate> {
        let normalized = normalize_field_name(raw_field);
        if normalized.is_empty() {
            return Vec::new();
        }
        let raw_tokens = token_set(raw_field);

        let mut candidates = Vec::new();
        for entry in &self.catalog.entries {
            let candidate = self
                .exact_candidate(&normalized, entry)
                .or_else(|| self.pattern_candidate(raw_field, entry))
                .or_else(|| self.semantic_candidate(&raw_tokens, entry))
                .or_else(|| self.fuzzy_candidate(raw_field, entry));
            if let Some(candidate) = candidate {
                candidates.push(candidate);
            }
        }

        candidates.sort_by(|a, b| {
            b.match_type
                .cmp(&a.match_type)
                .then_with(|| {
                    b.confidence
                        .partial_cmp(&a.confidence)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.path.cmp(&b.path))
        });
        debug!(
            field = raw_field,
            candidates = candidates.len(),
            "match candidates proposed"
        );
        candidates
    }

    /// The single best candidate, if any.
    #[must_use]
    pub fn best_match(&self, raw_field: &str) -> Option<MatchCandidate> {
        self.candidates(raw_field).into_iter().next()
    }

    fn exact_candidate(
        &self,
        normalized: &str,
        entry: &crate::catalog::CatalogEntry,
    ) -> Option<MatchCandidate> {
        if normalize_field_name(&entry.path) == normalized
            || normalize_field_name(&entry.label) == normalized
        {
            return Some(MatchCandidate {
                path: entry.path.clone(),
                confidence: self.thresholds.exact,
                match_type: MatchType::Exact,
            });
        }
        if entry
            .variants
            .iter()
            .any(|variant| normalize_field_name(variant) == normalized)
        {
            return Some(MatchCandidate {
                path: entry.path.clone(),
                confidence: self.thresholds.exact_variant,
                match_type: MatchType::Exact,
            });
        }
        None
    }

    fn pattern_candidate(
        &self,
        raw_field: &str,
        entry: &crate::catalog::CatalogEntry,
    ) -> Option<MatchCandidate> {
        self.rules
            .iter()
            .find(|rule| rule.path == entry.path && rule.regex.is_match(raw_field))
            .map(|_| MatchCandidate {
                path: entry.path.clone(),
                confidence: self.thresholds.pattern,
                match_type: MatchType::Pattern,
            })
    }

    /// Semantic hit: the raw name shares at least two of the entry's
    /// domain keywords (or the entry's single keyword).
    fn semantic_candidate(
        &self,
        raw_tokens: &std::collections::BTreeSet<String>,
        entry: &crate::catalog::CatalogEntry,
    ) -> Option<MatchCandidate> {
        if entry.synonyms.is_empty() {
            return None;
        }
        let shared = entry
            .synonyms
            .iter()
            .filter(|synonym| raw_tokens.contains(synonym.as_str()))
            .count();
        let needed = 2.min(entry.synonyms.len());
        if shared >= needed {
            return Some(MatchCandidate {
                path: entry.path.clone(),
                confidence: self.thresholds.semantic,
                match_type: MatchType::Semantic,
            });
        }
        None
    }

    fn fuzzy_candidate(
        &self,
        raw_field: &str,
        entry: &crate::catalog::CatalogEntry,
    ) -> Option<MatchCandidate> {
        let best = entry
            .variants
            .iter()
            .map(String::as_str)
            .chain([entry.path.as_str(), entry.label.as_str()])
            .map(|spelling| blended_similarity(raw_field, spelling))
            .fold(0.0_f64, f64::max);
        if best >= self.thresholds.fuzzy_floor {
            return Some(MatchCandidate {
                path: entry.path.clone(),
                confidence: best,
                match_type: MatchType::Fuzzy,
            });
        }
        None
    }
}
