//! Curated field-mapping rows.
//!
//! A [`FieldMapping`] links a raw field name observed on a real document
//! template to a canonical path, tagged with the matching strategy that
//! produced it and a confidence score. Accepted rows are persisted
//! append-only; inserting a duplicate natural key is a no-op.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Matching-strategy tier. Ordering is by strength: an exact match
/// outranks any pattern match, which outranks semantic, which outranks
/// fuzzy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Fuzzy,
    Semantic,
    Pattern,
    Exact,
}

impl MatchType {
    /// Fuzzy-tier results need curator confirmation; every other tier may
    /// be accepted into configuration automatically.
    #[must_use]
    pub fn auto_acceptable(&self) -> bool {
        !matches!(self, Self::Fuzzy)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Pattern => "pattern",
            Self::Semantic => "semantic",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A curated source-field to canonical-path mapping for one manufacturer
/// template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub manufacturer_id: u32,
    pub template_id: String,
    /// Raw field name as it appears on the document template.
    pub source_field: String,
    pub target_canonical_path: String,
    /// Bounded to [0, 1]; use [`FieldMapping::new`] to clamp.
    pub confidence: f64,
    pub match_type: MatchType,
    #[serde(default)]
    pub usage_count: u64,
    pub created_by: String,
}

impl FieldMapping {
    /// Builds a row with the confidence clamped into [0, 1].
    #[must_use]
    pub fn new(
        manufacturer_id: u32,
        template_id: impl Into<String>,
        source_field: impl Into<String>,
        target_canonical_path: impl Into<String>,
        confidence: f64,
        match_type: MatchType,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            manufacturer_id,
            template_id: template_id.into(),
            source_field: source_field.into(),
            target_canonical_path: target_canonical_path.into(),
            confidence: confidence.clamp(0.0, 1.0),
            match_type,
            usage_count: 0,
            created_by: created_by.into(),
        }
    }

    /// The natural key persistence is idempotent on.
    #[must_use]
    pub fn natural_key(&self) -> (u32, &str, &str, &str) {
        (
            self.manufacturer_id,
            self.template_id.as_str(),
            self.source_field.as_str(),
            self.target_canonical_path.as_str(),
        )
    }
}
