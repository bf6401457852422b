//! Parametrized pattern families.
//!
//! Some template fields belong to recognizable families rather than fixed
//! spellings: coded-field lists ("ICD-10 Diagnosis Code(s)", "List CPTs"),
//! size-range fields ("Graft Size 4x4"), numbered insurance slots. A
//! family hit is stronger evidence than keyword overlap but weaker than a
//! known literal variant.

use regex::Regex;

/// One compiled family rule mapping raw names onto a canonical path.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub family: &'static str,
    pub path: &'static str,
    pub regex: Regex,
}

fn rule(family: &'static str, path: &'static str, pattern: &str) -> PatternRule {
    PatternRule {
        family,
        path,
        regex: Regex::new(pattern).expect("valid built-in pattern"),
    }
}

/// The built-in family rules, checked in order.
#[must_use]
pub fn builtin_rules() -> Vec<PatternRule> {
    vec![
        rule(
            "icd10-codes",
            "clinical.diagnosis_codes",
            r"(?i)icd[\s_-]*10|diagnosis\s+codes?",
        ),
        rule(
            "cpt-codes",
            "clinical.procedure_codes",
            r"(?i)\bcpts?\b|procedure\s+codes?",
        ),
        rule(
            "q-codes",
            "order.product_code",
            r"(?i)\bq[\s_-]?codes?\b|hcpcs",
        ),
        rule(
            "size-range",
            "clinical.wound_area",
            r"(?i)\b\d+\s*x\s*\d+\b|wound\s+size|graft\s+size",
        ),
        rule(
            "pos-code",
            "clinical.place_of_service",
            r"(?i)\bpos\s*\d{2}\b|place\s+of\s+service",
        ),
    ]
}
