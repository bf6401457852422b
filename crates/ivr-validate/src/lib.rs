#![deny(unsafe_code)]

//! Validation and completeness reporting.
//!
//! The reporter looks at a resolved data map next to its configuration
//! and answers two questions: can this mapping be submitted (`valid`,
//! driven solely by required-field coverage), and how filled-in is it
//! (`completeness`). Data-quality findings are reported, never thrown.

use std::collections::BTreeMap;

use tracing::debug;

use ivr_model::{
    Completeness, FieldMapping, FieldValue, IssueCode, ManufacturerConfig, MatchType,
    ValidationIssue, ValidationReport,
};

/// True when the map holds a non-empty value for the key. Empty string,
/// empty array, and absent are identical.
#[must_use]
pub fn is_filled(data: &BTreeMap<String, FieldValue>, key: &str) -> bool {
    data.get(key).is_some_and(|value| !value.is_empty())
}

/// Evaluates one resolved mapping.
///
/// `resolver_issues` are findings recorded during resolution (missing
/// required fields); they are merged and deduplicated against the
/// reporter's own required-coverage pass so each field is reported once,
/// in `required_fields` order.
#[must_use]
pub fn evaluate(
    data: &BTreeMap<String, FieldValue>,
    config: &ManufacturerConfig,
    known_mappings: &[FieldMapping],
    resolver_issues: &[ValidationIssue],
) -> (ValidationReport, Completeness) {
    let required = required_keys(config);
    let missing: Vec<String> = required
        .iter()
        .filter(|key| !is_filled(data, key))
        .cloned()
        .collect();

    let mut errors: Vec<ValidationIssue> = missing
        .iter()
        .map(|key| {
            ValidationIssue::new(
                IssueCode::MissingRequiredField,
                key.clone(),
                format!("required field '{key}' could not be resolved"),
            )
        })
        .collect();
    for issue in resolver_issues {
        let duplicate = errors
            .iter()
            .any(|known| known.code == issue.code && known.field == issue.field);
        if !duplicate {
            errors.push(issue.clone());
        }
    }

    let mut warnings = low_confidence_warnings(config, known_mappings);
    warnings.extend(config_defects(config));

    let completeness = completeness(data, config, missing);
    let valid = completeness.missing_required.is_empty();
    debug!(
        valid,
        errors = errors.len(),
        warnings = warnings.len(),
        percentage = completeness.percentage,
        "mapping evaluated"
    );
    (
        ValidationReport {
            valid,
            errors,
            warnings,
        },
        completeness,
    )
}

/// Required keys in reporting order: `required_fields` first, then any
/// spec marked required that the list omits.
fn required_keys(config: &ManufacturerConfig) -> Vec<String> {
    let mut keys: Vec<String> = config.required_fields.clone();
    for (key, spec) in &config.field_specs {
        if spec.required && !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}

/// A field whose only known source mappings are fuzzy-tier gets a
/// low-confidence warning; it never blocks on its own.
fn low_confidence_warnings(
    config: &ManufacturerConfig,
    known_mappings: &[FieldMapping],
) -> Vec<ValidationIssue> {
    let mut warnings = Vec::new();
    for key in config.field_specs.keys() {
        let rows: Vec<&FieldMapping> = known_mappings
            .iter()
            .filter(|row| row.target_canonical_path == *key)
            .collect();
        if !rows.is_empty()
            && rows.iter().all(|row| row.match_type == MatchType::Fuzzy)
        {
            warnings.push(ValidationIssue::new(
                IssueCode::LowConfidenceMatch,
                key.clone(),
                format!("field '{key}' is backed only by fuzzy-tier mappings"),
            ));
        }
    }
    warnings
}

/// Configuration inconsistencies worth surfacing to operators.
fn config_defects(config: &ManufacturerConfig) -> Vec<ValidationIssue> {
    let mut warnings = Vec::new();
    for key in &config.required_fields {
        if !config.field_specs.contains_key(key) && !config.is_group_member(key) {
            warnings.push(ValidationIssue::new(
                IssueCode::ConfigDefect,
                key.clone(),
                format!("required field '{key}' has no field spec"),
            ));
        }
    }
    for target in &config.targets {
        if !config.field_specs.contains_key(&target.canonical)
            && !config.is_group_member(&target.canonical)
        {
            warnings.push(ValidationIssue::new(
                IssueCode::ConfigDefect,
                target.canonical.clone(),
                format!(
                    "output target '{}' references unconfigured field '{}'",
                    target.output, target.canonical
                ),
            ));
        }
    }
    warnings
}

/// Coverage over every configured field (specs plus group members).
fn completeness(
    data: &BTreeMap<String, FieldValue>,
    config: &ManufacturerConfig,
    missing_required: Vec<String>,
) -> Completeness {
    let mut configured: std::collections::BTreeSet<&str> =
        config.field_specs.keys().map(String::as_str).collect();
    for group in config.groups.values() {
        configured.extend(group.member_fields());
    }
    let total = configured.len();
    let filled = configured
        .iter()
        .filter(|key| is_filled(data, key))
        .count();
    let percentage = if total > 0 {
        (filled as f64 / total as f64 * 100.0).round()
    } else {
        0.0
    };
    Completeness {
        percentage,
        filled,
        total,
        missing_required,
    }
}
