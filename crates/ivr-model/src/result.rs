//! Mapping results, validation issues, and output fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ManufacturerSummary;
use crate::value::FieldValue;

/// Classification of a data-quality or configuration finding. None of
/// these abort a mapping; they flow through the validation report so the
/// calling workflow decides whether to block, prompt, or proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// A required field stayed unresolved after fallback and computation.
    MissingRequiredField,
    /// Two canonical keys target the same output name.
    FieldCollision,
    /// A field's only known source mappings are fuzzy-tier.
    LowConfidenceMatch,
    /// A computed field references an unresolvable key.
    InvalidComputation,
    /// The configuration itself is inconsistent (e.g. a required field
    /// with no spec).
    ConfigDefect,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::FieldCollision => "field_collision",
            Self::LowConfidenceMatch => "low_confidence_match",
            Self::InvalidComputation => "invalid_computation",
            Self::ConfigDefect => "config_defect",
        };
        write!(f, "{label}")
    }
}

/// One validation finding, anchored to a canonical field where possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(code: IssueCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

/// Outcome of validating one mapping. `valid` reflects required-field
/// coverage only; collisions and low-confidence warnings never flip it on
/// their own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
    #[serde(default)]
    pub warnings: Vec<ValidationIssue>,
}

/// Required-field coverage of a mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completeness {
    /// `filled / total * 100`, rounded to the nearest whole percent.
    pub percentage: f64,
    pub filled: usize,
    pub total: usize,
    #[serde(default)]
    pub missing_required: Vec<String>,
}

/// Everything a mapping run produces: the resolved canonical data, its
/// validation outcome, coverage, and the configuration subset the caller
/// needs to create a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    pub data: BTreeMap<String, FieldValue>,
    pub validation: ValidationReport,
    pub completeness: Completeness,
    pub manufacturer: ManufacturerSummary,
}

/// The document service's string-or-bool value union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
    Bool(bool),
    Text(String),
}

impl OutputValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// One prefill entry in the document service's field-list shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputField {
    pub name: String,
    pub default_value: OutputValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_field_serializes_to_service_shape() {
        let field = OutputField {
            name: "Patient Name".to_string(),
            default_value: OutputValue::text("Jane Doe"),
        };
        let json = serde_json::to_string(&field).expect("serialize output field");
        assert_eq!(
            json,
            r#"{"name":"Patient Name","default_value":"Jane Doe"}"#
        );
    }

    #[test]
    fn output_value_union_accepts_bools() {
        let value: OutputValue = serde_json::from_str("true").expect("deserialize bool");
        assert_eq!(value, OutputValue::Bool(true));
    }

    #[test]
    fn report_round_trips() {
        let report = ValidationReport {
            valid: false,
            errors: vec![ValidationIssue::new(
                IssueCode::MissingRequiredField,
                "provider.npi",
                "required field 'provider.npi' could not be resolved",
            )],
            warnings: vec![],
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: ValidationReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
