//! Output field conversion.
//!
//! Pure transform of resolved data into the document service's
//! `{name, default_value}` field list. Only canonical keys with a
//! registered output target are emitted; everything else is dropped.

use std::collections::BTreeMap;

use ivr_model::{
    FieldValue, IssueCode, ManufacturerConfig, OutputField, OutputValue, Transform,
    ValidationIssue,
};

/// Renders resolved values into output fields, in target declaration
/// order. Two canonical keys targeting the same output name is a
/// collision: both are evaluated, the first-registered key wins, and the
/// conflict is returned as a validation issue.
#[must_use]
pub fn to_output_fields(
    data: &BTreeMap<String, FieldValue>,
    config: &ManufacturerConfig,
) -> (Vec<OutputField>, Vec<ValidationIssue>) {
    let mut fields = Vec::new();
    let mut issues = Vec::new();
    let mut claimed: BTreeMap<&str, &str> = BTreeMap::new();

    for target in &config.targets {
        let Some(value) = data.get(&target.canonical) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if let Some(first) = claimed.get(target.output.as_str()) {
            issues.push(ValidationIssue::new(
                IssueCode::FieldCollision,
                target.canonical.clone(),
                format!(
                    "output field '{}' already filled from '{first}'; '{}' ignored",
                    target.output, target.canonical
                ),
            ));
            continue;
        }
        claimed.insert(target.output.as_str(), target.canonical.as_str());
        fields.push(OutputField {
            name: target.output.clone(),
            default_value: render(value, &target.canonical, config),
        });
    }

    (fields, issues)
}

/// Booleans render `Yes`/`No` for labeled-choice fields and literal
/// `true`/`false` strings for independent checkboxes; lists join with
/// `", "`.
fn render(value: &FieldValue, canonical: &str, config: &ManufacturerConfig) -> OutputValue {
    if let FieldValue::Bool(flag) = value {
        let labeled = config
            .field_specs
            .get(canonical)
            .is_some_and(|spec| spec.transform == Transform::BooleanLabel);
        let text = if labeled {
            if *flag { "Yes" } else { "No" }
        } else if *flag {
            "true"
        } else {
            "false"
        };
        return OutputValue::text(text);
    }
    OutputValue::text(value.to_text())
}
