//! Fallback-chain and exclusive-group resolution.

use std::collections::BTreeMap;

use tracing::debug;

use ivr_model::{
    CanonicalRecord, EngineError, FieldSpec, FieldValue, IssueCode, ManufacturerConfig,
    Transform, ValidationIssue,
};

use crate::compute;
use crate::transform::apply_transform;

/// Resolution output: the resolved data map plus findings recorded along
/// the way.
#[derive(Debug, Clone, Default)]
pub struct ResolvedFields {
    pub data: BTreeMap<String, FieldValue>,
    pub issues: Vec<ValidationIssue>,
}

/// Resolves every configured field spec and exclusive group against the
/// record. Missing optional data never fails; the only error is a
/// structurally invalid configuration.
pub fn resolve_fields(
    record: &CanonicalRecord,
    config: &ManufacturerConfig,
) -> Result<ResolvedFields, EngineError> {
    let mut resolved = ResolvedFields::default();

    for (key, spec) in &config.field_specs {
        // Group members resolve as a unit below, never independently.
        if config.is_group_member(key) {
            debug!(field = %key, "skipping group member with field spec");
            continue;
        }
        match resolve_spec(key, spec, record, config)? {
            Some(value) => {
                resolved.data.insert(key.clone(), value);
            }
            None => {
                if spec.required {
                    resolved.issues.push(ValidationIssue::new(
                        IssueCode::MissingRequiredField,
                        key.clone(),
                        format!("required field '{key}' could not be resolved"),
                    ));
                }
                debug!(field = %key, required = spec.required, "field unresolved");
            }
        }
    }

    for (group_id, group) in &config.groups {
        let selector = record
            .get(&group.selector)
            .map(FieldValue::to_text)
            .unwrap_or_default();
        let selector = selector.trim();
        let mut selected = None;
        for member in &group.members {
            let active = !selector.is_empty() && member.value == selector;
            if active {
                selected = Some(member.field.as_str());
            }
            resolved
                .data
                .insert(member.field.clone(), FieldValue::Bool(active));
        }
        debug!(group = %group_id, selected = selected.unwrap_or("<none>"), "group resolved");
    }

    Ok(resolved)
}

fn resolve_spec(
    key: &str,
    spec: &FieldSpec,
    record: &CanonicalRecord,
    config: &ManufacturerConfig,
) -> Result<Option<FieldValue>, EngineError> {
    let value = match spec.transform {
        // Concat joins every non-empty source instead of taking the first.
        Transform::Concat => {
            let parts: Vec<String> = spec
                .sources
                .iter()
                .filter_map(|source| record.get(source))
                .filter(|value| !value.is_empty())
                .map(FieldValue::to_text)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(FieldValue::Text(parts.join(" ")))
            }
        }
        _ => first_non_empty(&spec.sources, record),
    };

    let value = match (value, spec.transform) {
        (Some(value), _) => Some(value),
        (None, Transform::Computed) => {
            let computation =
                spec.computation
                    .as_ref()
                    .ok_or_else(|| EngineError::InvalidConfig {
                        manufacturer: config.name.clone(),
                        message: format!("field '{key}' is computed but declares no computation"),
                    })?;
            let computed = compute::evaluate(computation, record);
            if computed.is_none() {
                debug!(field = %key, "computation references unresolvable keys");
            }
            computed
        }
        (None, _) => None,
    };

    Ok(value.map(|value| apply_transform(value, spec.transform)))
}

fn first_non_empty(sources: &[String], record: &CanonicalRecord) -> Option<FieldValue> {
    sources
        .iter()
        .filter_map(|source| record.get(source))
        .find(|value| !value.is_empty())
        .cloned()
}
