//! TOML definition schema and structural validation.
//!
//! One definition file describes one (manufacturer, document type)
//! configuration:
//!
//! ```toml
//! id = 4
//! name = "BioWound Solutions"
//! aliases = ["BioWound"]
//! document_type = "ivr"
//! template_id = "tpl_biowound_ivr"
//! signature_required = true
//! required_fields = ["patient.full_name", "provider.npi"]
//!
//! [[target]]
//! canonical = "patient.full_name"
//! output = "Patient Name"
//!
//! [fields."patient.full_name"]
//! sources = ["patient.full_name", "patient.name"]
//! required = true
//!
//! [groups.place_of_service]
//! selector = "clinical.place_of_service"
//! members = [
//!     { field = "clinical.pos_11", value = "11" },
//!     { field = "clinical.pos_12", value = "12" },
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use ivr_model::{
    DocumentType, ExclusiveGroup, FieldSpec, ManufacturerConfig, TargetField, Transform,
};

use crate::error::RegistryError;

/// Raw deserialization target for a definition file.
#[derive(Debug, Deserialize)]
pub struct Definition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub document_type: String,
    pub template_id: String,
    #[serde(default)]
    pub signature_required: bool,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetField>,
    #[serde(default, rename = "fields")]
    pub field_specs: BTreeMap<String, FieldSpec>,
    #[serde(default)]
    pub groups: BTreeMap<String, ExclusiveGroup>,
}

/// Parse and validate one definition file into a [`ManufacturerConfig`].
pub fn load_definition(path: &Path) -> Result<ManufacturerConfig, RegistryError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| RegistryError::io(path, source))?;
    let definition: Definition = toml::from_str(&contents).map_err(|source| {
        RegistryError::Toml {
            path: path.to_path_buf(),
            source,
        }
    })?;
    into_config(definition, path)
}

fn into_config(
    definition: Definition,
    path: &Path,
) -> Result<ManufacturerConfig, RegistryError> {
    let document_type: DocumentType = definition
        .document_type
        .parse()
        .map_err(|message: String| RegistryError::invalid(path, message))?;

    if definition.name.trim().is_empty() {
        return Err(RegistryError::invalid(path, "manufacturer name is empty"));
    }
    if definition.template_id.trim().is_empty() {
        return Err(RegistryError::invalid(path, "template_id is empty"));
    }

    let config = ManufacturerConfig {
        id: definition.id,
        name: definition.name,
        aliases: definition.aliases,
        document_type,
        template_id: definition.template_id,
        signature_required: definition.signature_required,
        required_fields: definition.required_fields,
        field_specs: definition.field_specs,
        targets: definition.targets,
        groups: definition.groups,
    };
    validate_config(&config, path)?;
    Ok(config)
}

/// Structural validation. Violations here make the definition unusable
/// and are fatal; softer inconsistencies (duplicate output names, required
/// fields without specs) are tolerated at load time and surfaced by the
/// reporter during mapping.
fn validate_config(config: &ManufacturerConfig, path: &Path) -> Result<(), RegistryError> {
    for (key, spec) in &config.field_specs {
        if spec.transform == Transform::Computed && spec.computation.is_none() {
            return Err(RegistryError::invalid(
                path,
                format!("field '{key}' is computed but declares no computation"),
            ));
        }
        if let Some(group_id) = &spec.group {
            let Some(group) = config.groups.get(group_id) else {
                return Err(RegistryError::invalid(
                    path,
                    format!("field '{key}' references unknown group '{group_id}'"),
                ));
            };
            if !group.member_fields().any(|field| field == key) {
                return Err(RegistryError::invalid(
                    path,
                    format!("field '{key}' is not a member of group '{group_id}'"),
                ));
            }
        } else if spec.transform != Transform::Computed && spec.sources.is_empty() {
            return Err(RegistryError::invalid(
                path,
                format!("field '{key}' has no sources"),
            ));
        }
    }

    for (group_id, group) in &config.groups {
        if group.selector.trim().is_empty() {
            return Err(RegistryError::invalid(
                path,
                format!("group '{group_id}' has an empty selector"),
            ));
        }
        if group.members.is_empty() {
            return Err(RegistryError::invalid(
                path,
                format!("group '{group_id}' has no members"),
            ));
        }
        for member in &group.members {
            // Members resolve through the selector alone; a spec on a
            // member is only a membership tag and must say so.
            if let Some(spec) = config.field_specs.get(&member.field)
                && spec.group.as_deref() != Some(group_id.as_str())
            {
                return Err(RegistryError::invalid(
                    path,
                    format!(
                        "group '{group_id}' member '{}' has a field spec that does not \
                         declare the group",
                        member.field
                    ),
                ));
            }
            if config.output_name(&member.field).is_none() {
                return Err(RegistryError::invalid(
                    path,
                    format!(
                        "group '{group_id}' member '{}' has no output target",
                        member.field
                    ),
                ));
            }
        }
    }

    let mut seen_outputs = BTreeMap::new();
    for target in &config.targets {
        if let Some(first) = seen_outputs.insert(&target.output, &target.canonical) {
            warn!(
                manufacturer = %config.name,
                output = %target.output,
                first = %first,
                second = %target.canonical,
                "duplicate output target; first-registered key wins at conversion"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("ivr_def_{stamp}.toml"));
        std::fs::write(&path, contents).expect("write definition");
        path
    }

    #[test]
    fn minimal_definition_parses() {
        let path = write_temp(
            r#"
id = 9
name = "Sample Manufacturer"
document_type = "ivr"
template_id = "tpl_sample"

[[target]]
canonical = "patient.full_name"
output = "Patient Name"

[fields."patient.full_name"]
sources = ["patient.full_name"]
required = true
"#,
        );
        let config = load_definition(&path).expect("load definition");
        assert_eq!(config.document_type, DocumentType::Ivr);
        assert_eq!(config.output_name("patient.full_name"), Some("Patient Name"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn computed_without_computation_is_rejected() {
        let path = write_temp(
            r#"
id = 9
name = "Sample Manufacturer"
document_type = "ivr"
template_id = "tpl_sample"

[fields."clinical.wound_area"]
transform = "computed"
"#,
        );
        let error = load_definition(&path).expect_err("should reject");
        assert!(matches!(error, RegistryError::InvalidDefinition { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn member_spec_without_group_tag_is_rejected() {
        let path = write_temp(
            r#"
id = 9
name = "Sample Manufacturer"
document_type = "ivr"
template_id = "tpl_sample"

[[target]]
canonical = "clinical.pos_11"
output = "POS 11"

[fields."clinical.pos_11"]
sources = ["clinical.pos_11"]

[groups.place_of_service]
selector = "clinical.place_of_service"
members = [{ field = "clinical.pos_11", value = "11" }]
"#,
        );
        let error = load_definition(&path).expect_err("should reject");
        assert!(matches!(error, RegistryError::InvalidDefinition { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn tagged_member_spec_is_accepted() {
        let path = write_temp(
            r#"
id = 9
name = "Sample Manufacturer"
document_type = "ivr"
template_id = "tpl_sample"

[[target]]
canonical = "clinical.pos_11"
output = "POS 11"

[fields."clinical.pos_11"]
group = "place_of_service"

[groups.place_of_service]
selector = "clinical.place_of_service"
members = [{ field = "clinical.pos_11", value = "11" }]
"#,
        );
        let config = load_definition(&path).expect("load definition");
        assert!(config.is_group_member("clinical.pos_11"));
        let _ = std::fs::remove_file(&path);
    }
}
