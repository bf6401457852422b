use std::collections::BTreeMap;

use ivr_engine::{map_record, to_output_fields};
use ivr_model::{
    CanonicalRecord, Computation, DocumentType, ExclusiveGroup, FieldSpec, FieldValue,
    GroupMember, IssueCode, ManufacturerConfig, OutputValue, TargetField, Transform,
};

fn spec(sources: &[&str], required: bool) -> FieldSpec {
    FieldSpec {
        sources: sources.iter().map(|s| (*s).to_string()).collect(),
        transform: Transform::None,
        computation: None,
        required,
        group: None,
    }
}

fn target(canonical: &str, output: &str) -> TargetField {
    TargetField {
        canonical: canonical.to_string(),
        output: output.to_string(),
    }
}

/// A representative IVR configuration: plain fields, a boolean-label
/// question, a computed area, and a six-member place-of-service group.
fn sample_config() -> ManufacturerConfig {
    let mut field_specs = BTreeMap::new();
    field_specs.insert(
        "patient.full_name".to_string(),
        spec(&["patient.full_name", "patient.name"], true),
    );
    field_specs.insert("patient.gender".to_string(), spec(&["patient.gender"], false));
    field_specs.insert("provider.npi".to_string(), spec(&["provider.npi"], true));
    field_specs.insert(
        "patient.dob".to_string(),
        FieldSpec {
            sources: vec!["patient.dob".to_string()],
            transform: Transform::DateFormat,
            computation: None,
            required: false,
            group: None,
        },
    );
    field_specs.insert(
        "clinical.hospice_status".to_string(),
        FieldSpec {
            sources: vec!["clinical.hospice_status".to_string()],
            transform: Transform::BooleanLabel,
            computation: None,
            required: false,
            group: None,
        },
    );
    field_specs.insert(
        "clinical.wound_area".to_string(),
        FieldSpec {
            sources: vec!["clinical.wound_area".to_string()],
            transform: Transform::Computed,
            computation: Some(Computation::Product(vec![
                "clinical.wound_length".to_string(),
                "clinical.wound_width".to_string(),
            ])),
            required: false,
            group: None,
        },
    );

    let pos_members = [
        ("clinical.pos_11", "11"),
        ("clinical.pos_12", "12"),
        ("clinical.pos_13", "13"),
        ("clinical.pos_21", "21"),
        ("clinical.pos_22", "22"),
        ("clinical.pos_32", "32"),
    ];
    let groups: BTreeMap<String, ExclusiveGroup> = [(
        "place_of_service".to_string(),
        ExclusiveGroup {
            selector: "clinical.place_of_service".to_string(),
            members: pos_members
                .iter()
                .map(|(field, value)| GroupMember {
                    field: (*field).to_string(),
                    value: (*value).to_string(),
                })
                .collect(),
        },
    )]
    .into_iter()
    .collect();

    let mut targets = vec![
        target("patient.full_name", "Patient Name"),
        target("patient.gender", "Sex (Male/Female)"),
        target("patient.dob", "Patient DOB"),
        target("provider.npi", "Physician NPI"),
        target("clinical.hospice_status", "Is The Patient Currently in Hospice?"),
        target("clinical.wound_area", "Total Wound Size"),
    ];
    for (field, value) in &pos_members {
        targets.push(target(field, &format!("POS {value}")));
    }

    ManufacturerConfig {
        id: 4,
        name: "BioWound Solutions".to_string(),
        aliases: vec!["BioWound".to_string()],
        document_type: DocumentType::Ivr,
        template_id: "tpl_biowound_ivr".to_string(),
        signature_required: true,
        required_fields: vec!["patient.full_name".to_string(), "provider.npi".to_string()],
        field_specs,
        targets,
        groups,
    }
}

fn sample_record() -> CanonicalRecord {
    [
        ("patient.full_name", FieldValue::from("Jane Doe")),
        ("patient.gender", FieldValue::from("Male")),
        ("patient.dob", FieldValue::from("1961-07-09")),
        ("provider.npi", FieldValue::from("1234567890")),
        ("clinical.place_of_service", FieldValue::from("11")),
        ("clinical.hospice_status", FieldValue::from("No")),
        ("clinical.wound_length", FieldValue::from("4")),
        ("clinical.wound_width", FieldValue::from("4")),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

fn output_value<'a>(fields: &'a [ivr_model::OutputField], name: &str) -> Option<&'a OutputValue> {
    fields
        .iter()
        .find(|field| field.name == name)
        .map(|field| &field.default_value)
}

#[test]
fn gender_maps_onto_labeled_sex_field() {
    let config = sample_config();
    let result = map_record(&sample_record(), &config, &[]).expect("map");
    let (fields, _) = to_output_fields(&result.data, &config);
    assert_eq!(
        output_value(&fields, "Sex (Male/Female)"),
        Some(&OutputValue::text("Male"))
    );
}

#[test]
fn place_of_service_selects_exactly_one_member() {
    let config = sample_config();
    let result = map_record(&sample_record(), &config, &[]).expect("map");

    assert_eq!(
        result.data.get("clinical.pos_11"),
        Some(&FieldValue::Bool(true))
    );
    let truthy = result
        .data
        .iter()
        .filter(|(key, value)| {
            key.starts_with("clinical.pos_") && **value == FieldValue::Bool(true)
        })
        .count();
    assert_eq!(truthy, 1);
}

#[test]
fn unknown_selector_turns_every_member_false() {
    let config = sample_config();
    let mut record = sample_record();
    record.insert(
        "clinical.place_of_service".to_string(),
        FieldValue::from("99"),
    );
    let result = map_record(&record, &config, &[]).expect("map");

    // All false is a clean outcome, not an error.
    assert!(result.validation.valid);
    for (_, value) in result
        .data
        .iter()
        .filter(|(key, _)| key.starts_with("clinical.pos_"))
    {
        assert_eq!(value, &FieldValue::Bool(false));
    }
}

#[test]
fn missing_required_npi_invalidates_but_still_returns() {
    let config = sample_config();
    let mut record = sample_record();
    record.remove("provider.npi");
    let result = map_record(&record, &config, &[]).expect("map");

    assert!(!result.validation.valid);
    let npi_errors: Vec<_> = result
        .validation
        .errors
        .iter()
        .filter(|issue| issue.field.as_deref() == Some("provider.npi"))
        .collect();
    assert_eq!(npi_errors.len(), 1);
    assert_eq!(npi_errors[0].code, IssueCode::MissingRequiredField);
    assert!(result.completeness.percentage < 100.0);
    assert_eq!(result.completeness.missing_required, vec!["provider.npi"]);
}

#[test]
fn fallback_chain_takes_first_non_empty_source() {
    let config = sample_config();
    let mut record = sample_record();
    record.insert("patient.full_name".to_string(), FieldValue::Text(String::new()));
    record.insert("patient.name".to_string(), FieldValue::from("J. Doe"));
    let result = map_record(&record, &config, &[]).expect("map");
    assert_eq!(
        result.data.get("patient.full_name"),
        Some(&FieldValue::from("J. Doe"))
    );
}

#[test]
fn boolean_normalization_renders_yes_uniformly() {
    let config = sample_config();
    for raw in [
        FieldValue::Bool(true),
        FieldValue::from("true"),
        FieldValue::from("Yes"),
        FieldValue::Number(1.0),
    ] {
        let mut record = sample_record();
        record.insert("clinical.hospice_status".to_string(), raw.clone());
        let result = map_record(&record, &config, &[]).expect("map");
        let (fields, _) = to_output_fields(&result.data, &config);
        assert_eq!(
            output_value(&fields, "Is The Patient Currently in Hospice?"),
            Some(&OutputValue::text("Yes")),
            "{raw:?}"
        );
    }
}

#[test]
fn computed_area_fills_from_dimensions() {
    let config = sample_config();
    let result = map_record(&sample_record(), &config, &[]).expect("map");
    assert_eq!(
        result.data.get("clinical.wound_area"),
        Some(&FieldValue::Number(16.0))
    );
    let (fields, _) = to_output_fields(&result.data, &config);
    assert_eq!(
        output_value(&fields, "Total Wound Size"),
        Some(&OutputValue::text("16"))
    );
}

#[test]
fn broken_computation_omits_optional_field() {
    let config = sample_config();
    let mut record = sample_record();
    record.remove("clinical.wound_width");
    let result = map_record(&record, &config, &[]).expect("map");
    assert!(!result.data.contains_key("clinical.wound_area"));
    assert!(result.validation.valid);
}

#[test]
fn date_fields_render_american_format() {
    let config = sample_config();
    let result = map_record(&sample_record(), &config, &[]).expect("map");
    assert_eq!(
        result.data.get("patient.dob"),
        Some(&FieldValue::from("07/09/1961"))
    );
}

#[test]
fn duplicate_output_name_records_one_collision() {
    let mut config = sample_config();
    config.field_specs.insert(
        "patient.preferred_name".to_string(),
        spec(&["patient.preferred_name"], false),
    );
    config
        .targets
        .push(target("patient.preferred_name", "Patient Name"));

    let mut record = sample_record();
    record.insert(
        "patient.preferred_name".to_string(),
        FieldValue::from("Janey"),
    );
    let result = map_record(&record, &config, &[]).expect("map");

    let collisions: Vec<_> = result
        .validation
        .errors
        .iter()
        .filter(|issue| issue.code == IssueCode::FieldCollision)
        .collect();
    assert_eq!(collisions.len(), 1);

    let (fields, _) = to_output_fields(&result.data, &config);
    let named: Vec<_> = fields
        .iter()
        .filter(|field| field.name == "Patient Name")
        .collect();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].default_value, OutputValue::text("Jane Doe"));
}

#[test]
fn mapping_is_idempotent() {
    let config = sample_config();
    let record = sample_record();
    let first = map_record(&record, &config, &[]).expect("first map");
    let second = map_record(&record, &config, &[]).expect("second map");
    assert_eq!(first, second);
}

#[test]
fn every_output_field_has_a_registered_target() {
    let config = sample_config();
    let mut record = sample_record();
    record.insert("unrelated.key".to_string(), FieldValue::from("noise"));
    let result = map_record(&record, &config, &[]).expect("map");
    let (fields, _) = to_output_fields(&result.data, &config);
    for field in &fields {
        assert!(
            config.targets.iter().any(|t| t.output == field.name),
            "orphan output field {}",
            field.name
        );
    }
}

#[test]
fn supplying_missing_value_never_lowers_completeness() {
    let config = sample_config();
    let mut record = sample_record();
    record.remove("provider.npi");
    let before = map_record(&record, &config, &[]).expect("map without npi");

    record.insert("provider.npi".to_string(), FieldValue::from("1234567890"));
    let after = map_record(&record, &config, &[]).expect("map with npi");

    assert!(after.completeness.percentage >= before.completeness.percentage);
    assert!(after.validation.valid);
}
