//! End-to-end runs over the shipped manufacturer definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::json;

use ivr_aggregate::{SourceBundle, build_record};
use ivr_engine::{map_record, to_output_fields};
use ivr_model::{DocumentType, FieldValue, OutputValue};
use ivr_registry::Registry;

fn definitions_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../definitions")
}

fn intake_payload() -> serde_json::Value {
    json!({
        "manufacturer": "BioWound",
        "request_type": "new",
        "patient_first_name": "Jane",
        "patient_last_name": "Doe",
        "patient_gender": "female",
        "patient_dob": "1961-07-09",
        "provider_name": "Dr. Alex Rivera",
        "provider_npi": "1234567890",
        "facility_name": "Mesa Wound Clinic",
        "office_contact_name": "Sam Lee",
        "primary_insurance_name": "Medicare Part B",
        "primary_member_id": "1EG4-TE5-MK72",
        "place_of_service": "11",
        "wound_type": "DFU",
        "wound_size_length": "4",
        "wound_size_width": "4",
        "icd10_codes": ["L97.419", "E11.9"],
        "selected_products": [{ "q_code": "Q4205" }],
    })
}

#[test]
fn shipped_definitions_load() {
    let registry = Registry::load_dir(&definitions_dir()).expect("load shipped definitions");
    let names: Vec<&str> = registry
        .list()
        .iter()
        .map(|config| config.name.as_str())
        .collect();
    assert!(names.contains(&"ACZ & Associates"));
    assert!(names.contains(&"BioWound Solutions"));
    assert!(names.contains(&"MedLife Solutions"));
}

#[test]
fn biowound_intake_maps_cleanly() {
    let registry = Registry::load_dir(&definitions_dir()).expect("load shipped definitions");
    let bundle = SourceBundle {
        payload: intake_payload(),
        today: NaiveDate::from_ymd_opt(2026, 3, 14),
        ..SourceBundle::default()
    };
    let record = build_record(&bundle).expect("aggregate");

    let config = registry
        .get_config("biowound", DocumentType::Ivr)
        .expect("config");
    let result = map_record(&record, config, &[]).expect("map");

    assert!(result.validation.valid, "{:?}", result.validation.errors);
    assert_eq!(
        result.data.get("patient.full_name"),
        Some(&FieldValue::from("Jane Doe"))
    );
    assert_eq!(
        result.data.get("clinical.pos_11"),
        Some(&FieldValue::Bool(true))
    );
    assert_eq!(
        result.data.get("order.request_new"),
        Some(&FieldValue::Bool(true))
    );

    let (fields, issues) = to_output_fields(&result.data, config);
    assert!(issues.is_empty());
    let by_name = |name: &str| {
        fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.default_value)
    };
    assert_eq!(by_name("Patient DOB"), Some(&OutputValue::text("07/09/1961")));
    assert_eq!(by_name("Sex (Male/Female)"), Some(&OutputValue::text("Female")));
    assert_eq!(by_name("POS 11"), Some(&OutputValue::text("true")));
    assert_eq!(by_name("POS 12"), Some(&OutputValue::text("false")));
    assert_eq!(
        by_name("Total Wound Size (cm2)"),
        Some(&OutputValue::text("16"))
    );
    assert_eq!(
        by_name("ICD-10 Diagnosis Code(s)"),
        Some(&OutputValue::text("L97.419, E11.9"))
    );
    assert_eq!(by_name("Product(s) Requested"), Some(&OutputValue::text("Q4205")));
}

#[test]
fn medlife_falls_back_to_generic_order_form() {
    let registry = Registry::load_dir(&definitions_dir()).expect("load shipped definitions");
    let config = registry
        .get_config_or_generic("MedLife", DocumentType::OrderForm)
        .expect("generic fallback");
    assert_eq!(config.template_id, "tpl_generic_order");
}
