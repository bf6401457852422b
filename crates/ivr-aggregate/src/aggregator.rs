//! Record assembly and derived values.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use ivr_model::{
    CanonicalRecord, FacilityRecord, FieldValue, OrganizationRecord, ProviderProfile,
};

use crate::flatten::flatten_payload;

/// Everything the aggregator draws from, gathered by the caller.
///
/// `today` is an input so the build stays pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct SourceBundle {
    /// Submitted form payload, flat or nested.
    pub payload: Value,
    pub profile: Option<ProviderProfile>,
    pub facility: Option<FacilityRecord>,
    pub organization: Option<OrganizationRecord>,
    /// Stored workflow metadata, already canonical-keyed. Highest
    /// precedence.
    pub workflow: CanonicalRecord,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Error)]
pub enum AggregateError {
    /// The merged record carries no manufacturer identity. The caller
    /// must supply one; the aggregator never defaults it.
    #[error("no manufacturer present in any source (order.manufacturer)")]
    MissingManufacturer,
}

/// Builds one canonical record from the bundle.
///
/// Precedence where the same concept appears in several sources:
/// stored workflow metadata > submitted payload > profile defaults.
pub fn build_record(bundle: &SourceBundle) -> Result<CanonicalRecord, AggregateError> {
    let mut record = CanonicalRecord::new();

    if let Some(profile) = &bundle.profile {
        merge_profile(&mut record, profile);
    }
    if let Some(facility) = &bundle.facility {
        merge_facility(&mut record, facility);
    }
    if let Some(organization) = &bundle.organization {
        merge_organization(&mut record, organization);
    }

    for (key, value) in flatten_payload(&bundle.payload) {
        if !value.is_empty() {
            record.insert(key, value);
        }
    }

    for (key, value) in &bundle.workflow {
        if !value.is_empty() {
            record.insert(key.clone(), value.clone());
        }
    }

    derive_fields(&mut record, &bundle.payload, bundle.today);

    if !record
        .get("order.manufacturer")
        .is_some_and(|value| !value.is_empty())
    {
        return Err(AggregateError::MissingManufacturer);
    }

    debug!(keys = record.len(), "canonical record assembled");
    Ok(record)
}

fn insert_opt(record: &mut CanonicalRecord, key: &str, value: &Option<String>) {
    if let Some(text) = value
        && !text.trim().is_empty()
    {
        record.insert(key.to_string(), FieldValue::Text(text.clone()));
    }
}

fn merge_profile(record: &mut CanonicalRecord, profile: &ProviderProfile) {
    insert_opt(record, "provider.name", &profile.name);
    insert_opt(record, "provider.first_name", &profile.first_name);
    insert_opt(record, "provider.last_name", &profile.last_name);
    insert_opt(record, "provider.credentials", &profile.credentials);
    insert_opt(record, "provider.npi", &profile.npi);
    insert_opt(record, "provider.specialty", &profile.specialty);
    insert_opt(record, "provider.tax_id", &profile.tax_id);
    insert_opt(record, "provider.ptan", &profile.ptan);
    insert_opt(record, "provider.medicaid_number", &profile.medicaid_number);
    insert_opt(record, "provider.phone", &profile.phone);
    insert_opt(record, "provider.fax", &profile.fax);
    insert_opt(record, "provider.email", &profile.email);
}

fn merge_facility(record: &mut CanonicalRecord, facility: &FacilityRecord) {
    insert_opt(record, "facility.name", &facility.name);
    insert_opt(record, "facility.npi", &facility.npi);
    insert_opt(record, "facility.tax_id", &facility.tax_id);
    insert_opt(record, "facility.ptan", &facility.ptan);
    insert_opt(record, "facility.medicaid_number", &facility.medicaid_number);
    insert_opt(record, "facility.address", &facility.address);
    insert_opt(record, "facility.city", &facility.city);
    insert_opt(record, "facility.state", &facility.state);
    insert_opt(record, "facility.zip", &facility.zip);
    insert_opt(record, "facility.phone", &facility.phone);
    insert_opt(record, "facility.fax", &facility.fax);
    insert_opt(record, "facility.contact_name", &facility.contact_name);
    insert_opt(record, "facility.contact_email", &facility.contact_email);
}

fn merge_organization(record: &mut CanonicalRecord, organization: &OrganizationRecord) {
    insert_opt(record, "organization.name", &organization.name);
    insert_opt(record, "organization.phone", &organization.phone);
}

fn derive_fields(record: &mut CanonicalRecord, payload: &Value, today: Option<NaiveDate>) {
    derive_full_name(record);
    normalize_gender(record);
    derive_wound_area(record);
    derive_product_flags(record, payload);

    if let Some(today) = today
        && !record.contains_key("order.request_date")
    {
        record.insert(
            "order.request_date".to_string(),
            FieldValue::Text(today.format("%m/%d/%Y").to_string()),
        );
    }
}

fn derive_full_name(record: &mut CanonicalRecord) {
    if record
        .get("patient.full_name")
        .is_some_and(|value| !value.is_empty())
    {
        return;
    }
    let first = record.get("patient.first_name").map(FieldValue::to_text);
    let last = record.get("patient.last_name").map(FieldValue::to_text);
    let full = [first, last]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !full.is_empty() {
        record.insert("patient.full_name".to_string(), FieldValue::Text(full));
    }
}

/// Normalizes gender onto the display form the document templates expect
/// ("Male"/"Female"); unrecognized values pass through untouched.
fn normalize_gender(record: &mut CanonicalRecord) {
    let Some(FieldValue::Text(raw)) = record.get("patient.gender") else {
        return;
    };
    let normalized = match raw.trim().to_ascii_lowercase().as_str() {
        "m" | "male" => "Male",
        "f" | "female" => "Female",
        _ => return,
    };
    record.insert(
        "patient.gender".to_string(),
        FieldValue::Text(normalized.to_string()),
    );
}

fn derive_wound_area(record: &mut CanonicalRecord) {
    if record
        .get("clinical.wound_area")
        .is_some_and(|value| !value.is_empty())
    {
        return;
    }
    let length = record
        .get("clinical.wound_length")
        .and_then(FieldValue::as_number);
    let width = record
        .get("clinical.wound_width")
        .and_then(FieldValue::as_number);
    if let (Some(length), Some(width)) = (length, width) {
        record.insert(
            "clinical.wound_area".to_string(),
            FieldValue::Number(length * width),
        );
    }
}

/// Per-product boolean flags from the selected-items list, plus the code
/// list itself and a scalar first code for single-product templates.
fn derive_product_flags(record: &mut CanonicalRecord, payload: &Value) {
    let Some(items) = payload.get("selected_products").and_then(Value::as_array) else {
        return;
    };
    let mut codes = Vec::new();
    for item in items {
        let code = match item {
            Value::String(code) => Some(code.clone()),
            Value::Object(map) => map
                .get("q_code")
                .or_else(|| map.get("code"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };
        if let Some(code) = code
            && !code.trim().is_empty()
        {
            codes.push(code);
        }
    }
    if codes.is_empty() {
        return;
    }
    for code in &codes {
        let key = format!("order.product.{}", code.trim().to_ascii_lowercase());
        record.insert(key, FieldValue::Bool(true));
    }
    if !record.contains_key("order.product_code") {
        record.insert(
            "order.product_code".to_string(),
            FieldValue::Text(codes[0].clone()),
        );
    }
    record.insert("order.product_codes".to_string(), FieldValue::List(codes));
}
