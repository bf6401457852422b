//! Payload key normalization.
//!
//! Submitted payloads arrive with the surrounding application's field
//! names. This table rewrites the known spellings onto canonical paths;
//! unknown keys pass through unchanged so fallback chains can still
//! reach them.

const ALIASES: &[(&str, &str)] = &[
    // Patient
    ("patient_first_name", "patient.first_name"),
    ("patient_last_name", "patient.last_name"),
    ("patient_name", "patient.full_name"),
    ("patient_full_name", "patient.full_name"),
    ("patient_dob", "patient.dob"),
    ("date_of_birth", "patient.dob"),
    ("patient_gender", "patient.gender"),
    ("patient_phone", "patient.phone"),
    ("patient_email", "patient.email"),
    ("patient_address_line1", "patient.address"),
    ("patient_address", "patient.address"),
    ("patient_city", "patient.city"),
    ("patient_state", "patient.state"),
    ("patient_zip", "patient.zip"),
    ("patient_member_id", "insurance.primary.policy_number"),
    // Provider / physician
    ("provider_name", "provider.name"),
    ("physician_name", "provider.name"),
    ("provider_npi", "provider.npi"),
    ("physician_npi", "provider.npi"),
    ("provider_specialty", "provider.specialty"),
    ("physician_specialty", "provider.specialty"),
    ("provider_tax_id", "provider.tax_id"),
    ("provider_ptan", "provider.ptan"),
    ("provider_credentials", "provider.credentials"),
    ("provider_email", "provider.email"),
    ("provider_phone", "provider.phone"),
    ("provider_fax", "provider.fax"),
    // Facility
    ("facility_name", "facility.name"),
    ("facility_npi", "facility.npi"),
    ("facility_tax_id", "facility.tax_id"),
    ("facility_ptan", "facility.ptan"),
    ("facility_address", "facility.address"),
    ("facility_city", "facility.city"),
    ("facility_state", "facility.state"),
    ("facility_zip", "facility.zip"),
    ("facility_phone", "facility.phone"),
    ("facility_fax", "facility.fax"),
    ("facility_contact_name", "facility.contact_name"),
    ("office_contact_name", "facility.contact_name"),
    ("facility_contact_email", "facility.contact_email"),
    ("office_contact_email", "facility.contact_email"),
    // Organization
    ("organization_name", "organization.name"),
    ("organization_phone", "organization.phone"),
    // Insurance
    ("primary_insurance_name", "insurance.primary.name"),
    ("insurance_name", "insurance.primary.name"),
    ("primary_member_id", "insurance.primary.policy_number"),
    ("member_id", "insurance.primary.policy_number"),
    ("primary_policy_number", "insurance.primary.policy_number"),
    ("group_number", "insurance.primary.group_number"),
    ("primary_group_number", "insurance.primary.group_number"),
    ("payer_phone", "insurance.primary.payer_phone"),
    ("primary_payer_phone", "insurance.primary.payer_phone"),
    ("primary_plan_type", "insurance.primary.plan_type"),
    ("secondary_insurance_name", "insurance.secondary.name"),
    ("secondary_member_id", "insurance.secondary.policy_number"),
    ("secondary_policy_number", "insurance.secondary.policy_number"),
    ("secondary_group_number", "insurance.secondary.group_number"),
    ("secondary_payer_phone", "insurance.secondary.payer_phone"),
    // Clinical
    ("wound_type", "clinical.wound_type"),
    ("wound_location", "clinical.wound_location"),
    ("wound_size_length", "clinical.wound_length"),
    ("wound_length", "clinical.wound_length"),
    ("wound_size_width", "clinical.wound_width"),
    ("wound_width", "clinical.wound_width"),
    ("wound_size_depth", "clinical.wound_depth"),
    ("total_wound_size", "clinical.wound_area"),
    ("wound_duration_weeks", "clinical.wound_duration_weeks"),
    ("primary_diagnosis_code", "clinical.diagnosis_codes"),
    ("diagnosis_code", "clinical.diagnosis_codes"),
    ("icd10_codes", "clinical.diagnosis_codes"),
    ("cpt_codes", "clinical.procedure_codes"),
    ("application_cpt_codes", "clinical.procedure_codes"),
    ("place_of_service", "clinical.place_of_service"),
    ("medical_history", "clinical.medical_history"),
    ("hospice_status", "clinical.hospice_status"),
    ("part_a_status", "clinical.part_a_status"),
    ("global_period_status", "clinical.global_period_status"),
    ("prior_applications", "clinical.prior_applications"),
    ("prior_auth_permission", "clinical.prior_auth_permission"),
    // Order
    ("request_type", "order.request_type"),
    ("manufacturer", "order.manufacturer"),
    ("manufacturer_name", "order.manufacturer"),
    ("product_manufacturer", "order.manufacturer"),
    ("product_name", "order.product_name"),
    ("product_code", "order.product_code"),
    ("q_code", "order.product_code"),
    ("sales_rep_name", "order.sales_rep"),
    ("sales_rep", "order.sales_rep"),
    ("request_date", "order.request_date"),
    ("order_date", "order.request_date"),
    ("service_date", "order.service_date"),
    ("expected_service_date", "order.service_date"),
    ("procedure_date", "order.service_date"),
    ("shipping_speed", "order.shipping_method"),
];

/// Rewrites a payload key onto its canonical path, when known.
#[must_use]
pub fn canonical_key(raw: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map_or(raw, |(_, canonical)| canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_rewrite() {
        assert_eq!(canonical_key("provider_npi"), "provider.npi");
        assert_eq!(canonical_key("patient_dob"), "patient.dob");
        assert_eq!(canonical_key("place_of_service"), "clinical.place_of_service");
    }

    #[test]
    fn unknown_keys_pass_through() {
        assert_eq!(canonical_key("amnio_amp_size"), "amnio_amp_size");
        assert_eq!(canonical_key("patient.dob"), "patient.dob");
    }
}
