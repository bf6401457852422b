//! The canonical field catalog.
//!
//! Each entry links a canonical path to the spellings that appear on real
//! manufacturer templates: a display label, a list of known exact
//! variants, and the domain keywords used for semantic matching.

use serde::{Deserialize, Serialize};

/// One canonical path with its known spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub path: String,
    pub label: String,
    /// Literal spellings observed on templates; a normalized match here
    /// is an exact-tier hit.
    #[serde(default)]
    pub variants: Vec<String>,
    /// Domain keywords for semantic-tier matching.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl CatalogEntry {
    fn new(path: &str, label: &str, variants: &[&str], synonyms: &[&str]) -> Self {
        Self {
            path: path.to_string(),
            label: label.to_string(),
            variants: variants.iter().map(|v| (*v).to_string()).collect(),
            synonyms: synonyms.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// The catalog the match engine scores against.
#[derive(Debug, Clone, Default)]
pub struct CanonicalCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl CanonicalCatalog {
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The built-in catalog covering the canonical record's field families.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            CatalogEntry::new(
                "patient.first_name",
                "Patient First Name",
                &["first name", "fname", "given name", "patient fname"],
                &["patient", "first", "given", "name"],
            ),
            CatalogEntry::new(
                "patient.last_name",
                "Patient Last Name",
                &["last name", "lname", "surname", "family name", "patient lname"],
                &["patient", "last", "surname", "family", "name"],
            ),
            CatalogEntry::new(
                "patient.full_name",
                "Patient Name",
                &["patient full name", "name of patient"],
                &["patient", "name"],
            ),
            CatalogEntry::new(
                "patient.dob",
                "Patient DOB",
                &["dob", "date of birth", "birth date", "patient date of birth"],
                &["patient", "birth", "dob"],
            ),
            CatalogEntry::new(
                "patient.gender",
                "Patient Gender",
                &["sex", "gender", "male female"],
                &["gender", "sex"],
            ),
            CatalogEntry::new(
                "patient.phone",
                "Patient Phone #",
                &["patient phone number", "patient telephone"],
                &["patient", "phone", "telephone"],
            ),
            CatalogEntry::new(
                "patient.address",
                "Patient Address",
                &["patient street address"],
                &["patient", "address", "street"],
            ),
            CatalogEntry::new(
                "provider.name",
                "Physician Name",
                &["provider name", "doctor name", "practitioner name", "treating physician"],
                &["physician", "provider", "doctor", "name"],
            ),
            CatalogEntry::new(
                "provider.npi",
                "Physician NPI",
                &["npi", "provider npi", "npi number", "physician npi number"],
                &["physician", "provider", "npi"],
            ),
            CatalogEntry::new(
                "provider.specialty",
                "Physician Specialty",
                &["provider specialty", "medical specialty"],
                &["physician", "provider", "specialty"],
            ),
            CatalogEntry::new(
                "provider.tax_id",
                "Physician Tax ID",
                &["tax id", "provider tin", "tin"],
                &["physician", "provider", "tax"],
            ),
            CatalogEntry::new(
                "provider.ptan",
                "Physician PTAN",
                &["ptan", "provider ptan"],
                &["physician", "provider", "ptan"],
            ),
            CatalogEntry::new(
                "facility.name",
                "Facility Name",
                &["practice name", "clinic name", "site name"],
                &["facility", "practice", "clinic", "name"],
            ),
            CatalogEntry::new(
                "facility.npi",
                "Facility NPI",
                &["practice npi", "group npi"],
                &["facility", "practice", "npi"],
            ),
            CatalogEntry::new(
                "facility.address",
                "Facility Address",
                &["practice address", "clinic address"],
                &["facility", "practice", "address"],
            ),
            CatalogEntry::new(
                "facility.phone",
                "Facility Phone #",
                &["practice phone", "office phone"],
                &["facility", "practice", "office", "phone"],
            ),
            CatalogEntry::new(
                "facility.fax",
                "Facility Fax #",
                &["practice fax", "office fax"],
                &["facility", "practice", "office", "fax"],
            ),
            CatalogEntry::new(
                "insurance.primary.name",
                "Primary Insurance Name",
                &["insurance company", "payor name", "insurance carrier", "carrier name"],
                &["insurance", "primary", "payor", "payer", "carrier"],
            ),
            CatalogEntry::new(
                "insurance.primary.policy_number",
                "Primary Policy Number",
                &["member id", "policy number", "insurance id", "subscriber id"],
                &["insurance", "policy", "member", "subscriber"],
            ),
            CatalogEntry::new(
                "insurance.primary.group_number",
                "Primary Group Number",
                &["group number", "group no"],
                &["insurance", "group"],
            ),
            CatalogEntry::new(
                "insurance.primary.payer_phone",
                "Primary Payer Phone #",
                &["payer phone", "insurance phone"],
                &["insurance", "payer", "payor", "phone"],
            ),
            CatalogEntry::new(
                "insurance.secondary.name",
                "Secondary Insurance Name",
                &["secondary carrier", "secondary payor"],
                &["insurance", "secondary", "payor", "carrier"],
            ),
            CatalogEntry::new(
                "insurance.secondary.policy_number",
                "Secondary Policy Number",
                &["secondary member id"],
                &["insurance", "secondary", "policy", "member"],
            ),
            CatalogEntry::new(
                "clinical.wound_type",
                "Wound Type",
                &["wound description", "condition type", "type of wound"],
                &["wound", "type", "condition"],
            ),
            CatalogEntry::new(
                "clinical.wound_location",
                "Location of Wound",
                &["wound location", "body site", "anatomical location"],
                &["wound", "location", "site", "anatomical"],
            ),
            CatalogEntry::new(
                "clinical.wound_area",
                "Total Wound Size",
                &["wound size", "total wound area", "wound dimensions"],
                &["wound", "size", "area", "dimensions"],
            ),
            CatalogEntry::new(
                "clinical.diagnosis_codes",
                "ICD-10 Codes",
                &["diagnosis codes", "icd codes"],
                &["icd", "diagnosis", "dx"],
            ),
            CatalogEntry::new(
                "clinical.procedure_codes",
                "CPT Codes",
                &["procedure codes", "application cpt codes"],
                &["cpt", "procedure"],
            ),
            CatalogEntry::new(
                "clinical.place_of_service",
                "Place of Service",
                &["pos", "service location"],
                &["place", "service", "pos"],
            ),
            CatalogEntry::new(
                "clinical.medical_history",
                "Medical History",
                &["relevant medical history", "patient history"],
                &["medical", "history"],
            ),
            CatalogEntry::new(
                "order.product_code",
                "Product Q Code",
                &["q code", "hcpcs code", "product code"],
                &["product", "code", "hcpcs"],
            ),
            CatalogEntry::new(
                "order.product_name",
                "Product Name",
                &["graft name", "product requested"],
                &["product", "graft", "name"],
            ),
            CatalogEntry::new(
                "order.sales_rep",
                "Sales Rep",
                &["representative name", "distributor name", "sales representative"],
                &["sales", "rep", "representative", "distributor"],
            ),
            CatalogEntry::new(
                "order.service_date",
                "Surgery Date",
                &["procedure date", "date of service", "anticipated treatment date"],
                &["service", "procedure", "surgery", "date"],
            ),
        ])
    }
}
