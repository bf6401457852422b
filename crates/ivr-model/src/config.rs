//! Manufacturer configuration types.
//!
//! A [`ManufacturerConfig`] is the per-manufacturer, per-document-type rule
//! set the resolver applies to a canonical record: field specs with ordered
//! fallback chains, mutually-exclusive checkbox groups, and the ordered
//! list of output target names. Configs are loaded once from static
//! definitions and are read-only at request time.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Document family a configuration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Insurance-verification request form.
    Ivr,
    /// Product order form.
    OrderForm,
}

impl DocumentType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ivr => "ivr",
            Self::OrderForm => "order_form",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    /// Parse a document type string. Tolerates the spellings found in
    /// definition files and CLI input (case-insensitive, with or without
    /// separators).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "ivr" | "insurance_verification" => Ok(Self::Ivr),
            "order_form" | "orderform" | "order" => Ok(Self::OrderForm),
            _ => Err(format!("Unknown document type: {s}")),
        }
    }
}

/// Value transformation applied after a field resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Pass the resolved value through unchanged.
    #[default]
    None,
    /// Normalize a lenient boolean and render it as `Yes`/`No`.
    BooleanLabel,
    /// Join every non-empty source value with a single space.
    Concat,
    /// Re-render a parseable date as `MM/DD/YYYY`.
    DateFormat,
    /// Format a 10-digit phone number as `(AAA) BBB-CCCC`.
    PhoneFormat,
    /// Evaluate the spec's computation when no source resolves.
    Computed,
}

/// A pure computation over other canonical keys. This is an explicit AST;
/// computations are never evaluated as dynamic code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Computation {
    /// First non-empty value among the listed keys.
    Coalesce(Vec<String>),
    /// Join the non-empty values of the listed keys.
    Concat {
        keys: Vec<String>,
        #[serde(default = "default_separator")]
        separator: String,
    },
    /// Numeric product of the listed keys (e.g. wound area from
    /// length x width). Every key must resolve to a number.
    Product(Vec<String>),
}

fn default_separator() -> String {
    " ".to_string()
}

/// Rule for resolving and transforming one configured field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Ordered fallback chain of canonical keys; the first non-empty wins.
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub transform: Transform,
    /// Required when `transform` is [`Transform::Computed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation: Option<Computation>,
    #[serde(default)]
    pub required: bool,
    /// Exclusive-group id when the field is a group member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// One member of a mutually-exclusive checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Canonical key the member writes its boolean into.
    pub field: String,
    /// Selector value that turns this member on.
    pub value: String,
}

/// A set of output checkboxes representing one logical choice. A single
/// selector value picks exactly one member true and forces all siblings
/// false; members are never resolved independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusiveGroup {
    /// Canonical key whose value selects the active member.
    pub selector: String,
    pub members: Vec<GroupMember>,
}

impl ExclusiveGroup {
    /// Iterates the canonical keys of every member.
    pub fn member_fields(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|member| member.field.as_str())
    }
}

/// Ordered mapping from a canonical key to the document template's output
/// field name. Declaration order is significant: on an output-name
/// collision the first-registered key wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetField {
    pub canonical: String,
    pub output: String,
}

/// Complete per-manufacturer, per-document-type mapping configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerConfig {
    pub id: u32,
    pub name: String,
    /// Alternate trade names that resolve to this configuration.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub document_type: DocumentType,
    /// Resolved identifier of the document template this configuration
    /// fills. This is the single canonical home for the template id.
    pub template_id: String,
    #[serde(default)]
    pub signature_required: bool,
    /// Canonical keys that must resolve for the mapping to be valid,
    /// in reporting order.
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub field_specs: BTreeMap<String, FieldSpec>,
    #[serde(default)]
    pub targets: Vec<TargetField>,
    #[serde(default)]
    pub groups: BTreeMap<String, ExclusiveGroup>,
}

impl ManufacturerConfig {
    /// Output name registered for a canonical key, if any.
    #[must_use]
    pub fn output_name(&self, canonical: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|target| target.canonical == canonical)
            .map(|target| target.output.as_str())
    }

    /// True when the canonical key belongs to any exclusive group.
    #[must_use]
    pub fn is_group_member(&self, canonical: &str) -> bool {
        self.groups
            .values()
            .any(|group| group.member_fields().any(|field| field == canonical))
    }

    /// The subset of configuration carried on a [`MappingResult`].
    ///
    /// [`MappingResult`]: crate::result::MappingResult
    #[must_use]
    pub fn summary(&self) -> ManufacturerSummary {
        ManufacturerSummary {
            id: self.id,
            name: self.name.clone(),
            document_type: self.document_type,
            template_id: self.template_id.clone(),
            signature_required: self.signature_required,
        }
    }
}

/// Configuration subset echoed back to callers with every mapping result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerSummary {
    pub id: u32,
    pub name: String,
    pub document_type: DocumentType,
    pub template_id: String,
    pub signature_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_parses_tolerantly() {
        assert_eq!("IVR".parse::<DocumentType>(), Ok(DocumentType::Ivr));
        assert_eq!(
            "Order-Form".parse::<DocumentType>(),
            Ok(DocumentType::OrderForm)
        );
        assert_eq!("order".parse::<DocumentType>(), Ok(DocumentType::OrderForm));
        assert!("fax".parse::<DocumentType>().is_err());
    }

    #[test]
    fn group_membership_lookup() {
        let config = ManufacturerConfig {
            id: 1,
            name: "BioWound Solutions".to_string(),
            aliases: vec![],
            document_type: DocumentType::Ivr,
            template_id: "tpl_100".to_string(),
            signature_required: true,
            required_fields: vec![],
            field_specs: BTreeMap::new(),
            targets: vec![],
            groups: [(
                "place_of_service".to_string(),
                ExclusiveGroup {
                    selector: "clinical.place_of_service".to_string(),
                    members: vec![GroupMember {
                        field: "clinical.pos_11".to_string(),
                        value: "11".to_string(),
                    }],
                },
            )]
            .into_iter()
            .collect(),
        };
        assert!(config.is_group_member("clinical.pos_11"));
        assert!(!config.is_group_member("clinical.pos_12"));
    }

    #[test]
    fn computation_serde_shape() {
        let computation = Computation::Product(vec![
            "clinical.wound_length".to_string(),
            "clinical.wound_width".to_string(),
        ]);
        let json = serde_json::to_string(&computation).expect("serialize computation");
        assert_eq!(
            json,
            r#"{"product":["clinical.wound_length","clinical.wound_width"]}"#
        );
    }
}
