#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod mapping;
pub mod result;
pub mod sources;
pub mod value;

pub use config::{
    Computation, DocumentType, ExclusiveGroup, FieldSpec, GroupMember, ManufacturerConfig,
    ManufacturerSummary, TargetField, Transform,
};
pub use error::{EngineError, Result};
pub use mapping::{FieldMapping, MatchType};
pub use result::{
    Completeness, IssueCode, MappingResult, OutputField, OutputValue, ValidationIssue,
    ValidationReport,
};
pub use sources::{FacilityRecord, OrganizationRecord, ProviderProfile};
pub use value::{CanonicalRecord, FieldValue, normalize_boolean};
