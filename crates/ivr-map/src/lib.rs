#![deny(unsafe_code)]

//! Fuzzy/semantic field-name matching and curated-mapping persistence.
//!
//! This is the offline curation side of the engine: given a raw field
//! name scraped from a real document template, [`MatchEngine`] proposes
//! canonical-path candidates ranked by strategy tier and confidence, and
//! [`MappingStore`] persists the accepted rows idempotently.

pub mod catalog;
pub mod engine;
pub mod patterns;
pub mod score;
pub mod store;

pub use catalog::{CanonicalCatalog, CatalogEntry};
pub use engine::{MatchCandidate, MatchEngine, MatchThresholds};
pub use patterns::PatternRule;
pub use score::{blended_similarity, normalize_field_name, token_set};
pub use store::MappingStore;
