#![deny(unsafe_code)]

//! Canonical data aggregation.
//!
//! Gathers values from disjoint intake sources (submitted form payload,
//! authenticated provider profile, selected facility, current
//! organization, stored workflow metadata) into one flat
//! [`CanonicalRecord`], then derives computed values. Aggregation is pure
//! given its inputs; the current date is injected rather than read from
//! the clock.
//!
//! [`CanonicalRecord`]: ivr_model::CanonicalRecord

mod aggregator;
mod alias;
mod flatten;

pub use aggregator::{AggregateError, SourceBundle, build_record};
pub use alias::canonical_key;
pub use flatten::flatten_payload;
