//! Hard engine errors.
//!
//! Only structural problems surface here. Data-quality conditions
//! (missing required fields, collisions, low-confidence sources) are
//! reported through the validation channel on [`MappingResult`] instead.
//!
//! [`MappingResult`]: crate::result::MappingResult

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration for '{manufacturer}': {message}")]
    InvalidConfig {
        manufacturer: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
