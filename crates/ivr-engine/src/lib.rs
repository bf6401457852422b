#![deny(unsafe_code)]

//! Field mapping resolution and output conversion.
//!
//! The entry point is [`map_record`]: one canonical record plus one
//! manufacturer configuration in, one [`MappingResult`] out. Resolution
//! is single-threaded, synchronous, and free of shared mutable state;
//! mapping the same record against the same config twice yields
//! identical output.

mod compute;
mod convert;
mod resolve;
mod transform;

use tracing::info;

use ivr_model::{EngineError, FieldMapping, ManufacturerConfig, MappingResult};

pub use convert::to_output_fields;
pub use resolve::{ResolvedFields, resolve_fields};
pub use transform::{format_date, format_phone};

/// Maps one canonical record through a manufacturer configuration.
///
/// `known_mappings` are the curated rows for this template, used only for
/// low-confidence warnings. Data-quality findings (missing required
/// fields, output-name collisions) land on the validation report; the
/// only hard failure is a structurally invalid configuration.
pub fn map_record(
    record: &ivr_model::CanonicalRecord,
    config: &ManufacturerConfig,
    known_mappings: &[FieldMapping],
) -> Result<MappingResult, EngineError> {
    let resolved = resolve_fields(record, config)?;
    let (_, collision_issues) = to_output_fields(&resolved.data, config);
    let (mut validation, completeness) =
        ivr_validate::evaluate(&resolved.data, config, known_mappings, &resolved.issues);
    validation.errors.extend(collision_issues);

    info!(
        manufacturer = %config.name,
        document_type = %config.document_type,
        template_id = %config.template_id,
        valid = validation.valid,
        completeness = completeness.percentage,
        fields = resolved.data.len(),
        "record mapped"
    );

    Ok(MappingResult {
        data: resolved.data,
        validation,
        completeness,
        manufacturer: config.summary(),
    })
}
