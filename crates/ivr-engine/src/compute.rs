//! Computation evaluation.
//!
//! Computations are a small explicit AST over canonical keys; they are
//! evaluated structurally, never as dynamic code.

use ivr_model::{CanonicalRecord, Computation, FieldValue};

/// Evaluates a computation over the record. Returns `None` when the
/// referenced keys cannot produce a value (an invalid computation from
/// the caller's point of view).
#[must_use]
pub fn evaluate(computation: &Computation, record: &CanonicalRecord) -> Option<FieldValue> {
    match computation {
        Computation::Coalesce(keys) => keys
            .iter()
            .filter_map(|key| record.get(key))
            .find(|value| !value.is_empty())
            .cloned(),
        Computation::Concat { keys, separator } => {
            let parts: Vec<String> = keys
                .iter()
                .filter_map(|key| record.get(key))
                .filter(|value| !value.is_empty())
                .map(FieldValue::to_text)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(FieldValue::Text(parts.join(separator)))
            }
        }
        Computation::Product(keys) => {
            let mut product = 1.0;
            for key in keys {
                let factor = record.get(key).and_then(FieldValue::as_number)?;
                product *= factor;
            }
            Some(FieldValue::Number(product))
        }
    }
}
