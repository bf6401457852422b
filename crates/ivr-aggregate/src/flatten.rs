//! Payload flattening.
//!
//! Submitted payloads may be flat or nested JSON. Nested objects flatten
//! onto dotted paths; arrays of scalars become list values; arrays of
//! objects flatten with a positional segment.

use std::collections::BTreeMap;

use ivr_model::FieldValue;
use serde_json::Value;

use crate::alias::canonical_key;

/// Flattens a payload into canonical-keyed values. Top-level keys are
/// rewritten through the alias table; nested paths are kept verbatim.
#[must_use]
pub fn flatten_payload(payload: &Value) -> BTreeMap<String, FieldValue> {
    let mut out = BTreeMap::new();
    if let Value::Object(map) = payload {
        for (key, value) in map {
            let key = canonical_key(key).to_string();
            flatten_into(&mut out, key, value);
        }
    }
    out
}

fn flatten_into(out: &mut BTreeMap<String, FieldValue>, prefix: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => {
            out.insert(prefix, FieldValue::Bool(*flag));
        }
        Value::Number(n) => {
            if let Some(n) = n.as_f64() {
                out.insert(prefix, FieldValue::Number(n));
            }
        }
        Value::String(text) => {
            out.insert(prefix, FieldValue::Text(text.clone()));
        }
        Value::Array(items) => {
            if items.iter().all(is_scalar) {
                let list: Vec<String> = items.iter().filter_map(scalar_text).collect();
                out.insert(prefix, FieldValue::List(list));
            } else {
                for (index, item) in items.iter().enumerate() {
                    flatten_into(out, format!("{prefix}.{index}"), item);
                }
            }
        }
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(out, format!("{prefix}.{key}"), value);
            }
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
