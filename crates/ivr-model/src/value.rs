//! Canonical record values.
//!
//! A [`CanonicalRecord`] is the engine's flat internal data model: one map
//! from canonical key (`patient.*`, `provider.*`, `facility.*`,
//! `organization.*`, `clinical.*`, `insurance.*`, `order.*`) to a scalar or
//! array value. Records are built fresh per request and never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single canonical value: scalar text, number, boolean, or a string list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Returns true when the value counts as absent: empty or
    /// whitespace-only text, or an empty list. Booleans and numbers are
    /// never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Interprets the value as a number when it carries one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Bool(_) | Self::List(_) => None,
        }
    }

    /// Renders the value as display text. Lists join with `", "`; numbers
    /// drop a trailing `.0` so whole quantities print as integers.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(n) => format_number(*n),
            Self::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Flat canonical key to value map. Keys use dotted canonical paths.
pub type CanonicalRecord = BTreeMap<String, FieldValue>;

/// Lenient boolean reading: accepts `true`/`false`, `1`/`0`, and the
/// yes/no spellings that appear in submitted payloads (`"Yes"`, `"y"`,
/// `"TRUE"`, ...). Returns `None` for anything else.
#[must_use]
pub fn normalize_boolean(value: &FieldValue) -> Option<bool> {
    match value {
        FieldValue::Bool(flag) => Some(*flag),
        FieldValue::Number(n) => {
            if *n == 1.0 {
                Some(true)
            } else if *n == 0.0 {
                Some(false)
            } else {
                None
            }
        }
        FieldValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        FieldValue::List(_) => None,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_matches_absence_rules() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::Text("   ".to_string()).is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Text("0".to_string()).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }

    #[test]
    fn boolean_normalization_accepts_equivalents() {
        for value in [
            FieldValue::Bool(true),
            FieldValue::Text("true".to_string()),
            FieldValue::Text("Yes".to_string()),
            FieldValue::Text("1".to_string()),
            FieldValue::Number(1.0),
        ] {
            assert_eq!(normalize_boolean(&value), Some(true), "{value:?}");
        }
        assert_eq!(
            normalize_boolean(&FieldValue::Text("No".to_string())),
            Some(false)
        );
        assert_eq!(
            normalize_boolean(&FieldValue::Text("maybe".to_string())),
            None
        );
    }

    #[test]
    fn number_rendering_trims_whole_values() {
        assert_eq!(FieldValue::Number(12.0).to_text(), "12");
        assert_eq!(FieldValue::Number(4.5).to_text(), "4.5");
    }

    #[test]
    fn list_renders_delimited() {
        let value = FieldValue::List(vec!["L97.419".to_string(), "E11.9".to_string()]);
        assert_eq!(value.to_text(), "L97.419, E11.9");
    }

    #[test]
    fn untagged_serde_round_trip() {
        let record: CanonicalRecord = [
            ("patient.name".to_string(), FieldValue::from("Jane Doe")),
            ("clinical.pos_11".to_string(), FieldValue::Bool(true)),
            ("clinical.wound_area".to_string(), FieldValue::Number(16.0)),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: CanonicalRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }
}
