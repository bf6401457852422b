//! Value transformations.

use chrono::NaiveDate;

use ivr_model::{FieldValue, Transform, normalize_boolean};

const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];

/// Re-renders a parseable date as `MM/DD/YYYY`; anything unparseable
/// passes through unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    // Timestamps reduce to their date part.
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    for format in DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return date.format("%m/%d/%Y").to_string();
        }
    }
    raw.to_string()
}

/// Formats a 10-digit phone number as `(AAA) BBB-CCCC`; other shapes
/// pass through unchanged.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}

/// Applies a spec's transform to a resolved value.
#[must_use]
pub fn apply_transform(value: FieldValue, transform: Transform) -> FieldValue {
    match transform {
        Transform::BooleanLabel => match normalize_boolean(&value) {
            Some(flag) => FieldValue::Bool(flag),
            None => value,
        },
        Transform::DateFormat => match &value {
            FieldValue::Text(text) => FieldValue::Text(format_date(text)),
            _ => value,
        },
        Transform::PhoneFormat => match &value {
            FieldValue::Text(text) => FieldValue::Text(format_phone(text)),
            _ => value,
        },
        Transform::None | Transform::Concat | Transform::Computed => value,
    }
}
