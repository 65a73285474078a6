//! Field validation for incoming action payloads.
//!
//! Payloads arrive as untyped JSON so every problem can be reported per field
//! rather than failing at the first one, the way a typed deserializer would.

use crate::action::{ActionDraft, ActionPatch};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name → list of human-readable problems with that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key used for errors that are not tied to one field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";
pub const MSG_BAD_DATE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const MSG_BAD_INTEGER: &str = "A valid integer is required.";

/// Validate a create/replace payload: every field is required.
pub fn validate_draft(payload: &Value) -> Result<ActionDraft, FieldErrors> {
    let fields = as_object(payload)?;
    let mut errors = FieldErrors::new();

    let action = required(fields, "action", parse_label, &mut errors);
    let date = required(fields, "date", parse_date, &mut errors);
    let points = required(fields, "points", parse_points, &mut errors);

    match (action, date, points) {
        (Some(action), Some(date), Some(points)) if errors.is_empty() => Ok(ActionDraft {
            action,
            date,
            points,
        }),
        _ => Err(errors),
    }
}

/// Validate a partial update: absent fields are skipped, present ones are
/// checked with the same rules as [`validate_draft`].
pub fn validate_patch(payload: &Value) -> Result<ActionPatch, FieldErrors> {
    let fields = as_object(payload)?;
    let mut errors = FieldErrors::new();

    let patch = ActionPatch {
        action: optional(fields, "action", parse_label, &mut errors),
        date: optional(fields, "date", parse_date, &mut errors),
        points: optional(fields, "points", parse_points, &mut errors),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Non-empty label. Surrounding whitespace is trimmed; numbers are accepted
/// as their text form.
fn parse_label(value: &Value) -> Result<String, &'static str> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(MSG_NOT_STRING),
    };
    if text.is_empty() {
        return Err(MSG_BLANK);
    }
    Ok(text)
}

fn parse_date(value: &Value) -> Result<NaiveDate, &'static str> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or(MSG_BAD_DATE)
}

/// Integers, floats with no fractional part, and numeric strings such as
/// `"25"` or `"25.0"`.
fn parse_points(value: &Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(MSG_BAD_INTEGER),
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            let digits = match trimmed.find('.') {
                Some(dot) if trimmed[dot + 1..].chars().all(|c| c == '0') => &trimmed[..dot],
                _ => trimmed,
            };
            digits.parse::<i64>().map_err(|_| MSG_BAD_INTEGER)
        }
        _ => Err(MSG_BAD_INTEGER),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn as_object(payload: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    payload.as_object().ok_or_else(|| {
        let kind = match payload {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        let mut errors = FieldErrors::new();
        errors.insert(
            NON_FIELD_ERRORS.to_string(),
            vec![format!(
                "Invalid data. Expected a dictionary, but got {kind}."
            )],
        );
        errors
    })
}

fn required<T>(
    fields: &Map<String, Value>,
    name: &str,
    parse: fn(&Value) -> Result<T, &'static str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    match fields.get(name) {
        None => {
            push(errors, name, MSG_REQUIRED);
            None
        }
        Some(value) => check(value, name, parse, errors),
    }
}

fn optional<T>(
    fields: &Map<String, Value>,
    name: &str,
    parse: fn(&Value) -> Result<T, &'static str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    fields
        .get(name)
        .and_then(|value| check(value, name, parse, errors))
}

fn check<T>(
    value: &Value,
    name: &str,
    parse: fn(&Value) -> Result<T, &'static str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    if value.is_null() {
        push(errors, name, MSG_NULL);
        return None;
    }
    match parse(value) {
        Ok(v) => Some(v),
        Err(msg) => {
            push(errors, name, msg);
            None
        }
    }
}

fn push(errors: &mut FieldErrors, name: &str, msg: &str) {
    errors
        .entry(name.to_string())
        .or_default()
        .push(msg.to_string());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
