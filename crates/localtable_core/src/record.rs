//! Records and value comparison.
//!
//! A record is an untyped JSON object. Tables hold heterogeneous records;
//! no schema is enforced. Field order is preserved across merges but carries
//! no meaning.

use crate::error::CollectionResult;
use crate::selector;
use serde_json::{Map, Number, Value};

/// A single record: a field-name to value mapping.
pub type Record = Map<String, Value>;

/// Merges `patch` into `target` field by field.
///
/// Fields present in `patch` overwrite (or are appended to) `target`;
/// fields only in `target` are kept. Existing fields keep their position.
pub fn merge(target: &mut Record, patch: &Record) {
    for (field, value) in patch {
        target.insert(field.clone(), value.clone());
    }
}

/// Parses an assignment list such as `"name=bob,age=30"` into a record.
///
/// Uses the same clause grammar as string selectors. Values are stored as
/// strings.
///
/// # Errors
///
/// Returns [`crate::CollectionError::SelectorSyntax`] if any clause is not
/// `field=value`.
pub fn parse_assignments(text: &str) -> CollectionResult<Record> {
    let mut record = Record::new();
    for (field, value) in selector::split_clauses(text)? {
        record.insert(field, Value::String(value));
    }
    Ok(record)
}

/// Coercing equality between a record field and a clause value.
///
/// - `null` equals only `null`
/// - numbers and strings compare numerically (`""` reads as 0)
/// - booleans compare as 1 and 0
/// - arrays compare with scalars through their comma-joined text
/// - objects are equal only to structurally equal objects
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => left == right,
        (Value::Bool(b), other) | (other, Value::Bool(b)) => {
            loose_eq(&Value::from(u8::from(*b)), other)
        }
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match (n.as_f64(), to_number(s)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        (Value::Array(items), other) | (other, Value::Array(items)) => {
            loose_eq(&Value::String(join(items)), other)
        }
        (Value::Object(_), _) | (_, Value::Object(_)) => false,
    }
}

/// Numeric reading of a string; `None` when it is not a number.
fn to_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    // f64's parser also accepts "inf" and "nan" spellings
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    trimmed.parse().ok()
}

fn join(items: &[Value]) -> String {
    items.iter().map(text_of).collect::<Vec<_>>().join(",")
}

fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => join(items),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
