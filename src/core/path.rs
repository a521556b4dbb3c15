//! Dotted field-path access into nested records.
//!
//! Paths such as `"auszugsadresse.plz"` address a field inside nested
//! objects. Numeric segments index into arrays (`"positionen.0.menge"`).
//!
//! Reads never fail: a missing or non-container segment yields `None`.
//! Writes are copy-on-write: only the containers along the path are
//! copied, every sibling branch is shared with the source record.

use super::value::{Fields, Value};
use std::sync::Arc;

/// Read the value at `path`, or `None` if any segment is missing.
///
/// # Example
///
/// ```rust
/// use formguard::core::{path, Value};
/// use serde_json::json;
///
/// let record = Value::from(json!({ "a": { "b": 1 } }));
/// assert_eq!(path::get(&record, "a.b"), Some(&Value::from(1)));
/// assert_eq!(path::get(&record, "a.x.y"), None);
/// assert_eq!(path::get(&Value::Null, "x.y"), None);
/// ```
pub fn get<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| child(current, segment))
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => fields.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Return a new record with `value` stored at `path`.
///
/// Missing intermediate objects are created empty. The source record is
/// left untouched.
///
/// # Example
///
/// ```rust
/// use formguard::core::{path, Value};
///
/// let original = Value::empty_object();
/// let updated = path::set(&original, "einzugsadresse.plz", Value::from("80331"));
///
/// assert_eq!(path::get(&updated, "einzugsadresse.plz"), Some(&Value::from("80331")));
/// assert!(original.is_blank());
/// ```
pub fn set(record: &Value, path: &str, value: Value) -> Value {
    let segments: Vec<&str> = path.split('.').collect();
    set_segments(Some(record), &segments, value)
}

fn set_segments(current: Option<&Value>, segments: &[&str], value: Value) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return value;
    };

    if let (Some(Value::Array(items)), Ok(index)) = (current, head.parse::<usize>()) {
        let mut items = Vec::clone(items);
        let next = if rest.is_empty() {
            value
        } else {
            set_segments(items.get(index), rest, value)
        };
        // Gaps past the end are filled with nulls.
        if index >= items.len() {
            items.resize(index, Value::Null);
            items.push(next);
        } else {
            items[index] = next;
        }
        return Value::Array(Arc::new(items));
    }

    let mut fields = match current {
        Some(Value::Object(fields)) => Fields::clone(fields),
        _ => Fields::new(),
    };
    let next = if rest.is_empty() {
        value
    } else {
        set_segments(fields.get(*head), rest, value)
    };
    fields.insert((*head).to_string(), next);
    Value::Object(Arc::new(fields))
}
