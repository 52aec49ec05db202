//! Normalization of values JSON cannot represent

use serde_json::{Map, Number, Value};

use super::JsonValue;

/// Rewrite a converted tree into plain JSON
///
/// Walks the whole tree. Handles become `"handle #<id> (<kind>)"`,
/// non-finite floats become `"<value> (numeric)"`, opaque values become
/// their dump text and reference tokens become plain strings. Everything
/// else passes through unchanged.
///
/// When a mapping repeats a key, the first entry wins.
pub fn normalize(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Int(i) => Value::Number((*i).into()),
        JsonValue::UInt(u) => Value::Number((*u).into()),
        JsonValue::Float(f) => match Number::from_f64(*f) {
            Some(n) => Value::Number(n),
            None => Value::String(format!("{} (numeric)", non_finite_label(*f))),
        },
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Sequence(items) => Value::Array(items.iter().map(normalize).collect()),
        JsonValue::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, item) in entries {
                map.entry(key.clone()).or_insert_with(|| normalize(item));
            }
            Value::Object(map)
        }
        JsonValue::RefToken(token) => Value::String(token.clone()),
        JsonValue::Handle(handle) => Value::String(format!("{} ({})", handle, handle.kind)),
        JsonValue::Opaque(text) => Value::String(text.clone()),
    }
}

// Spelled the way the browser console prints them.
fn non_finite_label(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}
