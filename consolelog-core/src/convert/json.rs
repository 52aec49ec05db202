//! Converted value tree

use serde::{Serialize, Serializer};

use crate::value::Handle;

use super::normalize;

/// A converted value, before normalization
///
/// Floats may still be non-finite and handles are still typed; both are
/// turned into strings by [`normalize`](super::normalize), which also runs
/// when the tree is serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Sequence(Vec<JsonValue>),
    Mapping(Vec<(String, JsonValue)>),
    /// Placeholder for an object already expanded in the same call
    RefToken(String),
    Handle(Handle),
    /// Pre-rendered dump of a value with no JSON shape
    Opaque(String),
}

impl JsonValue {
    /// Empty sequence, the data of an argument-less row
    pub fn empty() -> Self {
        JsonValue::Sequence(Vec::new())
    }

    pub fn as_ref_token(&self) -> Option<&str> {
        match self {
            JsonValue::RefToken(token) => Some(token),
            _ => None,
        }
    }

    /// Look up a mapping entry by key
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up a sequence item by index
    pub fn index(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Sequence(items) => items.get(index),
            _ => None,
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        normalize(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let tree = JsonValue::Sequence(vec![
            JsonValue::Mapping(vec![("k".to_string(), JsonValue::Int(1))]),
            JsonValue::RefToken("object (T) [1]".to_string()),
        ]);

        assert_eq!(
            tree.index(0).and_then(|m| m.get("k")),
            Some(&JsonValue::Int(1))
        );
        assert_eq!(
            tree.index(1).and_then(JsonValue::as_ref_token),
            Some("object (T) [1]")
        );
        assert!(tree.index(2).is_none());
        assert!(tree.get("k").is_none());
    }

    #[test]
    fn test_serializes_through_normalizer() {
        let tree = JsonValue::Sequence(vec![JsonValue::Float(f64::NAN), JsonValue::Int(2)]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"["NaN (numeric)",2]"#);
    }
}
