//! Log rows

use serde::{Serialize, Serializer};

use crate::convert::{normalize, JsonValue};
use crate::level::LevelTag;

/// One appended log row
///
/// Serialized as the wire triple `[data, call_site, type]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Converted arguments
    pub data: JsonValue,
    /// `"<file> : <line>"`, or `None` when suppressed
    pub call_site: Option<String>,
    /// Console level
    pub level: LevelTag,
}

impl Row {
    pub fn new(data: JsonValue, call_site: Option<String>, level: LevelTag) -> Self {
        Self {
            data,
            call_site,
            level,
        }
    }

    /// Normalized wire form of this row
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::Value::Array(vec![
            normalize(&self.data),
            self.call_site
                .as_ref()
                .map(|s| serde_json::Value::String(s.clone()))
                .unwrap_or(serde_json::Value::Null),
            serde_json::Value::String(self.level.as_wire().to_string()),
        ])
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.data, &self.call_site, &self.level).serialize(serializer)
    }
}
