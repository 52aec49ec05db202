//! Chrome Logger wire encoding
//!
//! The header value is the base64 of a JSON object:
//!
//! ```json
//! {"version": "1.1", "columns": ["log", "backtrace", "type"], "rows": [[data, call_site, type], ...]}
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConsoleError, Result};
use crate::level::LevelTag;
use crate::{COLUMNS, HEADER_NAME, VERSION};

use super::{LogBuffer, Row};

#[derive(Serialize)]
struct WireRef<'a> {
    version: &'a str,
    columns: &'a [&'a str],
    rows: &'a [Row],
}

/// Encode the whole buffer into a header value
///
/// Pure function of the buffer: encoding twice without appending yields
/// identical output.
pub fn encode(buffer: &LogBuffer) -> Result<String> {
    let json = to_json(buffer)?;
    Ok(STANDARD.encode(json))
}

/// The JSON text carried by the header, before base64
pub fn to_json(buffer: &LogBuffer) -> Result<String> {
    let wire = WireRef {
        version: VERSION,
        columns: &COLUMNS,
        rows: buffer.rows(),
    };
    Ok(serde_json::to_string(&wire)?)
}

/// Full header line, `X-ChromeLogger-Data: <value>`
pub fn header_line(buffer: &LogBuffer) -> Result<String> {
    Ok(format!("{}: {}", HEADER_NAME, encode(buffer)?))
}

/// A decoded wire row
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(Value, Option<String>, LevelTag)")]
pub struct WireRow {
    pub data: Value,
    pub call_site: Option<String>,
    pub level: LevelTag,
}

impl From<(Value, Option<String>, LevelTag)> for WireRow {
    fn from((data, call_site, level): (Value, Option<String>, LevelTag)) -> Self {
        Self {
            data,
            call_site,
            level,
        }
    }
}

/// A decoded header payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WirePayload {
    pub version: String,
    pub columns: Vec<String>,
    pub rows: Vec<WireRow>,
}

/// Decode a header value produced by [`encode`]
///
/// Accepts either the bare value or a full `X-ChromeLogger-Data: ...` line.
pub fn decode(header_value: &str) -> Result<WirePayload> {
    let prefix = format!("{}:", HEADER_NAME);
    let value = header_value
        .strip_prefix(prefix.as_str())
        .unwrap_or(header_value)
        .trim();

    let bytes = STANDARD.decode(value)?;
    let payload: WirePayload = serde_json::from_slice(&bytes)?;

    if payload.columns != COLUMNS {
        return Err(ConsoleError::InvalidPayload {
            reason: format!("unexpected columns {:?}", payload.columns),
        });
    }
    Ok(payload)
}
