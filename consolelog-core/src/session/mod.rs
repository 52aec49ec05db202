//! Log sessions
//!
//! A [`LogSession`] owns the state that lives for one request: the
//! append-only [`LogBuffer`] and the [`CallSiteHistory`] used to collapse
//! repeated call-sites.
//!
//! ## Row Rules
//!
//! 1. `group`, `groupEnd` and `groupCollapsed` rows never carry a call-site,
//!    and do not touch the history.
//! 2. Any other row whose call-site equals the last emitted one gets `null`.
//! 3. The row is appended; rows are never modified afterwards.
//!
//! ```text
//! record(level, args, call_site)
//!   │
//!   ├─ convert_args ───────────► JsonValue
//!   ├─ add_row ──► history ────► Row ──► LogBuffer
//!   │
//! encode() ──► JSON ──► base64 ──► X-ChromeLogger-Data
//! ```

mod row;
mod history;
mod buffer;
mod encoder;

pub use row::Row;
pub use history::CallSiteHistory;
pub use buffer::LogBuffer;
pub use encoder::{decode, encode, header_line, to_json, WirePayload, WireRow};

use uuid::Uuid;

use crate::convert::{convert_args, JsonValue};
use crate::error::{ConsoleError, Result};
use crate::level::LevelTag;
use crate::value::Value;

/// Buffer and call-site history of one request
#[derive(Debug)]
pub struct LogSession {
    id: Uuid,
    buffer: LogBuffer,
    history: CallSiteHistory,
}

impl LogSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            buffer: LogBuffer::new(),
            history: CallSiteHistory::new(),
        }
    }

    /// Session id, used to correlate diagnostics
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn rows(&self) -> &[Row] {
        self.buffer.rows()
    }

    pub fn history(&self) -> &CallSiteHistory {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Validate, convert and append one logging call
    pub fn record(&mut self, level: LevelTag, args: &[Value], call_site: String) -> Result<&Row> {
        if args.is_empty() && !level.allows_empty() {
            return Err(ConsoleError::NoArguments {
                level: level.as_str().to_string(),
            });
        }
        let data = convert_args(args);
        Ok(self.add_row(data, level, call_site))
    }

    /// Append an already converted row, applying the call-site rules
    pub fn add_row(&mut self, data: JsonValue, level: LevelTag, raw_call_site: String) -> &Row {
        let call_site = if level.is_structural() {
            None
        } else {
            self.history.admit(raw_call_site)
        };

        tracing::debug!(
            session = %self.id,
            level = %level,
            suppressed = call_site.is_none(),
            rows = self.buffer.len() + 1,
            "appended console row"
        );

        self.buffer.push(Row::new(data, call_site, level))
    }

    /// Encode the current buffer into a header value
    pub fn encode(&self) -> Result<String> {
        encode(&self.buffer)
    }
}

impl Default for LogSession {
    fn default() -> Self {
        Self::new()
    }
}
