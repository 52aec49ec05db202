//! Header sinks
//!
//! A sink is where the encoded payload goes: an HTTP response under
//! construction, a test recorder, or nowhere.

use std::sync::{Arc, Mutex};

use crate::error::{ConsoleError, Result};

/// Destination for the encoded header
///
/// All methods take `&self` to allow for interior mutability patterns.
pub trait HeaderSink: Send + Sync {
    /// Set (or replace) a header
    ///
    /// Returns [`ConsoleError::HeaderAlreadySent`] when headers can no
    /// longer be written, e.g. after the response has been flushed.
    fn set_header(&self, name: &str, value: &str) -> Result<()>;

    /// Whether headers can still be written
    ///
    /// Deferred consoles check this before buffering a row, since they do
    /// not call [`set_header`](HeaderSink::set_header) until flush.
    fn is_open(&self) -> bool {
        true
    }

    /// Sink name (for logging/debugging)
    fn name(&self) -> &'static str;
}

#[derive(Debug, Default)]
struct MemoryState {
    header: Option<(String, String)>,
    writes: usize,
    sealed: bool,
}

/// In-memory sink keeping the latest header
///
/// Clones share state, so a test can keep one clone and hand the other to a
/// console. [`MemorySink::seal`] simulates headers that were already sent.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest header value written
    pub fn value(&self) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.header.as_ref().map(|(_, v)| v.clone()))
    }

    /// Latest header as a `(name, value)` pair
    pub fn header(&self) -> Option<(String, String)> {
        self.state.lock().ok().and_then(|s| s.header.clone())
    }

    /// Number of accepted writes
    pub fn writes(&self) -> usize {
        self.state.lock().map(|s| s.writes).unwrap_or(0)
    }

    /// Refuse all further writes
    pub fn seal(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.sealed = true;
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.state.lock().map(|s| s.sealed).unwrap_or(true)
    }
}

impl HeaderSink for MemorySink {
    fn set_header(&self, name: &str, value: &str) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| ConsoleError::SessionLocked)?;
        if state.sealed {
            return Err(ConsoleError::HeaderAlreadySent {
                header: name.to_string(),
            });
        }
        state.header = Some((name.to_string(), value.to_string()));
        state.writes += 1;
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.is_sealed()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Sink that discards every header
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl HeaderSink for NullSink {
    fn set_header(&self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
