//! Response-bound header sink

use std::sync::{Arc, Mutex};

use consolelog_core::{ConsoleError, HeaderSink};

#[derive(Debug, Default)]
struct PendingHeader {
    value: Option<String>,
    sent: bool,
}

/// Holds the latest header value until the middleware copies it onto the
/// response
///
/// Once [`ResponseSink::seal_and_take`] has been called every write fails
/// with [`ConsoleError::HeaderAlreadySent`].
#[derive(Debug, Clone, Default)]
pub struct ResponseSink {
    state: Arc<Mutex<PendingHeader>>,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the sink and remove the pending value
    ///
    /// Both happen under one lock: a write either lands in the returned
    /// value or fails.
    pub fn seal_and_take(&self) -> Option<String> {
        let mut state = self.state.lock().ok()?;
        state.sent = true;
        state.value.take()
    }

    pub fn is_sent(&self) -> bool {
        self.state.lock().map(|state| state.sent).unwrap_or(true)
    }
}

impl HeaderSink for ResponseSink {
    fn set_header(&self, name: &str, value: &str) -> consolelog_core::Result<()> {
        let mut state = self.state.lock().map_err(|_| ConsoleError::SessionLocked)?;
        if state.sent {
            return Err(ConsoleError::HeaderAlreadySent {
                header: name.to_string(),
            });
        }
        state.value = Some(value.to_string());
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.is_sent()
    }

    fn name(&self) -> &'static str {
        "response"
    }
}
