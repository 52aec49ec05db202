//! Dispatch façade
//!
//! [`Console`] validates a logging call, converts its arguments, resolves
//! the call-site, appends the row to its [`LogSession`] and hands the
//! re-encoded buffer to a [`HeaderSink`].
//!
//! ```rust
//! use consolelog_core::{Console, MemorySink, Value};
//!
//! let sink = MemorySink::new();
//! let console = Console::new(sink.clone());
//!
//! console.group(&["Request".into()]).unwrap();
//! console.info(&["user".into(), Value::from(42)]).unwrap();
//! console.group_end().unwrap();
//!
//! let payload = consolelog_core::decode(&sink.value().unwrap()).unwrap();
//! assert_eq!(payload.rows.len(), 3);
//! ```

mod callsite;
mod config;
mod sink;

pub use callsite::{
    BacktraceResolver, CallSite, CallSiteResolver, CallerLocation, FixedCallSite,
    UnknownCallSite, UNKNOWN_CALL_SITE,
};
pub use config::{ConsoleConfig, ConsoleConfigBuilder, EmitMode};
pub use sink::{HeaderSink, MemorySink, NullSink};

use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::convert::convert_args;
use crate::error::{ConsoleError, Result};
use crate::level::LevelTag;
use crate::session::LogSession;
use crate::value::Value;
use crate::HEADER_NAME;

/// Logging façade over a shared [`LogSession`]
///
/// Clones share the session, sink and resolver. Logging methods are
/// `#[track_caller]`.
#[derive(Clone)]
pub struct Console {
    session: Arc<Mutex<LogSession>>,
    sink: Arc<dyn HeaderSink>,
    resolver: Arc<dyn CallSiteResolver>,
    config: ConsoleConfig,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("sink", &self.sink.name())
            .field("resolver", &self.resolver.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Console {
    /// Create a console with a fresh session writing to `sink`
    pub fn new<S: HeaderSink + 'static>(sink: S) -> Self {
        Self::with_sink(Arc::new(sink))
    }

    /// Create a console with a fresh session and a shared sink
    pub fn with_sink(sink: Arc<dyn HeaderSink>) -> Self {
        Self {
            session: Arc::new(Mutex::new(LogSession::new())),
            sink,
            resolver: Arc::new(CallerLocation),
            config: ConsoleConfig::default(),
        }
    }

    /// Use a different call-site resolver
    pub fn with_resolver<R: CallSiteResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Use a shared call-site resolver
    pub fn with_shared_resolver(mut self, resolver: Arc<dyn CallSiteResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use a different configuration
    pub fn with_config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing session
    pub fn with_session(mut self, session: Arc<Mutex<LogSession>>) -> Self {
        self.session = session;
        self
    }

    /// A console for wrapping loggers: same session, different depth
    pub fn with_depth(&self, depth: usize) -> Self {
        let mut console = self.clone();
        console.config.depth = depth;
        console
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Handle to the shared session
    pub fn session(&self) -> Arc<Mutex<LogSession>> {
        Arc::clone(&self.session)
    }

    /// Number of rows logged so far
    pub fn row_count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Log through a console method named at runtime
    ///
    /// Fails with [`ConsoleError::UnsupportedLevel`] for unknown names.
    #[track_caller]
    pub fn dispatch(&self, level: &str, args: &[Value]) -> Result<()> {
        let level: LevelTag = level.parse()?;
        self.emit_at(level, args, Location::caller())
    }

    /// Log `args` at `level`
    #[track_caller]
    pub fn emit(&self, level: LevelTag, args: &[Value]) -> Result<()> {
        self.emit_at(level, args, Location::caller())
    }

    #[track_caller]
    pub fn log(&self, args: &[Value]) -> Result<()> {
        self.emit_at(LevelTag::Log, args, Location::caller())
    }

    #[track_caller]
    pub fn info(&self, args: &[Value]) -> Result<()> {
        self.emit_at(LevelTag::Info, args, Location::caller())
    }

    #[track_caller]
    pub fn warn(&self, args: &[Value]) -> Result<()> {
        self.emit_at(LevelTag::Warn, args, Location::caller())
    }

    #[track_caller]
    pub fn error(&self, args: &[Value]) -> Result<()> {
        self.emit_at(LevelTag::Error, args, Location::caller())
    }

    #[track_caller]
    pub fn group(&self, args: &[Value]) -> Result<()> {
        self.emit_at(LevelTag::Group, args, Location::caller())
    }

    #[track_caller]
    pub fn group_collapsed(&self, args: &[Value]) -> Result<()> {
        self.emit_at(LevelTag::GroupCollapsed, args, Location::caller())
    }

    #[track_caller]
    pub fn group_end(&self) -> Result<()> {
        self.emit_at(LevelTag::GroupEnd, &[], Location::caller())
    }

    /// Log rows for `console.table`
    #[track_caller]
    pub fn table(&self, args: &[Value]) -> Result<()> {
        self.emit_at(LevelTag::Table, args, Location::caller())
    }

    /// Encode the buffer and hand it to the sink
    ///
    /// Needed in [`EmitMode::Deferred`]; harmless in per-row mode.
    pub fn flush(&self) -> Result<()> {
        let session = self.lock()?;
        self.write_header(&session)
    }

    /// Encode the buffer without touching the sink
    ///
    /// `None` while no row has been logged.
    pub fn encode(&self) -> Result<Option<String>> {
        let session = self.lock()?;
        if session.is_empty() {
            return Ok(None);
        }
        session.encode().map(Some)
    }

    fn emit_at(
        &self,
        level: LevelTag,
        args: &[Value],
        caller: &'static Location<'static>,
    ) -> Result<()> {
        if args.is_empty() && !level.allows_empty() {
            return Err(ConsoleError::NoArguments {
                level: level.as_str().to_string(),
            });
        }

        // Convert before locking: field enumeration runs user code.
        let data = convert_args(args);
        let site = self.resolver.resolve(self.config.depth, caller);
        let call_site = CallSite::describe(site.as_ref());

        let mut session = self.lock()?;
        // Checked under the session lock so a row is either rejected here or
        // seen by whoever encodes after closing the sink.
        if self.config.emit_mode == EmitMode::Deferred && !self.sink.is_open() {
            return Err(ConsoleError::HeaderAlreadySent {
                header: HEADER_NAME.to_string(),
            });
        }
        session.add_row(data, level, call_site);

        match self.config.emit_mode {
            EmitMode::PerRow => self.write_header(&session),
            EmitMode::Deferred => Ok(()),
        }
    }

    fn write_header(&self, session: &LogSession) -> Result<()> {
        let value = session.encode()?;
        tracing::trace!(
            session = %session.id(),
            sink = self.sink.name(),
            bytes = value.len(),
            "writing console header"
        );

        self.sink.set_header(HEADER_NAME, &value).inspect_err(|err| {
            tracing::warn!(
                session = %session.id(),
                sink = self.sink.name(),
                error = %err,
                "console header rejected"
            );
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, LogSession>> {
        self.session.lock().map_err(|_| ConsoleError::SessionLocked)
    }
}
