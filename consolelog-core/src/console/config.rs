//! Console configuration

/// When the header is re-encoded and handed to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// After every appended row; the sink always holds the latest payload
    #[default]
    PerRow,
    /// Only on [`Console::flush`](super::Console::flush), once per response
    Deferred,
}

/// Console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Stack depth forwarded to the call-site resolver (1 = direct caller)
    pub depth: usize,
    /// Header emission mode
    pub emit_mode: EmitMode,
}

impl ConsoleConfig {
    /// Default depth: the code that called the console directly
    pub const DEFAULT_DEPTH: usize = 1;

    /// Create a new configuration builder
    pub fn builder() -> ConsoleConfigBuilder {
        ConsoleConfigBuilder::default()
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            depth: Self::DEFAULT_DEPTH,
            emit_mode: EmitMode::default(),
        }
    }
}

/// Builder for ConsoleConfig
#[derive(Debug, Default)]
pub struct ConsoleConfigBuilder {
    depth: Option<usize>,
    emit_mode: Option<EmitMode>,
}

impl ConsoleConfigBuilder {
    /// Set the call-site depth
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Set the emission mode
    pub fn emit_mode(mut self, mode: EmitMode) -> Self {
        self.emit_mode = Some(mode);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConsoleConfig {
        ConsoleConfig {
            depth: self.depth.unwrap_or(ConsoleConfig::DEFAULT_DEPTH),
            emit_mode: self.emit_mode.unwrap_or_default(),
        }
    }
}
