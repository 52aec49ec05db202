//! Middleware configuration

use std::fmt;
use std::sync::Arc;

use consolelog_core::{
    BacktraceResolver, CallSiteResolver, CallerLocation, ConsoleConfig, EmitMode,
};

/// Environment variable that turns header emission on or off
pub const ENABLED_VAR: &str = "CONSOLELOG_ENABLED";

/// Environment variable holding the call-site depth
pub const DEPTH_VAR: &str = "CONSOLELOG_DEPTH";

/// Per-request console configuration
#[derive(Clone)]
pub struct LayerConfig {
    /// Attach the header to responses
    pub enabled: bool,
    /// Frames skipped when resolving call-sites
    pub depth: usize,
    /// When rows reach the response header
    pub emit_mode: EmitMode,
    /// Call-site resolver shared by every request's console
    pub resolver: Arc<dyn CallSiteResolver>,
}

impl fmt::Debug for LayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerConfig")
            .field("enabled", &self.enabled)
            .field("depth", &self.depth)
            .field("emit_mode", &self.emit_mode)
            .field("resolver", &self.resolver.name())
            .finish()
    }
}

impl LayerConfig {
    /// Create a new configuration builder
    pub fn builder() -> LayerConfigBuilder {
        LayerConfigBuilder::default()
    }

    /// Read `CONSOLELOG_ENABLED` and `CONSOLELOG_DEPTH`, falling back to defaults
    ///
    /// A depth from the environment selects the backtrace resolver.
    pub fn from_env() -> Self {
        let mut builder = Self::builder();
        if let Some(enabled) = std::env::var(ENABLED_VAR).ok().and_then(|v| parse_flag(&v)) {
            builder = builder.enabled(enabled);
        }
        if let Some(depth) = std::env::var(DEPTH_VAR).ok().and_then(|v| v.trim().parse().ok()) {
            builder = builder.depth(depth);
        }
        builder.build()
    }

    /// Console settings for one request
    pub fn console_config(&self) -> ConsoleConfig {
        ConsoleConfig::builder()
            .depth(self.depth)
            .emit_mode(self.emit_mode)
            .build()
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            depth: ConsoleConfig::DEFAULT_DEPTH,
            emit_mode: EmitMode::PerRow,
            resolver: Arc::new(CallerLocation),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for LayerConfig
///
/// Setting a depth without a resolver selects [`BacktraceResolver`]; the
/// default [`CallerLocation`] reports the `#[track_caller]` site and has no
/// use for a depth.
#[derive(Default)]
pub struct LayerConfigBuilder {
    enabled: Option<bool>,
    depth: Option<usize>,
    emit_mode: Option<EmitMode>,
    resolver: Option<Arc<dyn CallSiteResolver>>,
}

impl LayerConfigBuilder {
    /// Enable or disable the header
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the call-site depth
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Set the emit mode
    pub fn emit_mode(mut self, mode: EmitMode) -> Self {
        self.emit_mode = Some(mode);
        self
    }

    /// Set the call-site resolver
    pub fn resolver<R: CallSiteResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Build the configuration
    pub fn build(self) -> LayerConfig {
        let defaults = LayerConfig::default();
        let resolver = match (self.resolver, self.depth) {
            (Some(resolver), _) => resolver,
            (None, Some(_)) => Arc::new(BacktraceResolver::new()),
            (None, None) => defaults.resolver,
        };
        LayerConfig {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            depth: self.depth.unwrap_or(defaults.depth),
            emit_mode: self.emit_mode.unwrap_or(defaults.emit_mode),
            resolver,
        }
    }
}
