//! Call-site resolution
//!
//! The façade asks a [`CallSiteResolver`] where the logging call came from
//! and formats the answer as `"<file> : <line>"`, or `"unknown"`.
//!
//! - [`CallerLocation`] (default): reads the `#[track_caller]` location of
//!   the façade call. Wrappers that are themselves `#[track_caller]` report
//!   their own caller; the depth is not needed.
//! - [`BacktraceResolver`]: walks a captured backtrace and honours the
//!   configured depth. Needs debug info; falls back to `"unknown"`.
//! - [`FixedCallSite`] / [`UnknownCallSite`]: constant answers for tests
//!   and tooling.

use std::fmt;
use std::panic::Location;

/// Text used when no call-site is available
pub const UNKNOWN_CALL_SITE: &str = "unknown";

/// Resolved source position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Wire text for an optional call-site
    pub fn describe(site: Option<&CallSite>) -> String {
        site.map(CallSite::to_string)
            .unwrap_or_else(|| UNKNOWN_CALL_SITE.to_string())
    }
}

impl From<&Location<'_>> for CallSite {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.file, self.line)
    }
}

/// Source of call-site information
pub trait CallSiteResolver: Send + Sync {
    /// Resolve the call-site `depth` frames above the façade
    ///
    /// `caller` is the `#[track_caller]` location of the façade call.
    fn resolve(&self, depth: usize, caller: &'static Location<'static>) -> Option<CallSite>;

    /// Resolver name (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// Reports the `#[track_caller]` location of the logging call
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerLocation;

impl CallSiteResolver for CallerLocation {
    fn resolve(&self, _depth: usize, caller: &'static Location<'static>) -> Option<CallSite> {
        Some(CallSite::from(caller))
    }

    fn name(&self) -> &'static str {
        "caller-location"
    }
}

/// Always reports the same call-site
#[derive(Debug, Clone, Default)]
pub struct FixedCallSite(pub Option<CallSite>);

impl FixedCallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self(Some(CallSite::new(file, line)))
    }
}

impl CallSiteResolver for FixedCallSite {
    fn resolve(&self, _depth: usize, _caller: &'static Location<'static>) -> Option<CallSite> {
        self.0.clone()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Never knows the call-site
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownCallSite;

impl CallSiteResolver for UnknownCallSite {
    fn resolve(&self, _depth: usize, _caller: &'static Location<'static>) -> Option<CallSite> {
        None
    }

    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// Walks a captured backtrace, skipping runtime and console frames
///
/// Depth 1 is the first frame outside this crate and the standard library,
/// depth 2 its caller, and so on.
#[derive(Debug, Clone)]
pub struct BacktraceResolver {
    skip_prefixes: Vec<String>,
}

impl BacktraceResolver {
    pub fn new() -> Self {
        Self {
            skip_prefixes: ["std::", "core::", "alloc::", "consolelog_core::", "__rust"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Also skip frames whose symbol starts with `prefix`
    ///
    /// Lets a wrapping logger hide its own module instead of raising depth.
    pub fn skip(mut self, prefix: impl Into<String>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }

    fn is_internal(&self, symbol: &str) -> bool {
        let symbol = symbol.trim_start_matches('<');
        self.skip_prefixes.iter().any(|p| symbol.starts_with(p.as_str()))
    }

    /// Pick the call-site at `depth` from rendered backtrace text
    pub fn select(&self, backtrace: &str, depth: usize) -> Option<CallSite> {
        parse_frames(backtrace)
            .into_iter()
            .filter(|(symbol, _)| !self.is_internal(symbol))
            .filter_map(|(_, site)| site)
            .nth(depth.saturating_sub(1))
    }
}

impl Default for BacktraceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CallSiteResolver for BacktraceResolver {
    fn resolve(&self, depth: usize, _caller: &'static Location<'static>) -> Option<CallSite> {
        let backtrace = std::backtrace::Backtrace::force_capture();
        self.select(&backtrace.to_string(), depth)
    }

    fn name(&self) -> &'static str {
        "backtrace"
    }
}

/// Split rendered backtrace text into `(symbol, first location)` frames
fn parse_frames(text: &str) -> Vec<(String, Option<CallSite>)> {
    let mut frames: Vec<(String, Option<CallSite>)> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.1.is_none() {
                    frame.1 = parse_location(location);
                }
            }
            continue;
        }

        let symbol = match line.split_once(": ") {
            Some((index, rest)) if index.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => line,
        };
        frames.push((symbol.to_string(), None));
    }

    frames
}

/// Parse `path:line:col` or `path:line`
fn parse_location(text: &str) -> Option<CallSite> {
    let mut parts = text.rsplitn(3, ':');
    let last = parts.next()?;
    let middle = parts.next()?;

    match parts.next() {
        Some(path) => {
            let line = middle.parse().ok()?;
            last.parse::<u32>().ok()?;
            Some(CallSite::new(path, line))
        }
        None => Some(CallSite::new(middle, last.parse().ok()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "   0: std::backtrace_rs::backtrace::libunwind::trace
             at /rustc/abc/library/std/src/../../backtrace/src/backtrace/libunwind.rs:116:5
   1: consolelog_core::console::Console::emit
             at ./consolelog-core/src/console/mod.rs:120:27
   2: my_app::logging::Logger::formatted
             at ./src/logging.rs:14:9
   3: my_app::handlers::index
             at ./src/handlers.rs:42:5
   4: <F as axum::handler::Handler>::call
   5: my_app::main
             at ./src/main.rs:7:5
";

    #[test]
    fn test_call_site_format() {
        assert_eq!(CallSite::new("src/lib.rs", 12).to_string(), "src/lib.rs : 12");
        assert_eq!(CallSite::describe(None), "unknown");
        assert_eq!(
            CallSite::describe(Some(&CallSite::new("a.rs", 1))),
            "a.rs : 1"
        );
    }

    #[test]
    fn test_caller_location() {
        let caller = Location::caller();
        let site = CallerLocation.resolve(1, caller).unwrap();
        assert!(site.file.ends_with("callsite.rs"));
        assert_eq!(site.line, caller.line());
    }

    #[test]
    fn test_fixed_and_unknown() {
        let caller = Location::caller();
        assert_eq!(
            FixedCallSite::new("x.rs", 3).resolve(5, caller),
            Some(CallSite::new("x.rs", 3))
        );
        assert_eq!(UnknownCallSite.resolve(1, caller), None);
    }

    #[test]
    fn test_backtrace_depth_selection() {
        let resolver = BacktraceResolver::new();
        assert_eq!(
            resolver.select(SAMPLE, 1),
            Some(CallSite::new("./src/logging.rs", 14))
        );
        assert_eq!(
            resolver.select(SAMPLE, 2),
            Some(CallSite::new("./src/handlers.rs", 42))
        );
        // Frames without a location are skipped.
        assert_eq!(
            resolver.select(SAMPLE, 3),
            Some(CallSite::new("./src/main.rs", 7))
        );
        assert_eq!(resolver.select(SAMPLE, 4), None);
    }

    #[test]
    fn test_backtrace_skip_prefix() {
        let resolver = BacktraceResolver::new().skip("my_app::logging::");
        assert_eq!(
            resolver.select(SAMPLE, 1),
            Some(CallSite::new("./src/handlers.rs", 42))
        );
    }

    #[test]
    fn test_parse_location_forms() {
        assert_eq!(parse_location("a/b.rs:10:2"), Some(CallSite::new("a/b.rs", 10)));
        assert_eq!(parse_location("a/b.rs:10"), Some(CallSite::new("a/b.rs", 10)));
        assert_eq!(parse_location("no-location"), None);
    }
}
