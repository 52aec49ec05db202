//! # ConsoleLog Core - Chrome Logger for Rust services
//!
//! ConsoleLog pushes structured debug data from server code into the
//! browser's developer console. Each logging call becomes a row of the
//! Chrome Logger protocol, and the whole session is carried in a single
//! `X-ChromeLogger-Data` response header:
//!
//! - **Value conversion**: scalars, sequences, mappings and structured
//!   objects become a JSON-safe tree; repeated or cyclic objects collapse to
//!   reference tokens such as `object (User) [2]`
//! - **Log session**: rows accumulate with call-site and level; consecutive
//!   rows from the same call-site show it only once
//! - **Encoding**: `{version, columns, rows}` as JSON, then base64
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use consolelog_core::{Console, Field, Inspect, MemorySink, Value};
//!
//! struct User { name: String }
//!
//! impl Inspect for User {
//!     fn type_name(&self) -> &str { "User" }
//!     fn fields(&self) -> Vec<Field> {
//!         vec![Field::private("name", self.name.as_str())]
//!     }
//! }
//!
//! let sink = MemorySink::new();
//! let console = Console::new(sink.clone());
//!
//! let user = Arc::new(User { name: "alice".to_string() });
//! console.log(&["Loaded".into(), Value::from(user.clone()), Value::from(user)]).unwrap();
//!
//! // The header value decodes back into the rows
//! let payload = consolelog_core::decode(&sink.value().unwrap()).unwrap();
//! assert_eq!(payload.rows[0].data[2], "object (User) [1]");
//! ```

pub mod console;
pub mod convert;
pub mod error;
pub mod level;
pub mod session;
pub mod value;

use std::sync::OnceLock;

// Re-export main types
pub use console::{
    BacktraceResolver, CallSite, CallSiteResolver, CallerLocation, Console, ConsoleConfig,
    ConsoleConfigBuilder, EmitMode, FixedCallSite, HeaderSink, MemorySink, NullSink,
    UnknownCallSite,
};
pub use convert::{convert, convert_args, normalize, IdentityTracker, JsonValue};
pub use error::{ConsoleError, ErrorCategory, ErrorDetail, ErrorResponse, Result};
pub use level::LevelTag;
pub use session::{decode, encode, CallSiteHistory, LogBuffer, LogSession, Row, WirePayload, WireRow};
pub use value::{Field, Handle, Inspect, ObjectRef, Value, Visibility};

/// Chrome Logger protocol version written into every payload
pub const VERSION: &str = "1.1";

/// Response header carrying the payload
pub const HEADER_NAME: &str = "X-ChromeLogger-Data";

/// Column names of every row
pub const COLUMNS: [&str; 3] = ["log", "backtrace", "type"];

struct DefaultConsole {
    console: Console,
    sink: MemorySink,
}

static DEFAULT: OnceLock<DefaultConsole> = OnceLock::new();

fn default_console() -> &'static DefaultConsole {
    DEFAULT.get_or_init(|| {
        let sink = MemorySink::new();
        DefaultConsole {
            console: Console::new(sink.clone()),
            sink,
        }
    })
}

/// Process-wide console, created on first use
///
/// Writes to an in-memory sink; read the latest header with
/// [`default_header`]. Request-scoped services should build their own
/// [`Console`] per request instead.
pub fn console() -> &'static Console {
    &default_console().console
}

/// Latest header value written by the process-wide console
pub fn default_header() -> Option<String> {
    default_console().sink.value()
}
