//! ConsoleLog Server - Chrome Logger middleware for axum
//!
//! Each request gets its own [`Console`]. Handlers pull it out of the
//! request extensions, log through it, and the middleware attaches the
//! `X-ChromeLogger-Data` header to the response:
//!
//! ```text
//!   request ──► console_layer ──► handler (Extension<Console>)
//!                    │                        │ log / info / group ...
//!                    ▼                        ▼
//!   response ◄── header from ResponseSink ◄── LogSession
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{routing::get, Extension, Router};
//! use consolelog_server::{Console, ConsoleRejection, ConsoleRouterExt, LayerConfig};
//!
//! async fn index(Extension(console): Extension<Console>) -> Result<&'static str, ConsoleRejection> {
//!     console.info(&["rendering index".into()])?;
//!     Ok("hello")
//! }
//!
//! let app: Router = Router::new()
//!     .route("/", get(index))
//!     .with_console(LayerConfig::from_env());
//! ```

mod config;
mod middleware;
mod sink;

pub use config::{LayerConfig, LayerConfigBuilder, DEPTH_VAR, ENABLED_VAR};
pub use middleware::{attach, console_layer, ConsoleRejection};
pub use sink::ResponseSink;

pub use consolelog_core::{Console, ConsoleError, EmitMode, Value};

use axum::Router;

/// Router extension for attaching the console middleware
pub trait ConsoleRouterExt {
    fn with_console(self, config: LayerConfig) -> Self;
}

impl<S> ConsoleRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_console(self, config: LayerConfig) -> Self {
        attach(self, config)
    }
}
