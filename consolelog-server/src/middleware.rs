//! Per-request console middleware
//!
//! Every request gets a fresh [`Console`] in its extensions. After the
//! handler returns, the sink is closed and the payload is copied onto the
//! response as the `X-ChromeLogger-Data` header.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json, Router,
};
use consolelog_core::{Console, ConsoleError, EmitMode};

use crate::config::LayerConfig;
use crate::sink::ResponseSink;

/// Lower-case form of [`consolelog_core::HEADER_NAME`]
const HEADER: &str = "x-chromelogger-data";

/// Attach a per-request console to every route of `router`
pub fn attach<S>(router: Router<S>, config: LayerConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn_with_state(config, console_layer))
}

/// Middleware function; see [`attach`]
pub async fn console_layer(
    State(config): State<LayerConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let sink = ResponseSink::new();
    let console = Console::new(sink.clone())
        .with_shared_resolver(config.resolver.clone())
        .with_config(config.console_config());
    request.extensions_mut().insert(console.clone());

    let mut response = next.run(request).await;

    // Close first: anything logged from here on fails with HeaderAlreadySent.
    let pending = sink.seal_and_take();
    if config.enabled {
        if let Err(err) = attach_header(&console, pending, &config, &mut response) {
            tracing::warn!(error = %err, code = err.error_code(), "console header dropped");
        }
    }

    response
}

fn attach_header(
    console: &Console,
    pending: Option<String>,
    config: &LayerConfig,
    response: &mut Response,
) -> consolelog_core::Result<()> {
    let value = match config.emit_mode {
        EmitMode::PerRow => pending,
        // Rows buffered before the sink closed are all in the session.
        EmitMode::Deferred => console.encode()?,
    };
    let Some(value) = value else {
        return Ok(());
    };
    // Base64 output is always a valid header value.
    let header = HeaderValue::from_str(&value).map_err(|err| ConsoleError::InvalidPayload {
        reason: err.to_string(),
    })?;

    tracing::debug!(bytes = value.len(), "attached console header");
    response
        .headers_mut()
        .insert(HeaderName::from_static(HEADER), header);
    Ok(())
}

/// Console failure returned from a handler
///
/// Renders as a JSON [`ErrorResponse`](consolelog_core::ErrorResponse) with
/// a status derived from the error category.
#[derive(Debug)]
pub struct ConsoleRejection(pub ConsoleError);

impl From<ConsoleError> for ConsoleRejection {
    fn from(err: ConsoleError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ConsoleRejection {
    fn into_response(self) -> Response {
        use consolelog_core::ErrorCategory;

        let status = match self.0.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Transport | ErrorCategory::Encoding | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(self.0.to_error_response())).into_response()
    }
}
