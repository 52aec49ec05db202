//! Error types for ConsoleLog operations
//!
//! This module provides the error handling system for the façade and the
//! session encoder:
//! - Structured error types with descriptive messages
//! - Error codes for programmatic handling
//! - Error categories for grouping and filtering
//! - JSON serialization for middleware and tooling responses
//!
//! Value conversion itself never fails. Every runtime value is coerced into
//! something JSON can carry, so the only errors here come from argument
//! validation, the header transport, and payload decoding.
//!
//! # Example
//!
//! ```rust
//! use consolelog_core::error::{ConsoleError, ErrorCategory};
//!
//! fn handle_error(err: ConsoleError) {
//!     match err.category() {
//!         ErrorCategory::Validation => println!("bad logging call"),
//!         ErrorCategory::Transport => println!("header could not be written"),
//!         _ => println!("other error"),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ConsoleLog operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The logging call itself was malformed
    Validation,
    /// The header sink refused the payload
    Transport,
    /// Payload encoding or decoding failed
    Encoding,
    /// Internal state is unusable
    Internal,
}

/// Errors that can occur in ConsoleLog operations
#[derive(Error, Debug)]
pub enum ConsoleError {
    // ═══════════════════════════════════════════════════════════════════════
    // Dispatch errors (level and argument validation)
    // ═══════════════════════════════════════════════════════════════════════

    /// Level name is not one of the Chrome Logger console methods
    #[error("Unsupported chrome logger type: '{level}'. Use one of log, info, warn, error, group, groupEnd, groupCollapsed, table.")]
    UnsupportedLevel { level: String },

    /// A logging call other than `groupEnd` received no values
    #[error("No arguments for '{level}'; nothing to log.")]
    NoArguments { level: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Transport errors (header sink boundary)
    // ═══════════════════════════════════════════════════════════════════════

    /// The transport no longer accepts headers; the latest payload is lost
    #[error("Header '{header}' could not be set: headers were already sent.")]
    HeaderAlreadySent { header: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Encoding errors (wire payload)
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Header value is not valid base64
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Header value decoded but is not a Chrome Logger payload
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Internal errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Session lock is poisoned (panic occurred while holding it)
    #[error("Log session lock poisoned. A previous logging call panicked.")]
    SessionLocked,
}

impl ConsoleError {
    /// Returns true if retrying the same call might succeed
    ///
    /// No console error is transient: validation errors repeat, a sent
    /// header stays sent and a poisoned session stays poisoned.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConsoleError::UnsupportedLevel { .. }
            | ConsoleError::NoArguments { .. }
            | ConsoleError::HeaderAlreadySent { .. }
            | ConsoleError::Json(_)
            | ConsoleError::Base64(_)
            | ConsoleError::InvalidPayload { .. }
            | ConsoleError::SessionLocked => false,
        }
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConsoleError::UnsupportedLevel { .. } | ConsoleError::NoArguments { .. } => {
                ErrorCategory::Validation
            }

            ConsoleError::HeaderAlreadySent { .. } => ErrorCategory::Transport,

            ConsoleError::Json(_)
            | ConsoleError::Base64(_)
            | ConsoleError::InvalidPayload { .. } => ErrorCategory::Encoding,

            ConsoleError::SessionLocked => ErrorCategory::Internal,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::UnsupportedLevel { .. } => "UNSUPPORTED_LEVEL",
            ConsoleError::NoArguments { .. } => "NO_ARGUMENTS",
            ConsoleError::HeaderAlreadySent { .. } => "HEADER_ALREADY_SENT",
            ConsoleError::Json(_) => "JSON_ERROR",
            ConsoleError::Base64(_) => "BASE64_ERROR",
            ConsoleError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            ConsoleError::SessionLocked => "SESSION_LOCKED",
        }
    }

    /// Converts this error to a JSON-serializable response object
    ///
    /// ```json
    /// {
    ///   "error": {
    ///     "code": "UNSUPPORTED_LEVEL",
    ///     "message": "Unsupported chrome logger type: 'bogus'...",
    ///     "category": "validation",
    ///     "recoverable": false
    ///   }
    /// }
    /// ```
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
                recoverable: self.is_recoverable(),
            },
        }
    }
}

/// JSON-serializable error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "NO_ARGUMENTS")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category
    pub category: ErrorCategory,
    /// Whether retry might succeed
    pub recoverable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ConsoleError::UnsupportedLevel {
                level: "bogus".to_string()
            }
            .error_code(),
            "UNSUPPORTED_LEVEL"
        );
        assert_eq!(
            ConsoleError::HeaderAlreadySent {
                header: "X-ChromeLogger-Data".to_string()
            }
            .error_code(),
            "HEADER_ALREADY_SENT"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ConsoleError::NoArguments {
                level: "info".to_string()
            }
            .category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            ConsoleError::HeaderAlreadySent {
                header: "X".to_string()
            }
            .category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            ConsoleError::InvalidPayload {
                reason: "missing rows".to_string()
            }
            .category(),
            ErrorCategory::Encoding
        );
        assert_eq!(ConsoleError::SessionLocked.category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_error_is_recoverable() {
        // Poisoning is permanent.
        assert!(!ConsoleError::SessionLocked.is_recoverable());
        assert!(!ConsoleError::UnsupportedLevel {
            level: "bogus".to_string()
        }
        .is_recoverable());
        assert!(!ConsoleError::HeaderAlreadySent {
            header: "X".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_response_serialization() {
        let err = ConsoleError::UnsupportedLevel {
            level: "bogus".to_string(),
        };
        let response = err.to_error_response();

        let json = serde_json::to_string_pretty(&response).unwrap();
        assert!(json.contains("UNSUPPORTED_LEVEL"));
        assert!(json.contains("bogus"));
        assert!(json.contains("validation"));

        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error.code, "UNSUPPORTED_LEVEL");
        assert!(!parsed.error.recoverable);
    }

    #[test]
    fn test_error_messages_are_helpful() {
        let msg = ConsoleError::NoArguments {
            level: "info".to_string(),
        }
        .to_string();
        assert!(msg.contains("info"));
        assert!(msg.contains("nothing to log"));
    }
}
