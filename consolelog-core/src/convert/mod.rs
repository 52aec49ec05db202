//! Value conversion
//!
//! Turns runtime [`Value`](crate::Value)s into a tree that JSON can carry.
//!
//! ## Key Properties
//!
//! - **Cycle-Safe**: an object already seen in the current call is replaced
//!   by its reference token before its fields are visited
//! - **Per-Call Identity**: every top-level logging call starts a fresh
//!   [`IdentityTracker`], so objects are expanded again in later calls
//! - **Total**: nothing fails; values JSON cannot represent are rewritten by
//!   [`normalize`] into descriptive strings
//!
//! ```text
//! &[Value] ──► convert_args ──► JsonValue ──► normalize ──► serde_json::Value
//!                   │                            (at encode time,
//!                   └─ IdentityTracker            whole buffer)
//! ```

mod json;
mod tracker;
mod converter;
mod normalize;

pub use json::JsonValue;
pub use tracker::{IdentityTracker, Sighting};
pub use converter::{convert, convert_args};
pub use normalize::normalize;

/// Reserved mapping key carrying an object's type name
pub const CLASS_NAME_KEY: &str = "___class_name";
