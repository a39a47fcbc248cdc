//! Error types for the switchyard router.
//!
//! Only one error class crosses the dispatch boundary as a value:
//! [`ValidationError`], reported when an incoming event fails its
//! well-formedness check. Registration mistakes (empty or duplicate keys)
//! are wiring bugs and panic instead; see [`Router::register`].
//!
//! [`Router::register`]: crate::router::Router::register

use thiserror::Error;

/// Errors reported by [`Event::validate`](crate::event::Event::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required attribute is unset or empty.
    #[error("missing required attribute: {name}")]
    MissingAttribute {
        /// The attribute that is missing.
        name: &'static str,
    },

    /// An attribute is present but malformed.
    #[error("invalid attribute '{name}': {reason}")]
    InvalidAttribute {
        /// The offending attribute.
        name: &'static str,
        /// Reason the value was rejected.
        reason: String,
    },
}
