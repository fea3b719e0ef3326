//! Cross-cutting error types for the WMS crates.
//!
//! Storage errors (`DatabaseError`) and configuration errors live in their
//! own crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any WMS crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A status transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Input failed validation (empty credentials, bad ranges, unknown codes).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
