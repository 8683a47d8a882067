//! Cross-cutting error types for Cronos.
//!
//! Store-specific errors (`DatabaseError`, `BoardError`, ...) live in their
//! own crates. `RemoteError` in [`crate::remote`] is the error of the remote
//! store port.

use thiserror::Error;

/// Errors that can be raised by any Cronos crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation before reaching any store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An entity could not be encoded as a JSON snapshot.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
