//! Error types for the application layer.

use cronos_core::remote::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    /// Input rejected before any remote call. The message is the one shown
    /// to the user.
    #[error("{0}")]
    Validation(String),

    #[error("not signed in")]
    NotSignedIn,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl BoardError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
