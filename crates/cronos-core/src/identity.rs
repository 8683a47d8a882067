//! Session identity and the authentication provider port.
//!
//! The current user is never read from ambient state: a [`SessionUser`] is
//! resolved once by an [`AuthProvider`] and passed explicitly to every
//! component that needs it.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: String,
    pub email: Option<String>,
}

/// What the authentication provider currently knows about the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The provider has not resolved a session yet.
    Loading,
    SignedOut,
    SignedIn(SessionUser),
}

impl SessionState {
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Loading | Self::SignedOut => None,
        }
    }
}

/// Hosted authentication collaborator.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the current session.
    async fn session_state(&self) -> SessionState;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the provider cannot clear the session.
    async fn sign_out(&self) -> Result<(), CoreError>;
}
