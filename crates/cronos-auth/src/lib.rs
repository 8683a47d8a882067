//! # cronos-auth
//!
//! Local session identity for Cronos.
//!
//! The signed-in user is resolved, in priority order, from:
//! 1. `CRONOS_AUTH__USER_ID` (and `CRONOS_AUTH__EMAIL`)
//! 2. the `[auth]` config section
//! 3. the credentials file written by `cronos auth login` (`~/.cronos/credentials`)
//!
//! [`LocalAuth`] implements the [`AuthProvider`] port the session boundary
//! consumes.

pub mod credentials;
pub mod error;

use async_trait::async_trait;
use cronos_config::AuthConfig;
use cronos_core::errors::CoreError;
use cronos_core::identity::{AuthProvider, SessionState, SessionUser};

pub use credentials::CredentialStore;
pub use error::AuthError;

const ENV_USER_ID: &str = "CRONOS_AUTH__USER_ID";
const ENV_EMAIL: &str = "CRONOS_AUTH__EMAIL";

/// Where the current identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Environment,
    Config,
    CredentialsFile,
}

impl IdentitySource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Config => "config",
            Self::CredentialsFile => "credentials file",
        }
    }
}

/// File and environment backed authentication provider.
#[derive(Debug, Clone)]
pub struct LocalAuth {
    config: AuthConfig,
    credentials: CredentialStore,
}

impl LocalAuth {
    #[must_use]
    pub const fn new(config: AuthConfig, credentials: CredentialStore) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Provider using the default credentials file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialStore` when there is no home directory.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self::new(config.clone(), CredentialStore::default_location()?))
    }

    /// Resolve the current user and where it came from.
    #[must_use]
    pub fn resolve(&self) -> Option<(SessionUser, IdentitySource)> {
        if let Some(user_id) = non_blank(std::env::var(ENV_USER_ID).ok()) {
            let email = non_blank(std::env::var(ENV_EMAIL).ok());
            return Some((SessionUser { user_id, email }, IdentitySource::Environment));
        }

        if self.config.is_configured() {
            let user = SessionUser {
                user_id: self.config.user_id.trim().to_string(),
                email: non_blank(Some(self.config.email.clone())),
            };
            return Some((user, IdentitySource::Config));
        }

        self.credentials
            .load()
            .map(|user| (user, IdentitySource::CredentialsFile))
    }

    /// The current user, or `AuthError::NotAuthenticated`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when no source has a user.
    pub fn current_user(&self) -> Result<SessionUser, AuthError> {
        self.resolve()
            .map(|(user, _)| user)
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Persist `user_id` as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUser` for a blank id, or
    /// `AuthError::CredentialStore` if the file cannot be written.
    pub fn sign_in(&self, user_id: &str, email: Option<&str>) -> Result<SessionUser, AuthError> {
        let user_id = user_id.trim();
        if user_id.is_empty() || user_id.chars().any(char::is_whitespace) {
            return Err(AuthError::InvalidUser(user_id.to_string()));
        }

        let user = SessionUser {
            user_id: user_id.to_string(),
            email: non_blank(email.map(String::from)),
        };
        self.credentials.store(&user)?;
        tracing::info!(user_id = %user.user_id, "signed in");

        if let Some((_, source)) = self.resolve() {
            if source != IdentitySource::CredentialsFile {
                tracing::warn!(source = source.as_str(), "stored login is shadowed by another identity source");
            }
        }
        Ok(user)
    }

    /// Remove the stored login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PinnedIdentity` when the identity comes from the
    /// environment or config, or `AuthError::CredentialStore` if the file
    /// cannot be removed.
    pub fn sign_out_local(&self) -> Result<(), AuthError> {
        match self.resolve() {
            Some((_, IdentitySource::Environment)) => Err(AuthError::PinnedIdentity("environment")),
            Some((_, IdentitySource::Config)) => Err(AuthError::PinnedIdentity("config")),
            _ => {
                self.credentials.delete()?;
                tracing::info!("signed out");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuth {
    async fn session_state(&self) -> SessionState {
        self.resolve()
            .map_or(SessionState::SignedOut, |(user, _)| SessionState::SignedIn(user))
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        self.sign_out_local()
            .map_err(|e| CoreError::Other(anyhow::anyhow!(e)))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
