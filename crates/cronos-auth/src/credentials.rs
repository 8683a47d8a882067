//! The credentials file holding the signed-in user.

use std::fs;
use std::path::{Path, PathBuf};

use cronos_core::identity::SessionUser;

use crate::error::AuthError;

const CREDENTIALS_DIR: &str = ".cronos";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// JSON file store for one [`SessionUser`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// `~/.cronos/credentials`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialStore` when there is no home directory.
    pub fn default_location() -> Result<Self, AuthError> {
        dirs::home_dir()
            .map(|h| Self::at(h.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE_NAME)))
            .ok_or_else(|| {
                AuthError::CredentialStore("home directory not found, cannot store credentials".into())
            })
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `user`, readable by the owner only.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialStore` if the file cannot be written.
    pub fn store(&self, user: &SessionUser) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::CredentialStore(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let body = serde_json::to_string_pretty(user)
            .map_err(|e| AuthError::CredentialStore(format!("encode credentials: {e}")))?;
        fs::write(&self.path, body).map_err(|e| {
            AuthError::CredentialStore(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::CredentialStore(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    /// Read the stored user. Missing, blank, or unreadable files mean
    /// nobody is signed in.
    #[must_use]
    pub fn load(&self) -> Option<SessionUser> {
        let raw = fs::read_to_string(&self.path).ok()?;
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) if !user.user_id.trim().is_empty() => Some(user),
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "ignoring malformed credentials file");
                None
            }
        }
    }

    /// Remove the file if present.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialStore` if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::CredentialStore(format!("failed to delete {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }
}
