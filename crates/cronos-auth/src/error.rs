use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in, run `cronos auth login`")]
    NotAuthenticated,

    #[error("invalid user id: {0}")]
    InvalidUser(String),

    /// The identity comes from the environment or config and cannot be
    /// changed by signing in or out.
    #[error("identity is set by {0}; unset it there to sign out")]
    PinnedIdentity(&'static str),

    #[error("credential store error: {0}")]
    CredentialStore(String),
}
