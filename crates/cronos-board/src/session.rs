//! Session boundary.
//!
//! Nothing past this point reads the current user from ambient state: a
//! [`Session`] is produced here once and handed to each component.

use cronos_core::identity::{AuthProvider, SessionState, SessionUser};

use crate::error::BoardError;

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: SessionUser,
}

impl Session {
    #[must_use]
    pub const fn new(user: SessionUser) -> Self {
        Self { user }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user.user_id
    }

    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }
}

/// What the shell should show for a session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The auth provider has not answered yet.
    Loading,
    /// Public landing page.
    Landing,
    Workspace(Session),
}

pub struct SessionGate;

impl SessionGate {
    #[must_use]
    pub fn screen(state: &SessionState) -> Screen {
        match state {
            SessionState::Loading => Screen::Loading,
            SessionState::SignedOut => Screen::Landing,
            SessionState::SignedIn(user) => Screen::Workspace(Session::new(user.clone())),
        }
    }

    /// A session, or `NotSignedIn` for anything short of a signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::NotSignedIn` while loading or signed out.
    pub fn require(state: &SessionState) -> Result<Session, BoardError> {
        match Self::screen(state) {
            Screen::Workspace(session) => Ok(session),
            Screen::Loading | Screen::Landing => Err(BoardError::NotSignedIn),
        }
    }

    /// Ask the provider and decide the screen.
    pub async fn resolve(provider: &dyn AuthProvider) -> Screen {
        Self::screen(&provider.session_state().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            user_id: "user_1".into(),
            email: None,
        }
    }

    #[test]
    fn screens_follow_state() {
        assert_eq!(SessionGate::screen(&SessionState::Loading), Screen::Loading);
        assert_eq!(SessionGate::screen(&SessionState::SignedOut), Screen::Landing);
        assert_eq!(
            SessionGate::screen(&SessionState::SignedIn(user())),
            Screen::Workspace(Session::new(user()))
        );
    }

    #[test]
    fn require_rejects_loading_and_signed_out() {
        assert!(matches!(
            SessionGate::require(&SessionState::Loading),
            Err(BoardError::NotSignedIn)
        ));
        assert!(matches!(
            SessionGate::require(&SessionState::SignedOut),
            Err(BoardError::NotSignedIn)
        ));
        let session = SessionGate::require(&SessionState::SignedIn(user())).unwrap();
        assert_eq!(session.user_id(), "user_1");
    }
}
