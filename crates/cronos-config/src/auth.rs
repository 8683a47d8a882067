//! Static identity configuration.

use serde::{Deserialize, Serialize};

/// A fixed identity for scripted or CI use. When `user_id` is set it takes
/// precedence over the stored credentials file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub email: String,
}

impl AuthConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_is_not_configured() {
        let config = AuthConfig {
            user_id: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn configured_with_user_id() {
        let config = AuthConfig {
            user_id: "user_42".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
