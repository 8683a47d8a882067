//! General application configuration.

use cronos_core::enums::View;
use serde::{Deserialize, Serialize};

const fn default_history_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// How many entries the history screen fetches.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// Screen shown when the workspace opens.
    #[serde(default)]
    pub default_view: View,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_view: View::default(),
        }
    }
}
