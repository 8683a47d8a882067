//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed to parse or extract.
    #[error("invalid configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the caller is missing its required fields.
    #[error("the '{section}' section is not configured")]
    NotConfigured { section: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
