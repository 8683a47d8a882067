//! Database error types for cronos-db.

use cronos_core::enums::Table;
use cronos_core::remote::RemoteError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A write or lookup matched no row.
    #[error("{table} row not found: {id}")]
    NotFound { table: Table, id: String },

    /// A stored column could not be parsed into its entity field.
    #[error("Invalid column value: {0}")]
    Decode(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether the database refused the statement itself (constraint or
    /// type check) rather than failing to run it.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::LibSql(e) => {
                let msg = e.to_string();
                msg.contains("constraint failed") || msg.contains("CHECK constraint")
            }
            _ => false,
        }
    }
}

impl From<DatabaseError> for RemoteError {
    fn from(err: DatabaseError) -> Self {
        if err.is_rejection() {
            return Self::Rejected(err.to_string());
        }
        match err {
            DatabaseError::NotFound { table, id } => Self::NotFound { table, id },
            DatabaseError::Decode(msg) => Self::Decode(msg),
            DatabaseError::NoResult => Self::Decode("no row returned".into()),
            other => Self::Unavailable(other.to_string()),
        }
    }
}
