//! # cronos-db
//!
//! libSQL storage for Cronos: tasks, the append-only task history, and
//! video playlists.
//!
//! [`CronosDb`] is either a plain local file (`:memory:` in tests) or an
//! embedded replica of a hosted database. Either way it implements the
//! [`RemoteStore`](cronos_core::remote::RemoteStore) port and publishes a
//! change event for every successful write.

pub mod error;
pub mod helpers;
mod migrations;
mod remote;
pub mod repos;
pub mod retry;

use std::time::Duration;

use cronos_config::DatabaseConfig;
use cronos_core::enums::Table;
use cronos_core::remote::{ChangeEvent, ChangeFeed, ChangeKind};
use libsql::Builder;
use libsql::params::IntoParams;
use tokio::sync::broadcast;

use error::DatabaseError;
use retry::{RetryConfig, is_transient_remote_error};

/// Buffered change events per subscriber before it starts lagging.
const CHANGE_FEED_CAPACITY: usize = 256;

/// Central database handle for all Cronos state.
pub struct CronosDb {
    db: libsql::Database,
    conn: libsql::Connection,
    synced: bool,
    retry: RetryConfig,
    changes: broadcast::Sender<ChangeEvent>,
}

impl CronosDb {
    /// Open a local-only database at `path` and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::from_database(db, false).await
    }

    /// Open an embedded replica of a hosted database.
    ///
    /// Reads are served from `replica_path`; writes go to the primary.
    /// With `read_your_writes` a write is visible locally as soon as it
    /// returns. A `sync_interval` enables background pulls.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the replica cannot be built, the initial
    /// sync fails, or migrations fail.
    pub async fn open_synced(
        replica_path: &str,
        url: &str,
        auth_token: &str,
        read_your_writes: bool,
        sync_interval: Option<Duration>,
    ) -> Result<Self, DatabaseError> {
        let mut builder =
            Builder::new_remote_replica(replica_path, url.to_string(), auth_token.to_string())
                .read_your_writes(read_your_writes);
        if let Some(interval) = sync_interval {
            builder = builder.sync_interval(interval);
        }
        let db = builder.build().await?;
        db.sync().await?;
        tracing::debug!(url, replica_path, "embedded replica synced");
        Self::from_database(db, true).await
    }

    /// Open whatever the database section describes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the path cannot be resolved or the
    /// database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let path = config
            .resolved_path()
            .map_err(|e| DatabaseError::Other(anyhow::anyhow!("{e}")))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
            }
        }
        let path = path.to_string_lossy();

        if config.is_remote() {
            Self::open_synced(
                &path,
                &config.url,
                &config.auth_token,
                config.read_your_writes,
                Some(Duration::from_secs(config.sync_interval_secs)),
            )
            .await
        } else {
            Self::open_local(&path).await
        }
    }

    async fn from_database(db: libsql::Database, synced: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        let cronos_db = Self {
            db,
            conn,
            synced,
            retry: RetryConfig::default(),
            changes,
        };
        cronos_db.run_migrations().await?;
        Ok(cronos_db)
    }

    /// Replace the retry policy for hosted-replica statements.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_synced_replica(&self) -> bool {
        self.synced
    }

    /// Pull the primary's latest state into the replica. No-op for local files.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the sync request fails.
    pub async fn sync(&self) -> Result<(), DatabaseError> {
        if self.synced {
            self.db.sync().await?;
            tracing::debug!("replica synced");
        }
        Ok(())
    }

    /// Generate a prefixed ID with 128 random bits, e.g.
    /// `"tsk-3f9c0a7e5b2d4c18a6e1f0b9d7c3a254"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .query_with("SELECT ?1 || '-' || lower(hex(randomblob(16)))", || {
                libsql::params![prefix]
            })
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Execute a statement, retrying transient hosted errors.
    ///
    /// `make_params` is called once per attempt since params are consumed.
    ///
    /// # Errors
    ///
    /// Returns the last `DatabaseError` once retries are exhausted, or the
    /// first non-transient one.
    pub async fn execute_with<P, F>(&self, sql: &str, make_params: F) -> Result<u64, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let mut attempt = 1;
        loop {
            match self.conn.execute(sql, make_params()).await {
                Ok(affected) => return Ok(affected),
                Err(e) if self.should_retry(&e, attempt) => {
                    self.backoff(&e, attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Run a query, retrying transient hosted errors.
    ///
    /// # Errors
    ///
    /// Same as [`CronosDb::execute_with`].
    pub async fn query_with<P, F>(
        &self,
        sql: &str,
        make_params: F,
    ) -> Result<libsql::Rows, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let mut attempt = 1;
        loop {
            match self.conn.query(sql, make_params()).await {
                Ok(rows) => return Ok(rows),
                Err(e) if self.should_retry(&e, attempt) => {
                    self.backoff(&e, attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn should_retry(&self, e: &libsql::Error, attempt: u32) -> bool {
        self.synced && attempt < self.retry.max_attempts && is_transient_remote_error(e)
    }

    async fn backoff(&self, e: &libsql::Error, attempt: u32) {
        let delay = self.retry.delay_for(attempt);
        tracing::warn!(attempt, ?delay, error = %e, "transient database error, retrying");
        tokio::time::sleep(delay).await;
    }

    /// Subscribe to change events for one table.
    #[must_use]
    pub fn changes(&self, table: Table) -> ChangeFeed {
        ChangeFeed::new(table, self.changes.subscribe())
    }

    /// Publish a change. Nobody listening is not an error.
    pub(crate) fn publish(&self, table: Table, kind: ChangeKind, id: &str) {
        let _ = self.changes.send(ChangeEvent {
            table,
            kind,
            id: id.to_string(),
        });
    }
}

#[cfg(test)]
pub(crate) mod test_support;
