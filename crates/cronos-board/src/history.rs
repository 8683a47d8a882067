//! History emission and the live history feed.
//!
//! History is best-effort: a failed append is logged and dropped. It never
//! reaches the user and never undoes the task write it describes.

use std::sync::Arc;

use cronos_core::entities::{HistoryEntry, NewHistoryEntry, Task, TaskPatch};
use cronos_core::enums::{Table, TaskStatus};
use cronos_core::errors::CoreError;
use cronos_core::remote::{ChangeFeed, RemoteStore};

use crate::error::BoardError;
use crate::session::Session;

/// Default number of entries the history screen shows.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Appends one history entry per successful task mutation.
#[derive(Clone)]
pub struct HistoryRecorder {
    remote: Arc<dyn RemoteStore>,
    session: Session,
}

impl HistoryRecorder {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteStore>, session: Session) -> Self {
        Self { remote, session }
    }

    pub async fn created(&self, task: &Task) -> Option<HistoryEntry> {
        self.record(NewHistoryEntry::created(task)).await
    }

    pub async fn updated(&self, task_id: &str, patch: &TaskPatch) -> Option<HistoryEntry> {
        self.record(NewHistoryEntry::updated(task_id, patch)).await
    }

    pub async fn status_changed(
        &self,
        task_id: &str,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Option<HistoryEntry> {
        self.record(Ok(NewHistoryEntry::status_changed(task_id, from, to)))
            .await
    }

    pub async fn deleted(&self, task_id: &str, last_known: Option<&Task>) -> Option<HistoryEntry> {
        self.record(NewHistoryEntry::deleted(task_id, last_known))
            .await
    }

    async fn record(&self, entry: Result<NewHistoryEntry, CoreError>) -> Option<HistoryEntry> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(%error, "history snapshot could not be encoded; entry dropped");
                return None;
            }
        };

        match self
            .remote
            .insert_history(self.session.user_id(), &entry)
            .await
        {
            Ok(stored) => Some(stored),
            Err(error) => {
                tracing::warn!(
                    task_id = %entry.task_id,
                    action = %entry.action,
                    %error,
                    "history append failed"
                );
                None
            }
        }
    }
}

/// The latest history entries, refreshed whenever the history table changes.
///
/// Holds a change-feed subscription for as long as it is open.
pub struct HistoryFeed {
    remote: Arc<dyn RemoteStore>,
    session: Session,
    limit: u32,
    feed: ChangeFeed,
    entries: Vec<HistoryEntry>,
}

impl HistoryFeed {
    /// Subscribe, then fetch the first page.
    ///
    /// Subscribing first means a change landing during the fetch still
    /// triggers a refetch.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Remote` if the first fetch fails.
    pub async fn open(
        remote: Arc<dyn RemoteStore>,
        session: Session,
        limit: u32,
    ) -> Result<Self, BoardError> {
        let feed = remote.subscribe(Table::TaskHistory);
        let entries = remote.list_history(session.user_id(), limit).await?;
        tracing::debug!(count = entries.len(), "history feed opened");
        Ok(Self {
            remote,
            session,
            limit,
            feed,
            entries,
        })
    }

    /// Newest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Wait for the next history change and refetch.
    ///
    /// Returns `Ok(false)` once the change feed has ended. A failed refetch
    /// keeps the previous entries.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Remote` if the refetch fails.
    pub async fn next_change(&mut self) -> Result<bool, BoardError> {
        let Some(event) = self.feed.next().await else {
            return Ok(false);
        };
        tracing::debug!(id = %event.id, kind = ?event.kind, "history changed");
        self.refresh().await?;
        Ok(true)
    }

    /// Refetch without waiting for a change, for writes the feed cannot see.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Remote` if the fetch fails.
    pub async fn refresh(&mut self) -> Result<(), BoardError> {
        self.entries = self
            .remote
            .list_history(self.session.user_id(), self.limit)
            .await?;
        Ok(())
    }

    /// Release the subscription.
    pub fn close(self) {
        self.feed.unsubscribe();
    }
}
