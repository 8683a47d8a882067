//! Remote data store port.
//!
//! The relational store is the durable source of truth for tasks, history,
//! and playlists. Application components only talk to it through
//! [`RemoteStore`], so the hosted backend, the local libSQL file, and test
//! doubles are interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::entities::{HistoryEntry, NewHistoryEntry, Playlist, Task, TaskDraft, TaskPatch, Video};
use crate::enums::{Table, TaskStatus};

/// Errors surfaced by a remote store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// No row matched the given id.
    #[error("{table} row not found: {id}")]
    NotFound { table: Table, id: String },

    /// The backend refused the write (constraint, permission, bad request).
    #[error("remote write rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or failed internally.
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded into an entity.
    #[error("could not decode remote row: {0}")]
    Decode(String),
}

/// Kind of row change delivered by a [`ChangeFeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A single row change on a remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: Table,
    pub kind: ChangeKind,
    pub id: String,
}

/// A live subscription to one table's change notifications.
///
/// The subscription is held for as long as the feed is alive; dropping it
/// (or calling [`ChangeFeed::unsubscribe`]) releases it.
#[derive(Debug)]
pub struct ChangeFeed {
    table: Table,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl ChangeFeed {
    /// Wrap a broadcast receiver, keeping only events for `table`.
    #[must_use]
    pub const fn new(table: Table, rx: broadcast::Receiver<ChangeEvent>) -> Self {
        Self { table, rx }
    }

    #[must_use]
    pub const fn table(&self) -> Table {
        self.table
    }

    /// Wait for the next change on this feed's table.
    ///
    /// Returns `None` once the publisher is gone. Lagged receivers skip the
    /// dropped events and keep going: the next delivered event still means
    /// "something changed".
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.table == self.table => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(table = %self.table, skipped, "change feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Release the subscription.
    pub fn unsubscribe(self) {
        tracing::debug!(table = %self.table, "change feed unsubscribed");
    }
}

/// Per-table CRUD operations of the hosted relational store.
///
/// Every row belongs to one user. Writes by id only touch rows owned by the
/// given `user_id`; a row owned by someone else is reported as
/// [`RemoteError::NotFound`].
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All tasks owned by `user_id`, newest first.
    async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, RemoteError>;

    /// Insert a task and return the stored row.
    async fn insert_task(&self, user_id: &str, draft: &TaskDraft) -> Result<Task, RemoteError>;

    /// Write the changed fields of one task.
    async fn update_task(
        &self,
        user_id: &str,
        id: &str,
        patch: &TaskPatch,
    ) -> Result<(), RemoteError>;

    /// Write a task's status column only.
    async fn update_task_status(
        &self,
        user_id: &str,
        id: &str,
        status: TaskStatus,
    ) -> Result<(), RemoteError>;

    async fn delete_task(&self, user_id: &str, id: &str) -> Result<(), RemoteError>;

    /// Append a history entry and return the stored row.
    async fn insert_history(
        &self,
        user_id: &str,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntry, RemoteError>;

    /// The most recent `limit` history entries of `user_id`, newest first.
    async fn list_history(&self, user_id: &str, limit: u32)
    -> Result<Vec<HistoryEntry>, RemoteError>;

    async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, RemoteError>;

    /// Insert an empty playlist and return the stored row.
    async fn insert_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist, RemoteError>;

    /// Replace a playlist's whole video list.
    async fn update_playlist_videos(
        &self,
        user_id: &str,
        id: &str,
        videos: &[Video],
    ) -> Result<(), RemoteError>;

    /// Subscribe to change notifications for `table`.
    fn subscribe(&self, table: Table) -> ChangeFeed;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(table: Table, id: &str) -> ChangeEvent {
        ChangeEvent {
            table,
            kind: ChangeKind::Insert,
            id: id.into(),
        }
    }

    #[tokio::test]
    async fn feed_filters_other_tables() {
        let (tx, rx) = broadcast::channel(8);
        let mut feed = ChangeFeed::new(Table::TaskHistory, rx);

        tx.send(event(Table::Tasks, "tsk-1")).unwrap();
        tx.send(event(Table::TaskHistory, "hst-1")).unwrap();

        let got = feed.next().await.unwrap();
        assert_eq!(got.id, "hst-1");
    }

    #[tokio::test]
    async fn feed_ends_when_publisher_dropped() {
        let (tx, rx) = broadcast::channel(8);
        let mut feed = ChangeFeed::new(Table::Tasks, rx);
        drop(tx);
        assert!(feed.next().await.is_none());
    }

    #[tokio::test]
    async fn unsubscribe_releases_receiver() {
        let (tx, rx) = broadcast::channel::<ChangeEvent>(8);
        let feed = ChangeFeed::new(Table::Tasks, rx);
        assert_eq!(tx.receiver_count(), 1);
        feed.unsubscribe();
        assert_eq!(tx.receiver_count(), 0);
    }

    #[tokio::test]
    async fn lagged_feed_keeps_delivering() {
        let (tx, rx) = broadcast::channel(2);
        let mut feed = ChangeFeed::new(Table::Tasks, rx);
        for n in 0..5 {
            tx.send(event(Table::Tasks, &format!("tsk-{n}"))).unwrap();
        }
        let got = feed.next().await.unwrap();
        assert_eq!(got.id, "tsk-3");
    }
}
