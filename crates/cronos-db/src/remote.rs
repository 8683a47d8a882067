//! `RemoteStore` implementation backed by libSQL.

use async_trait::async_trait;
use cronos_core::entities::{HistoryEntry, NewHistoryEntry, Playlist, Task, TaskDraft, TaskPatch, Video};
use cronos_core::enums::{Table, TaskStatus};
use cronos_core::remote::{ChangeFeed, RemoteError, RemoteStore};

use crate::CronosDb;

#[async_trait]
impl RemoteStore for CronosDb {
    async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, RemoteError> {
        tracing::debug!(user_id, "list tasks");
        Ok(Self::list_tasks(self, user_id).await?)
    }

    async fn insert_task(&self, user_id: &str, draft: &TaskDraft) -> Result<Task, RemoteError> {
        tracing::debug!(user_id, title = %draft.title, "insert task");
        Ok(self.create_task(user_id, draft).await?)
    }

    async fn update_task(
        &self,
        user_id: &str,
        id: &str,
        patch: &TaskPatch,
    ) -> Result<(), RemoteError> {
        tracing::debug!(user_id, task_id = id, "update task");
        Ok(Self::update_task(self, user_id, id, patch).await?)
    }

    async fn update_task_status(
        &self,
        user_id: &str,
        id: &str,
        status: TaskStatus,
    ) -> Result<(), RemoteError> {
        tracing::debug!(user_id, task_id = id, %status, "update task status");
        Ok(Self::update_task_status(self, user_id, id, status).await?)
    }

    async fn delete_task(&self, user_id: &str, id: &str) -> Result<(), RemoteError> {
        tracing::debug!(user_id, task_id = id, "delete task");
        Ok(Self::delete_task(self, user_id, id).await?)
    }

    async fn insert_history(
        &self,
        user_id: &str,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntry, RemoteError> {
        Ok(self.append_history(user_id, entry).await?)
    }

    async fn list_history(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryEntry>, RemoteError> {
        tracing::debug!(user_id, limit, "list history");
        Ok(Self::list_history(self, user_id, limit).await?)
    }

    async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, RemoteError> {
        tracing::debug!(user_id, "list playlists");
        Ok(Self::list_playlists(self, user_id).await?)
    }

    async fn insert_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist, RemoteError> {
        tracing::debug!(user_id, name, "insert playlist");
        Ok(self.create_playlist(user_id, name, description).await?)
    }

    async fn update_playlist_videos(
        &self,
        user_id: &str,
        id: &str,
        videos: &[Video],
    ) -> Result<(), RemoteError> {
        tracing::debug!(user_id, playlist_id = id, "update playlist videos");
        Ok(self.set_playlist_videos(user_id, id, videos).await?)
    }

    fn subscribe(&self, table: Table) -> ChangeFeed {
        self.changes(table)
    }
}
