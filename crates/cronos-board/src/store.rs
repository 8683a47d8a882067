//! The task store: the one writer of the in-memory task list.
//!
//! Create, update and delete go to the remote store first and only touch
//! the cache once confirmed. Reorders and status changes from the board are
//! applied to the cache immediately and persisted afterwards; a failed
//! status write is reported but not rolled back.

use std::collections::HashMap;
use std::sync::Arc;

use cronos_core::entities::{Task, TaskDraft, TaskPatch};
use cronos_core::enums::TaskStatus;
use cronos_core::remote::{RemoteError, RemoteStore};
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::watch;

use crate::drag::DropIntent;
use crate::error::BoardError;
use crate::history::HistoryRecorder;
use crate::notice::Notices;
use crate::session::Session;

/// Outcome of persisting a reordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderReport {
    /// Tasks whose new status was written.
    pub persisted: Vec<String>,
    /// Tasks whose status write failed. The cache still shows the new status.
    pub failed: Vec<String>,
}

impl ReorderReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct TaskStore {
    remote: Arc<dyn RemoteStore>,
    session: Session,
    notices: Notices,
    history: HistoryRecorder,
    cache: watch::Sender<Arc<Vec<Task>>>,
}

impl TaskStore {
    /// A store with an empty cache. Call [`TaskStore::load`] to fill it.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteStore>, session: Session, notices: Notices) -> Self {
        let history = HistoryRecorder::new(Arc::clone(&remote), session.clone());
        let (cache, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            remote,
            session,
            notices,
            history,
            cache,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The current list. Immutable; a later write publishes a new one.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.cache.borrow())
    }

    /// Follow every future snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Arc<Vec<Task>>> {
        self.cache.subscribe()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Task> {
        self.cache.borrow().iter().find(|t| t.id == id).cloned()
    }

    /// Replace the cache with the user's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Remote` when the fetch fails; the cache keeps
    /// its previous contents.
    pub async fn load(&self) -> Result<Arc<Vec<Task>>, BoardError> {
        match self.remote.list_tasks(self.session.user_id()).await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "tasks loaded");
                let tasks = Arc::new(tasks);
                self.cache.send_replace(Arc::clone(&tasks));
                Ok(tasks)
            }
            Err(error) => {
                self.notices.error("Failed to load tasks");
                Err(error.into())
            }
        }
    }

    /// Create a task, record it, and reload.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Validation` for a blank title (nothing is sent),
    /// or `BoardError::Remote` if the insert fails.
    pub async fn create(&self, mut draft: TaskDraft) -> Result<Task, BoardError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(self.reject("Please enter a task title"));
        }
        draft.title = title.to_string();
        draft.status = Some(draft.status_or_default());

        let task = match self
            .remote
            .insert_task(self.session.user_id(), &draft)
            .await
        {
            Ok(task) => task,
            Err(error) => return Err(self.fail("Failed to create task", error)),
        };

        self.history.created(&task).await;
        self.notices.success("Task created successfully");
        self.reload().await;
        Ok(task)
    }

    /// Write the fields in `patch`, record them, and reload.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Validation` for an empty patch or a blank title,
    /// or `BoardError::Remote` if the write fails.
    pub async fn update(&self, id: &str, mut patch: TaskPatch) -> Result<(), BoardError> {
        if patch.is_empty() {
            return Err(self.reject("Nothing to update"));
        }
        if let Some(title) = &patch.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(self.reject("Please enter a task title"));
            }
            patch.title = Some(title.to_string());
        }

        if let Err(error) = self
            .remote
            .update_task(self.session.user_id(), id, &patch)
            .await
        {
            return Err(self.fail("Failed to update task", error));
        }

        self.history.updated(id, &patch).await;
        self.notices.success("Task updated successfully");
        self.reload().await;
        Ok(())
    }

    /// Delete a task and drop it from the cache without reloading.
    ///
    /// Records a `deleted` entry carrying the last cached snapshot.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Remote` if the delete fails; the cache is unchanged.
    pub async fn remove(&self, id: &str) -> Result<(), BoardError> {
        if let Err(error) = self.remote.delete_task(self.session.user_id(), id).await {
            return Err(self.fail("Failed to delete task", error));
        }

        let removed = self.get(id);
        self.cache.send_modify(|tasks| {
            *tasks = Arc::new(tasks.iter().filter(|t| t.id != id).cloned().collect());
        });

        self.history.deleted(id, removed.as_ref()).await;
        self.notices.success("Task deleted");
        Ok(())
    }

    /// Adopt `next` as the cache right away, then persist status changes.
    ///
    /// Only status is durable: positions live in the cache alone. Every task
    /// whose status differs from the current cache gets a concurrent status
    /// write followed by a `status_changed` entry. Tasks absent from the
    /// current cache are ignored.
    pub async fn apply_reorder_or_status_change(&self, next: Vec<Task>) -> ReorderReport {
        let changes: Vec<(String, TaskStatus, TaskStatus)> = {
            let current = self.snapshot();
            let before: HashMap<&str, TaskStatus> =
                current.iter().map(|t| (t.id.as_str(), t.status)).collect();
            next.iter()
                .filter_map(|task| {
                    let old = *before.get(task.id.as_str())?;
                    (old != task.status).then(|| (task.id.clone(), old, task.status))
                })
                .collect()
        };

        self.cache.send_replace(Arc::new(next));

        let results = join_all(
            changes
                .iter()
                .map(|(id, from, to)| self.persist_status(id, *from, *to)),
        )
        .await;

        let mut report = ReorderReport::default();
        for ((id, _, _), result) in changes.into_iter().zip(results) {
            match result {
                Ok(()) => report.persisted.push(id),
                Err(_) => report.failed.push(id),
            }
        }
        report
    }

    /// Apply a coordinator intent to the current list.
    pub async fn drop_task(&self, intent: &DropIntent) -> ReorderReport {
        let next = intent.apply(&self.snapshot());
        self.apply_reorder_or_status_change(next).await
    }

    async fn persist_status(
        &self,
        id: &str,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<(), RemoteError> {
        match self
            .remote
            .update_task_status(self.session.user_id(), id, to)
            .await
        {
            Ok(()) => {
                self.history.status_changed(id, from, to).await;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(task_id = id, %from, %to, %error, "status write failed");
                self.notices.error("Failed to update task status");
                Err(error)
            }
        }
    }

    /// Reload after a confirmed write. A failure is already reported by `load`.
    async fn reload(&self) {
        let _ = self.load().await;
    }

    fn reject(&self, message: &str) -> BoardError {
        self.notices.error(message);
        BoardError::validation(message)
    }

    fn fail(&self, message: &str, error: RemoteError) -> BoardError {
        tracing::warn!(%error, "{message}");
        self.notices.error(message);
        error.into()
    }
}
