//! Shared harness: a libSQL `:memory:` store that can be told to fail.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cronos_board::{NoticeReceiver, Notices, PlaylistScheduler, Session, TaskStore};
use cronos_core::entities::{HistoryEntry, NewHistoryEntry, Playlist, Task, TaskDraft, TaskPatch, Video};
use cronos_core::enums::{Table, TaskStatus};
use cronos_core::identity::SessionUser;
use cronos_core::remote::{ChangeFeed, RemoteError, RemoteStore};
use cronos_db::CronosDb;
use tokio::sync::Barrier;

pub const USER: &str = "user_1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListTasks,
    InsertTask,
    UpdateTask,
    UpdateTaskStatus,
    DeleteTask,
    InsertHistory,
    ListHistory,
    ListPlaylists,
    InsertPlaylist,
    UpdatePlaylistVideos,
}

/// Holds status writes before they reach the database.
///
/// Each write waits on `arrived`, then on `release`. Both barriers also
/// count the test, so it can look around while every write is in flight.
pub struct StatusGate {
    pub arrived: Barrier,
    pub release: Barrier,
}

/// Delegates to a real store, failing the operations it is told to and
/// counting every call.
pub struct FlakyStore {
    inner: CronosDb,
    failing: Mutex<HashSet<Op>>,
    calls: Mutex<HashMap<Op, usize>>,
    status_gate: Mutex<Option<Arc<StatusGate>>>,
}

impl FlakyStore {
    pub async fn new() -> Self {
        Self {
            inner: CronosDb::open_local(":memory:").await.unwrap(),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(HashMap::new()),
            status_gate: Mutex::new(None),
        }
    }

    pub fn db(&self) -> &CronosDb {
        &self.inner
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn heal(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Hold the next `writes` status writes at a [`StatusGate`].
    pub fn gate_status_writes(&self, writes: usize) -> Arc<StatusGate> {
        let gate = Arc::new(StatusGate {
            arrived: Barrier::new(writes + 1),
            release: Barrier::new(writes + 1),
        });
        *self.status_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.inner.list_history(USER, 1000).await.unwrap()
    }

    fn enter(&self, op: Op) -> Result<(), RemoteError> {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
        if self.failing.lock().unwrap().contains(&op) {
            return Err(RemoteError::Unavailable(format!("injected failure: {op:?}")));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for FlakyStore {
    async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, RemoteError> {
        self.enter(Op::ListTasks)?;
        RemoteStore::list_tasks(&self.inner, user_id).await
    }

    async fn insert_task(&self, user_id: &str, draft: &TaskDraft) -> Result<Task, RemoteError> {
        self.enter(Op::InsertTask)?;
        self.inner.insert_task(user_id, draft).await
    }

    async fn update_task(
        &self,
        user_id: &str,
        id: &str,
        patch: &TaskPatch,
    ) -> Result<(), RemoteError> {
        self.enter(Op::UpdateTask)?;
        RemoteStore::update_task(&self.inner, user_id, id, patch).await
    }

    async fn update_task_status(
        &self,
        user_id: &str,
        id: &str,
        status: TaskStatus,
    ) -> Result<(), RemoteError> {
        self.enter(Op::UpdateTaskStatus)?;
        let gate = self.status_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.arrived.wait().await;
            gate.release.wait().await;
        }
        RemoteStore::update_task_status(&self.inner, user_id, id, status).await
    }

    async fn delete_task(&self, user_id: &str, id: &str) -> Result<(), RemoteError> {
        self.enter(Op::DeleteTask)?;
        RemoteStore::delete_task(&self.inner, user_id, id).await
    }

    async fn insert_history(
        &self,
        user_id: &str,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntry, RemoteError> {
        self.enter(Op::InsertHistory)?;
        self.inner.insert_history(user_id, entry).await
    }

    async fn list_history(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryEntry>, RemoteError> {
        self.enter(Op::ListHistory)?;
        RemoteStore::list_history(&self.inner, user_id, limit).await
    }

    async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, RemoteError> {
        self.enter(Op::ListPlaylists)?;
        RemoteStore::list_playlists(&self.inner, user_id).await
    }

    async fn insert_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist, RemoteError> {
        self.enter(Op::InsertPlaylist)?;
        self.inner.insert_playlist(user_id, name, description).await
    }

    async fn update_playlist_videos(
        &self,
        user_id: &str,
        id: &str,
        videos: &[Video],
    ) -> Result<(), RemoteError> {
        self.enter(Op::UpdatePlaylistVideos)?;
        self.inner.update_playlist_videos(user_id, id, videos).await
    }

    fn subscribe(&self, table: Table) -> ChangeFeed {
        self.inner.subscribe(table)
    }
}

pub fn session() -> Session {
    session_for(USER)
}

pub fn session_for(user_id: &str) -> Session {
    Session::new(SessionUser {
        user_id: user_id.into(),
        email: None,
    })
}

pub struct Harness {
    pub remote: Arc<FlakyStore>,
    pub store: TaskStore,
    pub notices: NoticeReceiver,
}

pub async fn harness() -> Harness {
    let remote = Arc::new(FlakyStore::new().await);
    let (notices, rx) = Notices::channel();
    let store = TaskStore::new(remote.clone(), session(), notices);
    Harness {
        remote,
        store,
        notices: rx,
    }
}

pub async fn scheduler() -> (Arc<FlakyStore>, PlaylistScheduler, NoticeReceiver) {
    let remote = Arc::new(FlakyStore::new().await);
    let (notices, rx) = Notices::channel();
    let scheduler = PlaylistScheduler::new(remote.clone(), session(), notices);
    (remote, scheduler, rx)
}

/// Messages received so far.
pub fn messages(rx: &mut NoticeReceiver) -> Vec<String> {
    rx.drain().into_iter().map(|n| n.message).collect()
}

pub fn draft(title: &str, status: TaskStatus) -> TaskDraft {
    TaskDraft {
        status: Some(status),
        ..TaskDraft::new(title)
    }
}
