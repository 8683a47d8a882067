use std::sync::Arc;

use anyhow::Context;
use cronos_board::{NoticeLevel, NoticeReceiver, Notices, PlaylistScheduler, Session, TaskStore};
use cronos_config::CronosConfig;
use cronos_core::remote::RemoteStore;
use cronos_db::CronosDb;

use crate::cli::GlobalFlags;

/// Shared application resources for one signed-in invocation.
pub struct AppContext {
    pub config: CronosConfig,
    pub session: Session,
    pub db: Arc<CronosDb>,
    pub remote: Arc<dyn RemoteStore>,
    pub notices: Notices,
    notice_rx: NoticeReceiver,
}

impl AppContext {
    pub async fn init(config: CronosConfig, session: Session) -> anyhow::Result<Self> {
        let db = CronosDb::open(&config.database)
            .await
            .context("failed to open cronos database")?;
        tracing::debug!(
            user_id = session.user_id(),
            synced = db.is_synced_replica(),
            "application context ready"
        );

        let db = Arc::new(db);
        let (notices, notice_rx) = Notices::channel();
        Ok(Self {
            config,
            session,
            remote: db.clone(),
            db,
            notices,
            notice_rx,
        })
    }

    #[must_use]
    pub fn task_store(&self) -> TaskStore {
        TaskStore::new(
            Arc::clone(&self.remote),
            self.session.clone(),
            self.notices.clone(),
        )
    }

    #[must_use]
    pub fn playlists(&self) -> PlaylistScheduler {
        PlaylistScheduler::new(
            Arc::clone(&self.remote),
            self.session.clone(),
            self.notices.clone(),
        )
    }

    /// Print pending notices to stderr.
    pub fn flush_notices(&mut self, flags: &GlobalFlags) {
        for notice in self.notice_rx.drain() {
            match notice.level {
                NoticeLevel::Success if flags.quiet => {}
                NoticeLevel::Success => eprintln!("ok: {}", notice.message),
                NoticeLevel::Error => eprintln!("error: {}", notice.message),
            }
        }
    }
}
