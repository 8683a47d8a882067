//! # cronos-board
//!
//! The application layer of Cronos: everything between the session and the
//! remote store.
//!
//! - [`TaskStore`]: the in-memory task list and its write paths
//! - [`DropCoordinator`]: turns drag gestures into reorder/status intents
//! - [`HistoryRecorder`] and [`HistoryFeed`]: the audit log
//! - [`views`]: board columns, timeline, recent history
//! - [`PlaylistScheduler`]: video playlists
//! - [`SessionGate`]: which screen a session state leads to

pub mod drag;
pub mod error;
pub mod history;
pub mod notice;
pub mod playlists;
pub mod session;
pub mod store;
pub mod views;

pub use drag::{DragState, DropCoordinator, DropIntent};
pub use error::BoardError;
pub use history::{DEFAULT_HISTORY_LIMIT, HistoryFeed, HistoryRecorder};
pub use notice::{Notice, NoticeLevel, NoticeReceiver, Notices};
pub use playlists::PlaylistScheduler;
pub use session::{Screen, Session, SessionGate};
pub use store::{ReorderReport, TaskStore};
