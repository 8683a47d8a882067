//! Entity structs for every row type Cronos reads or writes.

mod history;
mod playlist;
mod task;

pub use history::{HistoryEntry, NewHistoryEntry};
pub use playlist::{Playlist, Video};
pub use task::{Task, TaskDraft, TaskPatch, TaskPatchBuilder};
