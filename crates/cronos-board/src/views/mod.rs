//! Read-only projections of the task list and history.
//!
//! Pure functions of their input: recompute on every new snapshot.

mod board;
mod history;
mod timeline;

pub use board::{BoardColumns, board};
pub use history::{EMPTY_HISTORY, recent_history, snapshot_fields};
pub use timeline::{EMPTY_TIMELINE, Timeline, timeline};
