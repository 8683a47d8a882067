//! ID prefix constants.
//!
//! Every id handed out by the remote store has the form `{prefix}-{32 hex}`
//! (128 random bits).

pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_HISTORY: &str = "hst";
pub const PREFIX_PLAYLIST: &str = "pls";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_TASK, PREFIX_HISTORY, PREFIX_PLAYLIST];
