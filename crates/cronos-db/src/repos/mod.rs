//! Table repositories, implemented as `impl CronosDb` blocks.
//!
//! Every successful write publishes one change event for its table.

pub mod history;
pub mod playlist;
pub mod task;
