mod auth;
mod playlist;
mod task;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use playlist::PlaylistCommands;
pub use task::{TaskCommands, TaskFields};
