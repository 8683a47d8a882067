pub mod auth;
pub mod board;
pub mod dispatch;
pub mod history;
pub mod playlist;
pub mod shared;
pub mod task;
pub mod timeline;
