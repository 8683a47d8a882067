//! # cronos-core
//!
//! Core types shared across all Cronos crates:
//! - Entity structs (tasks, history entries, playlists, videos)
//! - Status and action enums with their wire strings
//! - ID prefix constants
//! - The `RemoteStore` and `AuthProvider` ports
//! - YouTube URL parsing for the playlist scheduler
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod remote;
pub mod youtube;
