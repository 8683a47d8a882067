use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named, ordered list of videos to watch later.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
}

/// A YouTube video referenced by its extracted 11-character id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub url: String,
}
