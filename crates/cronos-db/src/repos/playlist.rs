//! Playlist repository. Videos are stored as a JSON array column.

use chrono::Utc;
use cronos_core::entities::{Playlist, Video};
use cronos_core::enums::Table;
use cronos_core::ids::PREFIX_PLAYLIST;
use cronos_core::remote::ChangeKind;

use crate::CronosDb;
use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, opt_text, parse_datetime};

const SELECT_COLS: &str = "id, user_id, name, description, videos, created_at";

fn row_to_playlist(row: &libsql::Row) -> Result<Playlist, DatabaseError> {
    let videos: Vec<Video> = serde_json::from_str(&row.get::<String>(4)?)
        .map_err(|e| DatabaseError::Decode(format!("playlist videos: {e}")))?;
    Ok(Playlist {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: get_opt_string(row, 3)?,
        videos,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn encode_videos(videos: &[Video]) -> Result<String, DatabaseError> {
    serde_json::to_string(videos).map_err(|e| DatabaseError::Other(e.into()))
}

impl CronosDb {
    /// Create an empty playlist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist, DatabaseError> {
        let id = self.generate_id(PREFIX_PLAYLIST).await?;
        let created_at = format_timestamp(Utc::now());
        let params: Vec<libsql::Value> = vec![
            id.as_str().into(),
            user_id.into(),
            name.into(),
            opt_text(description),
            "[]".into(),
            created_at.as_str().into(),
        ];

        self.execute_with(
            &format!("INSERT INTO youtube_playlists ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
            || libsql::params_from_iter(params.clone()),
        )
        .await?;

        self.publish(Table::YoutubePlaylists, ChangeKind::Insert, &id);
        tracing::info!(playlist_id = %id, "playlist created");

        Ok(Playlist {
            id,
            user_id: user_id.to_string(),
            name: name.to_string(),
            description: description.map(String::from),
            videos: Vec::new(),
            created_at: parse_datetime(&created_at)?,
        })
    }

    /// All playlists of `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, DatabaseError> {
        let mut rows = self
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM youtube_playlists WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                || [user_id],
            )
            .await?;

        let mut playlists = Vec::new();
        while let Some(row) = rows.next().await? {
            playlists.push(row_to_playlist(&row)?);
        }
        Ok(playlists)
    }

    /// Replace the whole video list of a playlist owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if `user_id` has no playlist with this id.
    pub async fn set_playlist_videos(
        &self,
        user_id: &str,
        id: &str,
        videos: &[Video],
    ) -> Result<(), DatabaseError> {
        let encoded = encode_videos(videos)?;
        let affected = self
            .execute_with(
                "UPDATE youtube_playlists SET videos = ?1 WHERE id = ?2 AND user_id = ?3",
                || [encoded.as_str(), id, user_id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound {
                table: Table::YoutubePlaylists,
                id: id.to_string(),
            });
        }

        self.publish(Table::YoutubePlaylists, ChangeKind::Update, id);
        tracing::info!(playlist_id = %id, videos = videos.len(), "playlist videos replaced");
        Ok(())
    }
}
