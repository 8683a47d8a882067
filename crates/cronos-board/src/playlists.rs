//! Video playlist scheduler.
//!
//! Same write discipline as the task store: remote first, cache after.
//! Video lists are always written back whole.

use std::sync::Arc;

use cronos_core::entities::{Playlist, Video};
use cronos_core::remote::{RemoteError, RemoteStore};
use cronos_core::youtube::extract_video_id;

use crate::error::BoardError;
use crate::notice::Notices;
use crate::session::Session;

pub struct PlaylistScheduler {
    remote: Arc<dyn RemoteStore>,
    session: Session,
    notices: Notices,
    playlists: Vec<Playlist>,
}

impl PlaylistScheduler {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteStore>, session: Session, notices: Notices) -> Self {
        Self {
            remote,
            session,
            notices,
            playlists: Vec::new(),
        }
    }

    #[must_use]
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Replace the cache with the user's playlists.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Remote` if the fetch fails.
    pub async fn load(&mut self) -> Result<&[Playlist], BoardError> {
        match self.remote.list_playlists(self.session.user_id()).await {
            Ok(playlists) => {
                tracing::debug!(count = playlists.len(), "playlists loaded");
                self.playlists = playlists;
                Ok(&self.playlists)
            }
            Err(error) => Err(self.fail("Failed to load playlists", error)),
        }
    }

    /// Create an empty playlist and append it to the cache.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Validation` for a blank name, or
    /// `BoardError::Remote` if the insert fails.
    pub async fn create_playlist(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist, BoardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject("Please enter a playlist name"));
        }
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let playlist = match self
            .remote
            .insert_playlist(self.session.user_id(), name, description)
            .await
        {
            Ok(playlist) => playlist,
            Err(error) => return Err(self.fail("Failed to create playlist", error)),
        };

        self.playlists.push(playlist.clone());
        self.notices.success("Playlist created!");
        Ok(playlist)
    }

    /// Append the video at `url` to the selected playlist.
    ///
    /// The new video is titled `Video {n}`, `n` being the list's new length.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Validation` when nothing is selected, the URL is
    /// blank or not a YouTube URL, `BoardError::NotFound` for an unknown
    /// playlist, or `BoardError::Remote` if the write fails.
    pub async fn add_video(
        &mut self,
        playlist_id: Option<&str>,
        url: &str,
    ) -> Result<Video, BoardError> {
        let url = url.trim();
        let Some(playlist_id) = playlist_id.filter(|_| !url.is_empty()) else {
            return Err(self.reject("Please select a playlist and enter a video URL"));
        };
        let Some(video_id) = extract_video_id(url) else {
            return Err(self.reject("Invalid YouTube URL"));
        };
        let index = self.index_of(playlist_id)?;

        let mut videos = self.playlists[index].videos.clone();
        let video = Video {
            id: video_id.to_string(),
            title: format!("Video {}", videos.len() + 1),
            url: url.to_string(),
        };
        videos.push(video.clone());

        if let Err(error) = self
            .remote
            .update_playlist_videos(self.session.user_id(), playlist_id, &videos)
            .await
        {
            return Err(self.fail("Failed to add video", error));
        }

        self.playlists[index].videos = videos;
        self.notices.success("Video added to playlist!");
        Ok(video)
    }

    /// Drop every video with `video_id` from the playlist.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::NotFound` for an unknown playlist, or
    /// `BoardError::Remote` if the write fails.
    pub async fn remove_video(&mut self, playlist_id: &str, video_id: &str) -> Result<(), BoardError> {
        let index = self.index_of(playlist_id)?;
        let videos: Vec<Video> = self.playlists[index]
            .videos
            .iter()
            .filter(|v| v.id != video_id)
            .cloned()
            .collect();

        if let Err(error) = self
            .remote
            .update_playlist_videos(self.session.user_id(), playlist_id, &videos)
            .await
        {
            return Err(self.fail("Failed to remove video", error));
        }

        self.playlists[index].videos = videos;
        self.notices.success("Video removed");
        Ok(())
    }

    fn index_of(&self, playlist_id: &str) -> Result<usize, BoardError> {
        self.playlists
            .iter()
            .position(|p| p.id == playlist_id)
            .ok_or_else(|| BoardError::NotFound {
                entity: "playlist",
                id: playlist_id.to_string(),
            })
    }

    fn reject(&self, message: &str) -> BoardError {
        self.notices.error(message);
        BoardError::validation(message)
    }

    fn fail(&self, message: &str, error: RemoteError) -> BoardError {
        tracing::warn!(%error, "{message}");
        self.notices.error(message);
        error.into()
    }
}
