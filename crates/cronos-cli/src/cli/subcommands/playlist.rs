use clap::Subcommand;

/// Playlist commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PlaylistCommands {
    /// List playlists with their videos.
    List,
    /// Create an empty playlist.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add a YouTube video to a playlist.
    AddVideo { playlist_id: String, url: String },
    /// Remove a video from a playlist.
    RemoveVideo {
        playlist_id: String,
        video_id: String,
    },
}
