use cronos_core::entities::Playlist;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PlaylistCommands;
use crate::context::AppContext;
use crate::output::{Tabular, cell, output, output_rows};

#[derive(Serialize)]
#[serde(transparent)]
struct PlaylistRow<'a>(&'a Playlist);

impl Tabular for PlaylistRow<'_> {
    const HEADERS: &'static [&'static str] = &["id", "name", "videos", "description"];

    fn cells(&self) -> Vec<String> {
        let playlist = self.0;
        vec![
            playlist.id.clone(),
            playlist.name.clone(),
            playlist.videos.len().to_string(),
            cell(playlist.description.as_deref()),
        ]
    }
}

#[derive(Serialize)]
struct RemoveVideoResponse<'a> {
    playlist_id: &'a str,
    removed: &'a str,
}

/// Handle `cronos playlist <subcommand>`.
pub async fn handle(
    action: &PlaylistCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut scheduler = ctx.playlists();

    match action {
        PlaylistCommands::List => {
            let playlists = scheduler.load().await?;
            let rows: Vec<PlaylistRow<'_>> = playlists.iter().map(PlaylistRow).collect();
            output_rows(&rows, flags.format)
        }
        PlaylistCommands::Create { name, description } => {
            let playlist = scheduler
                .create_playlist(name, description.as_deref())
                .await?;
            output(&playlist, flags.format)
        }
        PlaylistCommands::AddVideo { playlist_id, url } => {
            scheduler.load().await?;
            let video = scheduler.add_video(Some(playlist_id.as_str()), url).await?;
            output(&video, flags.format)
        }
        PlaylistCommands::RemoveVideo {
            playlist_id,
            video_id,
        } => {
            scheduler.load().await?;
            scheduler.remove_video(playlist_id, video_id).await?;
            output(
                &RemoveVideoResponse {
                    playlist_id,
                    removed: video_id,
                },
                flags.format,
            )
        }
    }
}
