//! Playlist scheduler against a failure-injecting store.

mod common;

use cronos_board::{BoardError, Notices, PlaylistScheduler};
use cronos_core::remote::{RemoteError, RemoteStore};
use pretty_assertions::assert_eq;

use common::{Op, messages, scheduler, session_for};

const SHORT_URL: &str = "https://youtu.be/dQw4w9WgXcQ";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

#[tokio::test]
async fn create_then_reload() {
    let (_, mut playlists, mut rx) = scheduler().await;
    let created = playlists
        .create_playlist("  Focus music ", Some(" "))
        .await
        .unwrap();

    assert_eq!(created.name, "Focus music");
    assert_eq!(created.description, None);
    assert!(created.videos.is_empty());
    assert_eq!(messages(&mut rx), vec!["Playlist created!"]);

    let loaded = playlists.load().await.unwrap().to_vec();
    assert_eq!(loaded, vec![created]);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let (remote, mut playlists, mut rx) = scheduler().await;
    let err = playlists.create_playlist("   ", None).await.unwrap_err();

    assert!(matches!(err, BoardError::Validation(_)));
    assert_eq!(remote.calls(Op::InsertPlaylist), 0);
    assert_eq!(messages(&mut rx), vec!["Please enter a playlist name"]);
}

#[tokio::test]
async fn add_video_numbers_titles_and_persists() {
    let (remote, mut playlists, mut rx) = scheduler().await;
    let playlist = playlists.create_playlist("Talks", None).await.unwrap();
    messages(&mut rx);

    let first = playlists.add_video(Some(playlist.id.as_str()), SHORT_URL).await.unwrap();
    let second = playlists.add_video(Some(playlist.id.as_str()), WATCH_URL).await.unwrap();

    assert_eq!(first.id, "dQw4w9WgXcQ");
    assert_eq!(first.title, "Video 1");
    assert_eq!(second.title, "Video 2");
    assert_eq!(second.url, WATCH_URL);
    assert_eq!(
        messages(&mut rx),
        vec!["Video added to playlist!", "Video added to playlist!"]
    );

    let stored = remote.db().list_playlists(common::USER).await.unwrap();
    assert_eq!(stored[0].videos, vec![first, second]);
}

#[tokio::test]
async fn invalid_url_never_reaches_remote() {
    let (remote, mut playlists, mut rx) = scheduler().await;
    let playlist = playlists.create_playlist("Talks", None).await.unwrap();
    messages(&mut rx);

    let err = playlists
        .add_video(Some(playlist.id.as_str()), "https://example.com/video")
        .await
        .unwrap_err();

    assert!(matches!(&err, BoardError::Validation(m) if m == "Invalid YouTube URL"));
    assert_eq!(remote.calls(Op::UpdatePlaylistVideos), 0);
    assert_eq!(messages(&mut rx), vec!["Invalid YouTube URL"]);
}

#[tokio::test]
async fn missing_selection_or_url_is_rejected() {
    let (remote, mut playlists, mut rx) = scheduler().await;
    let playlist = playlists.create_playlist("Talks", None).await.unwrap();
    messages(&mut rx);

    assert!(playlists.add_video(None, SHORT_URL).await.is_err());
    assert!(playlists.add_video(Some(playlist.id.as_str()), "  ").await.is_err());
    assert_eq!(remote.calls(Op::UpdatePlaylistVideos), 0);
    assert_eq!(
        messages(&mut rx),
        vec![
            "Please select a playlist and enter a video URL",
            "Please select a playlist and enter a video URL",
        ]
    );
}

#[tokio::test]
async fn unknown_playlist_is_not_found() {
    let (_, mut playlists, _rx) = scheduler().await;
    let err = playlists.add_video(Some("pls-missing"), SHORT_URL).await.unwrap_err();
    assert!(matches!(err, BoardError::NotFound { entity: "playlist", .. }));
}

#[tokio::test]
async fn remove_video_filters_every_copy() {
    let (_, mut playlists, mut rx) = scheduler().await;
    let playlist = playlists.create_playlist("Loop", None).await.unwrap();
    playlists.add_video(Some(playlist.id.as_str()), SHORT_URL).await.unwrap();
    playlists.add_video(Some(playlist.id.as_str()), WATCH_URL).await.unwrap();
    playlists
        .add_video(Some(playlist.id.as_str()), "https://youtu.be/9bZkp7q19f0")
        .await
        .unwrap();
    messages(&mut rx);

    playlists.remove_video(&playlist.id, "dQw4w9WgXcQ").await.unwrap();

    let videos = &playlists.get(&playlist.id).unwrap().videos;
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].id, "9bZkp7q19f0");
    assert_eq!(messages(&mut rx), vec!["Video removed"]);
}

#[tokio::test]
async fn failed_write_keeps_cached_videos() {
    let (remote, mut playlists, mut rx) = scheduler().await;
    let playlist = playlists.create_playlist("Talks", None).await.unwrap();
    playlists.add_video(Some(playlist.id.as_str()), SHORT_URL).await.unwrap();
    messages(&mut rx);
    remote.fail(Op::UpdatePlaylistVideos);

    assert!(playlists.add_video(Some(playlist.id.as_str()), WATCH_URL).await.is_err());
    assert!(playlists.remove_video(&playlist.id, "dQw4w9WgXcQ").await.is_err());

    assert_eq!(playlists.get(&playlist.id).unwrap().videos.len(), 1);
    assert_eq!(
        messages(&mut rx),
        vec!["Failed to add video", "Failed to remove video"]
    );
}

#[tokio::test]
async fn another_users_playlist_is_not_writable() {
    let (remote, mut playlists, _rx) = scheduler().await;
    let mine = playlists.create_playlist("Mine", None).await.unwrap();

    let (notices, mut rx) = Notices::channel();
    let mut other = PlaylistScheduler::new(remote.clone(), session_for("user_2"), notices);
    other.load().await.unwrap();
    assert!(other.playlists().is_empty());

    let err = other.add_video(Some(mine.id.as_str()), SHORT_URL).await.unwrap_err();
    assert!(matches!(err, BoardError::NotFound { .. }));
    assert!(messages(&mut rx).is_empty());

    let err = remote
        .update_playlist_videos("user_2", &mine.id, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::NotFound { .. }));

    playlists.load().await.unwrap();
    assert_eq!(playlists.playlists()[0].name, "Mine");
    assert!(playlists.playlists()[0].videos.is_empty());
}
